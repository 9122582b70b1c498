//! JSON views returned by the public pages and the dashboard.

use super::{
    excerpt, format_long_date, format_month_year, paragraphs, reading_minutes, reading_time,
    split_features, summary, FeatureCategory, HIGHLIGHTED_FEATURES,
};
use crate::remote::{Blog, Identity, Project};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogCard {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub date: String,
    pub reading_time: String,
    pub reading_minutes: usize,
    pub author: Option<String>,
}

impl From<&Blog> for BlogCard {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id.clone(),
            title: blog.title.clone(),
            slug: blog.slug.clone(),
            excerpt: excerpt(&blog.content),
            date: format_long_date(&blog.created_at),
            reading_time: reading_time(&blog.content),
            reading_minutes: reading_minutes(&blog.content),
            author: blog.author.as_ref().map(|author| author.name.clone()),
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPage {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub paragraphs: Vec<String>,
    pub date: String,
    pub reading_time: String,
    pub author: Option<String>,
    pub published: bool,
}

impl From<&Blog> for BlogPage {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id.clone(),
            title: blog.title.clone(),
            slug: blog.slug.clone(),
            summary: summary(&blog.content),
            paragraphs: paragraphs(&blog.content),
            date: format_long_date(&blog.created_at),
            reading_time: reading_time(&blog.content),
            author: blog.author.as_ref().map(|author| author.name.clone()),
            published: blog.published,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Feature {
    pub name: String,
    pub category: FeatureCategory,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub features: Vec<Feature>,
    /// First few features, for cards.
    pub highlights: Vec<Feature>,
    pub thumbnail: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub date: String,
    pub owner: Option<String>,
}

impl From<&Project> for ProjectCard {
    fn from(project: &Project) -> Self {
        let features: Vec<Feature> = split_features(&project.features)
            .into_iter()
            .map(|name| Feature {
                category: FeatureCategory::classify(&name),
                name,
            })
            .collect();
        let highlights = features.iter().take(HIGHLIGHTED_FEATURES).cloned().collect();

        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            slug: project.slug.clone(),
            description: project.description.clone(),
            features,
            highlights,
            thumbnail: non_blank(project.thumbnail.as_deref()),
            github_url: non_blank(project.github_url.as_deref()),
            live_url: non_blank(project.live_url.as_deref()),
            date: format_month_year(&project.created_at),
            owner: project.owner.as_ref().map(|owner| owner.name.clone()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub enum PublishStatus {
    Published,
    Draft,
}

impl From<bool> for PublishStatus {
    fn from(published: bool) -> Self {
        if published {
            Self::Published
        } else {
            Self::Draft
        }
    }
}

/// One row of the dashboard blog table.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status: PublishStatus,
    pub published: bool,
    pub author: Option<String>,
    pub created: String,
}

impl From<&Blog> for BlogRow {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id.clone(),
            title: blog.title.clone(),
            slug: blog.slug.clone(),
            status: blog.published.into(),
            published: blog.published,
            author: blog.author.as_ref().map(|author| author.name.clone()),
            created: format_long_date(&blog.created_at),
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct BlogTable {
    pub blogs: Vec<BlogRow>,
    pub total: usize,
}

impl From<&[Blog]> for BlogTable {
    fn from(blogs: &[Blog]) -> Self {
        Self {
            blogs: blogs.iter().map(BlogRow::from).collect(),
            total: blogs.len(),
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ProjectGrid {
    pub projects: Vec<ProjectCard>,
    pub total: usize,
}

impl From<&[Project]> for ProjectGrid {
    fn from(projects: &[Project]) -> Self {
        Self {
            projects: projects.iter().map(ProjectCard::from).collect(),
            total: projects.len(),
        }
    }
}

/// Landing view of the dashboard.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct DashboardOverview {
    pub user: Identity,
    pub blogs: usize,
    pub published: usize,
    pub drafts: usize,
    pub projects: usize,
}

impl DashboardOverview {
    #[must_use]
    pub fn new(user: Identity, blogs: &[Blog], projects: &[Project]) -> Self {
        let published = blogs.iter().filter(|blog| blog.published).count();
        Self {
            user,
            blogs: blogs.len(),
            published,
            drafts: blogs.len() - published,
            projects: projects.len(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
