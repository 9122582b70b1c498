//! Public read models: published blogs and projects.

use super::response::{ErrorBody, ReadError};
use crate::{
    api::state::AppState,
    content::views::{BlogCard, BlogPage, ProjectCard, ProjectGrid},
    remote::ApiError,
};
use axum::{
    extract::{Path, State},
    response::Json,
};

#[utoipa::path(
    get,
    path = "/blogs",
    responses(
        (status = 200, description = "Published blogs", body = [BlogCard]),
        (status = 502, description = "Remote API unavailable", body = ErrorBody)
    ),
    tag = "content"
)]
pub async fn blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogCard>>, ReadError> {
    let blogs = state.client().list_published_blogs().await?;
    Ok(Json(
        blogs
            .iter()
            .filter(|blog| blog.published)
            .map(BlogCard::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/blogs/{slug}",
    params(("slug" = String, Path, description = "Blog slug or id")),
    responses(
        (status = 200, description = "One published blog", body = BlogPage),
        (status = 404, description = "No such published blog", body = ErrorBody)
    ),
    tag = "content"
)]
pub async fn blog(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPage>, ReadError> {
    let blog = state.client().get_blog(&slug, None).await?;
    if !blog.published {
        return Err(not_found("Blog not found"));
    }
    Ok(Json(BlogPage::from(&blog)))
}

#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "All projects", body = ProjectGrid),
        (status = 502, description = "Remote API unavailable", body = ErrorBody)
    ),
    tag = "content"
)]
pub async fn projects(State(state): State<AppState>) -> Result<Json<ProjectGrid>, ReadError> {
    let projects = state.client().list_projects().await?;
    Ok(Json(ProjectGrid::from(&projects[..])))
}

#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "One project", body = ProjectCard),
        (status = 404, description = "No such project", body = ErrorBody)
    ),
    tag = "content"
)]
pub async fn project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectCard>, ReadError> {
    let project = state.client().get_project(&id).await?;
    Ok(Json(ProjectCard::from(&project)))
}

fn not_found(message: &str) -> ReadError {
    ReadError(ApiError::Request {
        status: 404,
        message: Some(message.to_string()),
    })
}
