//! Field validation for dashboard and login forms. Runs before any network
//! call; a failing form never reaches the remote API.

use crate::remote::{BlogDraft, ProjectDraft};
use regex::Regex;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;
use utoipa::ToSchema;

pub const MIN_BLOG_CONTENT_CHARS: usize = 50;
pub const MIN_PROJECT_DESCRIPTION_CHARS: usize = 20;
pub const MIN_PROJECT_FEATURES: usize = 2;

/// Per-field error messages, keyed by the form's field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Ok when no field failed.
    ///
    /// # Errors
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A form that turns into a request payload once its fields pass.
pub trait Validate {
    type Output;

    /// # Errors
    /// Returns every failing field with its message.
    fn validate(&self) -> Result<Self::Output, FieldErrors>;
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct BlogForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published: bool,
}

impl Validate for BlogForm {
    type Output = BlogDraft;

    fn validate(&self) -> Result<BlogDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required");
        }
        if let Some(message) = min_length("Content", &self.content, MIN_BLOG_CONTENT_CHARS) {
            errors.insert("content", message);
        }

        errors.into_result(BlogDraft {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            published: self.published,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Comma-separated list; sent to the API exactly as typed.
    #[serde(default)]
    pub features: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub live_url: String,
}

impl Validate for ProjectForm {
    type Output = ProjectDraft;

    fn validate(&self) -> Result<ProjectDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required");
        }
        if let Some(message) = min_length(
            "Description",
            &self.description,
            MIN_PROJECT_DESCRIPTION_CHARS,
        ) {
            errors.insert("description", message);
        }

        if self.features.trim().is_empty() {
            errors.insert("features", "Features are required");
        } else if feature_count(&self.features) < MIN_PROJECT_FEATURES {
            errors.insert("features", "Please add at least 2 features (comma separated)");
        }

        if self.thumbnail.trim().is_empty() {
            errors.insert("thumbnail", "Thumbnail URL is required");
        } else if !valid_url(&self.thumbnail) {
            errors.insert("thumbnail", "Enter a valid URL");
        }
        for (field, value) in [("githubUrl", &self.github_url), ("liveUrl", &self.live_url)] {
            if !value.trim().is_empty() && !valid_url(value) {
                errors.insert(field, "Enter a valid URL");
            }
        }

        errors.into_result(ProjectDraft {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            features: self.features.clone(),
            thumbnail: self.thumbnail.trim().to_string(),
            github_url: self.github_url.trim().to_string(),
            live_url: self.live_url.trim().to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login input that passed validation.
#[derive(Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

impl Validate for LoginForm {
    type Output = LoginRequest;

    fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            errors.insert("form", "Email and password are required.");
        } else if !valid_email(email) {
            errors.insert("email", "Enter a valid email address");
        }

        errors.into_result(LoginRequest {
            email: email.to_string(),
            password: SecretString::from(self.password.clone()),
        })
    }
}

/// `None` when `value` is long enough; otherwise the message naming the deficit.
fn min_length(label: &str, value: &str, min: usize) -> Option<String> {
    let len = value.trim().chars().count();
    if len == 0 {
        Some(format!("{label} is required"))
    } else if len < min {
        Some(format!(
            "{label} should be at least {min} characters long ({} more characters needed)",
            min - len
        ))
    } else {
        None
    }
}

#[must_use]
pub fn feature_count(features: &str) -> usize {
    features
        .split(',')
        .filter(|feature| !feature.trim().is_empty())
        .count()
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

#[must_use]
pub fn valid_url(value: &str) -> bool {
    Url::parse(value.trim())
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
}
