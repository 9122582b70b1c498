//! Protected dashboard handlers. Every route here sits behind
//! [`crate::api::guard::require_session`] and reads the [`AuthSession`] it inserts.

pub mod blogs;
pub mod projects;

use super::response::{ErrorBody, ReadError};
use crate::{
    api::{guard::AuthSession, state::AppState},
    content::views::DashboardOverview,
};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

/// `?confirm=yes` on destructive and toggle requests.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfirmQuery {
    /// `yes` to proceed; anything else aborts.
    pub confirm: Option<String>,
}

/// Trimmed path id, or `400` before any workflow runs when it is blank.
fn required_id<'a>(id: &'a str, what: &str) -> Result<&'a str, Response> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        let body = ErrorBody {
            message: format!("{what} id is required."),
        };
        return Err((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }
    Ok(trimmed)
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard overview", body = DashboardOverview),
        (status = 303, description = "No valid session; redirect to /login"),
        (status = 502, description = "Remote API unavailable", body = ErrorBody)
    ),
    tag = "dashboard"
)]
pub async fn overview(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> Result<Json<DashboardOverview>, ReadError> {
    let client = state.client();
    let (blogs, projects) = tokio::try_join!(
        client.list_admin_blogs(&auth.credential),
        client.list_projects()
    )?;
    Ok(Json(DashboardOverview::new(auth.identity, &blogs, &projects)))
}
