//! Session endpoints: navigation state, login and logout.

use super::response::ErrorBody;
use crate::{
    api::state::AppState,
    mutation::{FieldErrors, LoginForm, Validate},
    remote::Identity,
    session::{
        cookie::{clear_session_cookie, session_cookie},
        Credential, NavAction, SessionContext,
    },
};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

pub const INVALID_LOGIN: &str = "Invalid email or password";

/// What the navigation bar needs to render the session.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    pub action: NavAction,
}

impl From<&SessionContext> for SessionView {
    fn from(session: &SessionContext) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            user: session.identity().cloned(),
            action: session.nav_action(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginErrors {
    pub message: String,
    pub errors: FieldErrors,
}

#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Current session state", body = SessionView)
    ),
    tag = "session"
)]
pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionView> {
    let mut session = SessionContext::new(
        state.client().clone(),
        Credential::from_headers(&headers),
    );
    session.check().await;
    Json(SessionView::from(&session))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = SessionView),
        (status = 401, description = "Credentials rejected", body = ErrorBody),
        (status = 422, description = "Missing or malformed input", body = LoginErrors)
    ),
    tag = "session"
)]
pub async fn login(State(state): State<AppState>, Json(form): Json<LoginForm>) -> Response {
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            let message = errors
                .get("form")
                .or_else(|| errors.get("email"))
                .unwrap_or("Invalid input")
                .to_string();
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(LoginErrors { message, errors }),
            )
                .into_response();
        }
    };

    let mut session = SessionContext::new(state.client().clone(), None);
    if !session.login(&request.email, &request.password).await {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                message: INVALID_LOGIN.to_string(),
            }),
        )
            .into_response();
    }

    let Some(credential) = session.credential() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    match session_cookie(state.cookies(), credential.expose()) {
        Ok(cookie) => ([(SET_COOKIE, cookie)], Json(SessionView::from(&session))).into_response(),
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 303, description = "Session cleared; redirect home")
    ),
    tag = "session"
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut session = SessionContext::new(
        state.client().clone(),
        Credential::from_headers(&headers),
    );
    let navigation = session.logout().await;

    let mut response = Redirect::to(navigation.path()).into_response();
    match clear_session_cookie(state.cookies()) {
        Ok(cookie) => {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build clearing cookie: {err}"),
    }
    response
}
