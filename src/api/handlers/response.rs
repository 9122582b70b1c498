//! Mapping of remote errors and mutation reports onto HTTP responses.

use crate::{
    mutation::{FieldErrors, Intent, Outcome, Phase, Report},
    remote::{ApiError, ErrorKind},
    session::LOGIN_PATH,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

/// Failed read against the remote API.
#[derive(Debug)]
pub struct ReadError(pub ApiError);

impl From<ApiError> for ReadError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ReadError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.kind() == ErrorKind::Auth {
            return Redirect::to(LOGIN_PATH).into_response();
        }

        let status = upstream_status(&err);
        if status.is_server_error() {
            error!("remote read failed: {err}");
        }
        let message = err.server_message().map_or_else(
            || {
                if let ApiError::Config(message) = &err {
                    message.clone()
                } else if err.is_not_found() {
                    "Not found".to_string()
                } else {
                    "Unable to load content. Please try again.".to_string()
                }
            },
            str::to_string,
        );
        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Upstream client errors pass through; requests rejected locally are a bad
/// request; everything else is a bad gateway.
fn upstream_status(err: &ApiError) -> StatusCode {
    if err.kind() == ErrorKind::Local {
        return StatusCode::BAD_REQUEST;
    }
    err.status()
        .and_then(|status| StatusCode::from_u16(status).ok())
        .filter(StatusCode::is_client_error)
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeLabel {
    Succeeded,
    Failed,
    Invalid,
    Aborted,
    Busy,
}

/// Body of every dashboard mutation response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse<V> {
    pub outcome: OutcomeLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    pub phases: Vec<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<V>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_error: Option<String>,
}

impl<V> MutationResponse<V> {
    fn new(outcome: OutcomeLabel, phases: Vec<Phase>) -> Self {
        Self {
            outcome,
            message: None,
            errors: None,
            intent: None,
            phases,
            data: None,
            refresh_error: None,
        }
    }
}

pub const CONFIRMATION_REQUIRED: &str = "Confirmation required";
pub const BUSY: &str = "Another change to this item is still in progress";

/// Turns a workflow report into a response. A session rejected by the API
/// mid-mutation redirects to the login page.
pub fn mutation_response<V: Serialize>(report: Report<V>) -> Response {
    let Report { outcome, trace } = report;

    match outcome {
        Outcome::Succeeded {
            message,
            view,
            refresh_error,
        } => {
            let mut body = MutationResponse::new(OutcomeLabel::Succeeded, trace);
            body.message = Some(message);
            body.data = view;
            body.refresh_error = refresh_error.map(|err| err.to_string());
            (StatusCode::OK, Json(body)).into_response()
        }
        Outcome::Failed { error, message } => {
            if error.kind() == ErrorKind::Auth {
                return Redirect::to(LOGIN_PATH).into_response();
            }
            let mut body = MutationResponse::<V>::new(OutcomeLabel::Failed, trace);
            body.message = Some(message);
            (upstream_status(&error), Json(body)).into_response()
        }
        Outcome::Invalid(errors) => {
            let mut body = MutationResponse::<V>::new(OutcomeLabel::Invalid, trace);
            body.errors = Some(errors);
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
        Outcome::Aborted(intent) => {
            let mut body = MutationResponse::<V>::new(OutcomeLabel::Aborted, trace);
            body.message = Some(CONFIRMATION_REQUIRED.to_string());
            body.intent = Some(intent);
            (StatusCode::PRECONDITION_REQUIRED, Json(body)).into_response()
        }
        Outcome::Busy => {
            let mut body = MutationResponse::<V>::new(OutcomeLabel::Busy, trace);
            body.message = Some(BUSY.to_string());
            (StatusCode::CONFLICT, Json(body)).into_response()
        }
    }
}
