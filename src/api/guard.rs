//! Route-level session guard for the dashboard subtree.

use super::state::AppState;
use crate::{
    remote::Identity,
    session::{Access, Credential, SessionContext, LOGIN_PATH},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

pub const PROTECTED_PREFIX: &str = "/dashboard";

/// Identity and credential of a request that passed the guard. Protected
/// handlers extract it with `Extension<AuthSession>`.
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub identity: Identity,
    pub credential: Credential,
}

/// `/dashboard` and everything below it; `/dashboards` is not protected.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    path.strip_prefix(PROTECTED_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Re-validates the session on every protected request before any handler
/// runs. Unauthenticated requests get `303 See Other` to the login page.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if !is_protected(request.uri().path()) {
        return next.run(request).await;
    }

    let credential = Credential::from_headers(request.headers());
    let mut session = SessionContext::new(state.client().clone(), credential);

    match session.require_session().await {
        Access::Granted(identity) => match session.credential().cloned() {
            Some(credential) => {
                request.extensions_mut().insert(AuthSession {
                    identity,
                    credential,
                });
                next.run(request).await
            }
            None => Redirect::to(LOGIN_PATH).into_response(),
        },
        Access::Redirect(path) => {
            debug!("redirecting {} to {path}", request.uri().path());
            Redirect::to(path).into_response()
        }
    }
}
