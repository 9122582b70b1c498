//! Session state for one visitor. A [`SessionContext`] is created per request
//! from the browser's `token` cookie, resolves the identity once through the
//! remote API, and is dropped with the request, so no identity outlives the
//! request that checked it. Only identity metadata is held in memory; the token
//! itself stays wrapped in a secret.

pub mod cookie;

use crate::remote::{ApiClient, Identity};
use axum::http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

pub use cookie::{CookieConfig, SESSION_COOKIE_NAME};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where a logout always ends.
pub const HOME_PATH: &str = "/";

/// Opaque session token as issued by the remote API. Never parsed.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Reads the credential from the request cookies, if present.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        cookie::extract_session_token(headers).map(Self::new)
    }

    /// `Cookie` header value used when forwarding the session upstream.
    #[must_use]
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE_NAME}={}", self.0.expose_secret())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Result of an identity check. Network failures collapse into `Unauthenticated`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Authenticated(Identity),
    Unauthenticated,
}

/// Guard decision for a protected route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Granted(Identity),
    Redirect(&'static str),
}

/// Navigation a caller must perform after a session change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Home,
}

impl Navigation {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => HOME_PATH,
        }
    }
}

/// Action offered by the navigation bar for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub enum NavAction {
    Login,
    Logout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SessionState {
    Unknown,
    Authenticated(Identity),
    Unauthenticated,
}

/// Explicit session context: created with the visitor's credential, hydrated by
/// `check`, torn down by `logout`.
#[derive(Debug)]
pub struct SessionContext {
    client: ApiClient,
    credential: Option<Credential>,
    state: SessionState,
}

impl SessionContext {
    #[must_use]
    pub fn new(client: ApiClient, credential: Option<Credential>) -> Self {
        Self {
            client,
            credential,
            state: SessionState::Unknown,
        }
    }

    /// Resolves the identity behind the current credential. Never fails: a
    /// missing credential, a rejected session, and an unreachable API all
    /// yield `Unauthenticated`.
    #[instrument(skip(self))]
    pub async fn check(&mut self) -> CheckOutcome {
        let Some(credential) = self.credential.as_ref() else {
            debug!("no session credential present");
            self.state = SessionState::Unauthenticated;
            return CheckOutcome::Unauthenticated;
        };

        match self.client.me(credential).await {
            Ok(Some(identity)) => {
                debug!("session resolved to user {}", identity.id);
                self.state = SessionState::Authenticated(identity.clone());
                CheckOutcome::Authenticated(identity)
            }
            Ok(None) => {
                debug!("remote API reports no active session");
                self.state = SessionState::Unauthenticated;
                CheckOutcome::Unauthenticated
            }
            Err(err) => {
                warn!("identity check failed, treating as unauthenticated: {err}");
                self.state = SessionState::Unauthenticated;
                CheckOutcome::Unauthenticated
            }
        }
    }

    /// Gate for a protected route: re-checks the session on every call.
    pub async fn require_session(&mut self) -> Access {
        match self.check().await {
            CheckOutcome::Authenticated(identity) => Access::Granted(identity),
            CheckOutcome::Unauthenticated => Access::Redirect(LOGIN_PATH),
        }
    }

    /// Posts credentials; on success stores the new credential and refreshes the
    /// identity. Returns whether the API accepted the login.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &SecretString) -> bool {
        match self.client.login(email, password).await {
            Ok(credential) => {
                self.credential = Some(credential);
                if let CheckOutcome::Unauthenticated = self.check().await {
                    warn!("login accepted but identity check did not resolve a user");
                }
                info!("login accepted");
                true
            }
            Err(err) => {
                debug!("login rejected: {err}");
                false
            }
        }
    }

    /// Best-effort server logout, then unconditional local teardown.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Navigation {
        if let Some(credential) = self.credential.as_ref() {
            if let Err(err) = self.client.logout(credential).await {
                warn!("logout request failed, clearing local session anyway: {err}");
            }
        }

        self.credential = None;
        self.state = SessionState::Unauthenticated;
        Navigation::Home
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Unknown | SessionState::Unauthenticated => None,
        }
    }

    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    #[must_use]
    pub fn nav_action(&self) -> NavAction {
        if self.is_authenticated() {
            NavAction::Logout
        } else {
            NavAction::Login
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> ApiClient {
        ApiClient::new(uri, Duration::from_secs(2)).unwrap()
    }

    fn me_body() -> serde_json::Value {
        json!({
            "success": true,
            "user": { "id": "u1", "name": "Ada", "email": "ada@folio.dev", "role": "ADMIN" }
        })
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("super-secret");
        assert_eq!(format!("{credential:?}"), "Credential(***)");
        assert_eq!(credential.cookie_header(), "token=super-secret");
    }

    #[test]
    fn credential_reads_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("token=abc"));
        let credential = Credential::from_headers(&headers).unwrap();
        assert_eq!(credential.expose(), "abc");
    }

    #[tokio::test]
    async fn check_without_credential_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(me_body()))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = SessionContext::new(client(&server.uri()), None);
        assert_eq!(session.check().await, CheckOutcome::Unauthenticated);
        assert_eq!(session.nav_action(), NavAction::Login);
    }

    #[tokio::test]
    async fn check_forwards_cookie_and_resolves_identity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("cookie", "token=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(me_body()))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = SessionContext::new(client(&server.uri()), Some(Credential::new("abc")));
        let CheckOutcome::Authenticated(identity) = session.check().await else {
            panic!("expected an authenticated session");
        };
        assert_eq!(identity.email, "ada@folio.dev");
        assert_eq!(session.nav_action(), NavAction::Logout);
    }

    #[tokio::test]
    async fn check_treats_unsuccessful_body_as_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": false, "user": null })),
            )
            .mount(&server)
            .await;

        let mut session = SessionContext::new(client(&server.uri()), Some(Credential::new("abc")));
        assert_eq!(session.check().await, CheckOutcome::Unauthenticated);
    }

    #[tokio::test]
    async fn check_treats_network_failure_as_unauthenticated() {
        // Nothing listens on this port once the server is dropped.
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };

        let mut session = SessionContext::new(client(&uri), Some(Credential::new("abc")));
        assert_eq!(session.check().await, CheckOutcome::Unauthenticated);
        assert_eq!(session.require_session().await, Access::Redirect(LOGIN_PATH));
    }

    #[tokio::test]
    async fn require_session_grants_on_valid_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(me_body()))
            .mount(&server)
            .await;

        let mut session = SessionContext::new(client(&server.uri()), Some(Credential::new("abc")));
        let Access::Granted(identity) = session.require_session().await else {
            panic!("expected access");
        };
        assert_eq!(identity.id, "u1");
    }

    #[tokio::test]
    async fn login_with_valid_credentials_shows_logout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "email": "ada@folio.dev", "password": "hunter22" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "token=fresh; Path=/; HttpOnly")
                    .set_body_json(json!({ "success": true })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("cookie", "token=fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(me_body()))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = SessionContext::new(client(&server.uri()), None);
        let ok = session
            .login("ada@folio.dev", &SecretString::from("hunter22".to_string()))
            .await;

        assert!(ok);
        assert_eq!(session.identity().map(|i| i.name.as_str()), Some("Ada"));
        assert_eq!(session.credential().map(Credential::expose), Some("fresh"));
        assert_eq!(session.nav_action(), NavAction::Logout);
    }

    #[tokio::test]
    async fn login_with_invalid_credentials_keeps_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "success": false, "message": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let mut session = SessionContext::new(client(&server.uri()), None);
        let ok = session
            .login("ada@folio.dev", &SecretString::from("wrong".to_string()))
            .await;

        assert!(!ok);
        assert!(session.identity().is_none());
        assert_eq!(session.nav_action(), NavAction::Login);
    }

    #[tokio::test]
    async fn logout_clears_state_even_when_request_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(me_body()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = SessionContext::new(client(&server.uri()), Some(Credential::new("abc")));
        assert!(matches!(
            session.check().await,
            CheckOutcome::Authenticated(_)
        ));

        let navigation = session.logout().await;

        assert_eq!(navigation, Navigation::Home);
        assert_eq!(navigation.path(), "/");
        assert!(session.identity().is_none());
        assert!(session.credential().is_none());
        assert_eq!(session.nav_action(), NavAction::Login);
    }

    #[tokio::test]
    async fn logout_clears_state_when_api_is_unreachable() {
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };

        let mut session = SessionContext::new(client(&uri), Some(Credential::new("abc")));
        assert_eq!(session.logout().await, Navigation::Home);
        assert!(session.credential().is_none());
        assert!(!session.is_authenticated());
    }
}
