//! Auth endpoints of the remote API. Passwords and tokens are never logged.

use super::{
    error_from_response, handle_json_response, handle_receipt_response, send,
    types::AuthEnvelope, ApiClient, ApiError, Identity,
};
use crate::session::{cookie::token_from_set_cookie, Credential};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::instrument;

const ME: &[&str] = &["api", "auth", "me"];
const LOGIN: &[&str] = &["api", "auth", "login"];
const LOGOUT: &[&str] = &["api", "auth", "logout"];

impl ApiClient {
    /// Resolves the identity behind a session.
    /// Returns `None` when the API answers 204/401 or reports `success: false`.
    ///
    /// # Errors
    /// Returns an error for transport failures and unexpected statuses.
    #[instrument(skip_all)]
    pub async fn me(&self, credential: &Credential) -> Result<Option<Identity>, ApiError> {
        let response = send(self.request(Method::GET, ME, Some(credential))?).await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT || status == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        let envelope: AuthEnvelope = handle_json_response(response).await?;
        Ok(envelope.user.filter(|_| envelope.success))
    }

    /// Posts credentials and returns the session token the API issued, read
    /// from its `Set-Cookie` header or, failing that, a `token` body field.
    ///
    /// # Errors
    /// `ApiError::Unauthorized` for rejected credentials, other variants for
    /// transport failures or a success response without a token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Credential, ApiError> {
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        let response = send(self.request(Method::POST, LOGIN, None)?.json(&body)).await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        if let Some(token) = token_from_set_cookie(response.headers()) {
            return Ok(Credential::new(token));
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        ["token", "accessToken"]
            .iter()
            .find_map(|key| {
                body.get(*key)
                    .or_else(|| body.get("data").and_then(|data| data.get(*key)))
                    .and_then(Value::as_str)
            })
            .filter(|token| !token.is_empty())
            .map(Credential::new)
            .ok_or_else(|| ApiError::Parse("Login response did not include a session".to_string()))
    }

    /// Invalidates the session upstream.
    ///
    /// # Errors
    /// Returns an error if the API cannot be reached or rejects the call.
    #[instrument(skip_all)]
    pub async fn logout(&self, credential: &Credential) -> Result<(), ApiError> {
        let response = send(self.request(Method::POST, LOGOUT, Some(credential))?).await?;
        handle_receipt_response(response).await.map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> ApiClient {
        ApiClient::new(uri, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn me_returns_none_on_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let identity = client(&server.uri())
            .me(&Credential::new("expired"))
            .await
            .unwrap();
        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn me_surfaces_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let result = client(&server.uri()).me(&Credential::new("abc")).await;
        assert_eq!(
            result,
            Err(ApiError::Request {
                status: 503,
                message: Some("maintenance".to_string())
            })
        );
    }

    #[tokio::test]
    async fn login_falls_back_to_body_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "data": { "token": "from-body" } })),
            )
            .mount(&server)
            .await;

        let credential = client(&server.uri())
            .login("ada@folio.dev", &SecretString::from("pw".to_string()))
            .await
            .unwrap();
        assert_eq!(credential.expose(), "from-body");
    }

    #[tokio::test]
    async fn login_without_token_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .login("ada@folio.dev", &SecretString::from("pw".to_string()))
            .await;
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn login_rejection_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .login("ada@folio.dev", &SecretString::from("pw".to_string()))
            .await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn logout_forwards_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .and(header("cookie", "token=abc"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server.uri())
            .logout(&Credential::new("abc"))
            .await
            .unwrap();
    }
}
