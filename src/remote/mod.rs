//! HTTP client for the remote portfolio REST API with consistent timeouts and
//! error mapping. Feature calls (auth, blogs, projects) live in submodules and
//! share the request setup and response handling here. The client never stores
//! session tokens; callers pass a [`Credential`] per call and it is forwarded as
//! the `token` cookie.

mod auth;
mod blogs;
pub mod error;
mod projects;
pub mod types;

pub use error::{ApiError, ErrorKind};
pub use types::{Author, Blog, BlogDraft, Identity, Project, ProjectDraft, Receipt};

use crate::{session::Credential, APP_USER_AGENT};
use reqwest::{header::COOKIE, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use types::Envelope;
use url::Url;

/// Default request timeout applied to every call.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
/// Maximum number of error body characters surfaced to users.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client for an absolute `http(s)` base URL.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::Config(format!("API base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        credential: Option<&Credential>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url.path());

        let mut builder = self.http.request(method, url);
        if let Some(credential) = credential {
            builder = builder.header(COOKIE, credential.cookie_header());
        }
        Ok(builder)
    }

    /// Reads the `data` field of an enveloped JSON response.
    pub(crate) async fn get_data<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        credential: Option<&Credential>,
    ) -> Result<T, ApiError> {
        let response = send(self.request(Method::GET, segments, credential)?).await?;
        let envelope: Envelope<T> = handle_json_response(response).await?;

        match envelope {
            Envelope {
                data: Some(data), ..
            } => Ok(data),
            Envelope {
                success, message, ..
            } => Err(ApiError::Parse(message.unwrap_or_else(|| {
                if success {
                    "Response did not include data".to_string()
                } else {
                    "Request was not successful".to_string()
                }
            }))),
        }
    }

    /// Sends a JSON body to a session-protected endpoint.
    pub(crate) async fn write_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
        credential: &Credential,
    ) -> Result<Receipt, ApiError> {
        let builder = self.request(method, segments, Some(credential))?.json(body);
        handle_receipt_response(send(builder).await?).await
    }

    /// Sends a bodyless request to a session-protected endpoint.
    pub(crate) async fn write_empty(
        &self,
        method: Method,
        segments: &[&str],
        credential: &Credential,
    ) -> Result<Receipt, ApiError> {
        let builder = self.request(method, segments, Some(credential))?;
        handle_receipt_response(send(builder).await?).await
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Config("API base URL is not configured.".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|err| ApiError::Config(format!("Invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        scheme => Err(ApiError::Config(format!(
            "Unsupported API base URL scheme: {scheme}"
        ))),
    }
}

/// Trims an id and rejects it when empty; encoding happens in `endpoint`.
pub(crate) fn resource_id<'a>(id: &'a str, what: &str) -> Result<&'a str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Config(format!("{what} id is required.")));
    }
    Ok(trimmed)
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    builder.send().await.map_err(map_request_error)
}

/// Maps transport errors into `ApiError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        ApiError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(error_from_response(response).await)
    }
}

/// Accepts empty or non-JSON success bodies; the write already happened.
async fn handle_receipt_response(response: Response) -> Result<Receipt, ApiError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let body = response.text().await.unwrap_or_default();
    if body.trim().is_empty() {
        return Ok(Receipt::default());
    }
    Ok(serde_json::from_str::<Receipt>(&body).unwrap_or_default())
}

pub(crate) async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return ApiError::Unauthorized;
    }

    let body = response.text().await.unwrap_or_default();
    ApiError::Request {
        status: status.as_u16(),
        message: error_message(&body),
    }
}

/// Picks the `message` (or `error`) field of a JSON error body; plain-text
/// bodies are trimmed and truncated.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(truncate),
        Err(_) => Some(truncate(trimmed)),
    }
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}
