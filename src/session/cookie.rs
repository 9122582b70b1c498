//! Session cookie plumbing. The remote API names its session cookie `token`;
//! the same name is used between the browser and this service so the value can
//! be forwarded unchanged.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};

pub const SESSION_COOKIE_NAME: &str = "token";

/// Attributes of the cookie this service sets on the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieConfig {
    secure: bool,
}

impl CookieConfig {
    #[must_use]
    pub const fn new(secure: bool) -> Self {
        Self { secure }
    }

    #[must_use]
    pub const fn secure(&self) -> bool {
        self.secure
    }
}

/// Build an `HttpOnly` cookie carrying the session token.
///
/// # Errors
/// Returns an error if the token contains bytes that are not valid in a header.
pub fn session_cookie(config: CookieConfig, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax");
    if config.secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Build the cookie that removes the session token from the browser.
///
/// # Errors
/// Returns an error if the header value cannot be built.
pub fn clear_session_cookie(config: CookieConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Read the session token from the request `Cookie` header(s).
#[must_use]
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            let val = val.trim();
            (key.trim() == SESSION_COOKIE_NAME && !val.is_empty()).then(|| val.to_string())
        })
}

/// Read the session token the remote API set with `Set-Cookie` on login.
#[must_use]
pub fn token_from_set_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| {
            // Only the leading name=value pair matters; attributes follow after ';'.
            let pair = value.split(';').next()?;
            let (key, val) = pair.trim().split_once('=')?;
            let val = val.trim();
            (key.trim() == SESSION_COOKIE_NAME && !val.is_empty()).then(|| val.to_string())
        })
}
