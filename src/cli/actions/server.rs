use crate::{
    api::{self, AppState},
    remote::ApiClient,
    session::cookie::CookieConfig,
};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub api_url: String,
    pub api_timeout: Duration,
    pub cookie_secure: bool,
    pub confirm_publish: bool,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the remote API URL is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let client = ApiClient::new(&args.api_url, args.api_timeout)
        .with_context(|| format!("Invalid remote API URL: {}", args.api_url))?;

    debug!(
        api_url = %args.api_url,
        cookie_secure = args.cookie_secure,
        confirm_publish = args.confirm_publish,
        "Remote API client ready"
    );

    let state = AppState::new(
        client,
        CookieConfig::new(args.cookie_secure),
        args.confirm_publish,
    );

    api::new(args.port, state).await
}
