//! Map validated CLI arguments to the action to run.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{remote, session};
use anyhow::{Context, Result};
use std::time::Duration;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let api_url = matches
        .get_one::<String>(remote::ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;

    let api_timeout = matches
        .get_one::<u64>(remote::ARG_API_TIMEOUT_SECONDS)
        .copied()
        .map_or(Duration::from_secs(10), Duration::from_secs);

    let cookie_secure = matches
        .get_one::<bool>(session::ARG_COOKIE_SECURE)
        .copied()
        .unwrap_or(false);

    let confirm_publish = matches
        .get_one::<bool>(session::ARG_CONFIRM_PUBLISH)
        .copied()
        .unwrap_or(true);

    Ok(Action::Server(Args {
        port,
        api_url,
        api_timeout,
        cookie_secure,
        confirm_publish,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_args_from_env() {
        temp_env::with_vars(
            [
                ("FOLIO_PORT", Some("9000")),
                ("FOLIO_API_URL", Some("https://api.folio.dev")),
                ("FOLIO_API_TIMEOUT_SECONDS", Some("5")),
                ("FOLIO_COOKIE_SECURE", Some("yes")),
                ("FOLIO_CONFIRM_PUBLISH", Some("false")),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec!["folio"]);
                let result = handler(&matches);
                assert!(result.is_ok());
                if let Ok(Action::Server(args)) = result {
                    assert_eq!(args.port, 9000);
                    assert_eq!(args.api_url, "https://api.folio.dev");
                    assert_eq!(args.api_timeout, Duration::from_secs(5));
                    assert!(args.cookie_secure);
                    assert!(!args.confirm_publish);
                }
            },
        );
    }

    #[test]
    fn server_args_defaults() {
        temp_env::with_vars(
            [
                ("FOLIO_PORT", None::<&str>),
                ("FOLIO_API_URL", None),
                ("FOLIO_API_TIMEOUT_SECONDS", None),
                ("FOLIO_COOKIE_SECURE", None),
                ("FOLIO_CONFIRM_PUBLISH", None),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec![
                    "folio",
                    "--api-url",
                    "http://localhost:5000",
                ]);
                let result = handler(&matches);
                assert!(result.is_ok());
                if let Ok(Action::Server(args)) = result {
                    assert_eq!(args.port, 8080);
                    assert_eq!(args.api_timeout, Duration::from_secs(10));
                    assert!(!args.cookie_secure);
                    assert!(args.confirm_publish);
                }
            },
        );
    }

    #[test]
    fn api_url_required() {
        temp_env::with_vars([("FOLIO_API_URL", None::<&str>)], || {
            let command = crate::cli::commands::new();
            let result = command.try_get_matches_from(vec!["folio"]);
            assert!(result.is_err());
        });
    }
}
