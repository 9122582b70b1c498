pub mod logging;
pub mod remote;
pub mod session;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("folio")
        .about("Portfolio site with a session-guarded dashboard")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("FOLIO_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = remote::with_args(command);
    let command = session::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use self::{
        logging::{ARG_LOG_FORMAT, ARG_VERBOSITY},
        remote::{ARG_API_TIMEOUT_SECONDS, ARG_API_URL},
        session::{ARG_CONFIRM_PUBLISH, ARG_COOKIE_SECURE},
    };

    const ENV: [(&str, Option<&str>); 7] = [
        ("FOLIO_PORT", None),
        ("FOLIO_API_URL", None),
        ("FOLIO_API_TIMEOUT_SECONDS", None),
        ("FOLIO_COOKIE_SECURE", None),
        ("FOLIO_CONFIRM_PUBLISH", None),
        ("FOLIO_LOG_FORMAT", None),
        ("FOLIO_LOG_LEVEL", None),
    ];

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "folio");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Portfolio site with a session-guarded dashboard".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(ENV, || {
            let matches =
                new().get_matches_from(vec!["folio", "--api-url", "https://api.folio.dev"]);

            assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
            assert_eq!(
                matches.get_one::<u64>(ARG_API_TIMEOUT_SECONDS).copied(),
                Some(10)
            );
            assert_eq!(matches.get_one::<bool>(ARG_COOKIE_SECURE).copied(), Some(false));
            assert_eq!(matches.get_one::<bool>(ARG_CONFIRM_PUBLISH).copied(), Some(true));
            assert_eq!(
                matches.get_one::<String>(ARG_LOG_FORMAT).cloned(),
                Some("pretty".to_string())
            );
            assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(0));
        });
    }

    #[test]
    fn test_api_url_is_required() {
        temp_env::with_vars(ENV, || {
            let result = new().try_get_matches_from(vec!["folio"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("FOLIO_PORT", Some("443")),
                ("FOLIO_API_URL", Some("https://api.folio.dev")),
                ("FOLIO_API_TIMEOUT_SECONDS", Some("3")),
                ("FOLIO_COOKIE_SECURE", Some("true")),
                ("FOLIO_CONFIRM_PUBLISH", Some("no")),
                ("FOLIO_LOG_FORMAT", Some("json")),
                ("FOLIO_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["folio"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).cloned(),
                    Some("https://api.folio.dev".to_string())
                );
                assert_eq!(
                    matches.get_one::<u64>(ARG_API_TIMEOUT_SECONDS).copied(),
                    Some(3)
                );
                assert_eq!(matches.get_one::<bool>(ARG_COOKIE_SECURE).copied(), Some(true));
                assert_eq!(
                    matches.get_one::<bool>(ARG_CONFIRM_PUBLISH).copied(),
                    Some(false)
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_LOG_FORMAT).cloned(),
                    Some("json".to_string())
                );
                assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("FOLIO_LOG_LEVEL", Some(level)),
                    ("FOLIO_API_URL", Some("https://api.folio.dev")),
                ],
                || {
                    let matches = new().get_matches_from(vec!["folio"]);
                    assert_eq!(
                        matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                        Some(u8::try_from(index).unwrap())
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5 {
            temp_env::with_vars([("FOLIO_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "folio".to_string(),
                    "--api-url".to_string(),
                    "https://api.folio.dev".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);
                assert_eq!(
                    matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                    Some(u8::try_from(index).unwrap())
                );
            });
        }
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        temp_env::with_vars(ENV, || {
            let result = new().try_get_matches_from(vec![
                "folio",
                "--api-url",
                "https://api.folio.dev",
                "--log-format",
                "xml",
            ]);
            assert!(result.is_err());
        });
    }
}
