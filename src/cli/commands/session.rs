use clap::{builder::BoolishValueParser, Arg, Command};

pub const ARG_COOKIE_SECURE: &str = "cookie-secure";
pub const ARG_CONFIRM_PUBLISH: &str = "confirm-publish";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_COOKIE_SECURE)
                .long("cookie-secure")
                .help("Mark the session cookie Secure (serve over HTTPS)")
                .env("FOLIO_COOKIE_SECURE")
                .default_value("false")
                .value_parser(BoolishValueParser::new()),
        )
        .arg(
            Arg::new(ARG_CONFIRM_PUBLISH)
                .long("confirm-publish")
                .help("Require ?confirm=yes on publish toggles")
                .env("FOLIO_CONFIRM_PUBLISH")
                .default_value("true")
                .value_parser(BoolishValueParser::new()),
        )
}
