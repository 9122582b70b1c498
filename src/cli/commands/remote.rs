use clap::{Arg, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_API_TIMEOUT_SECONDS: &str = "api-timeout-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the remote portfolio API, example: https://api.folio.dev")
                .env("FOLIO_API_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_API_TIMEOUT_SECONDS)
                .long("api-timeout-seconds")
                .help("Timeout for each remote API call in seconds")
                .env("FOLIO_API_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
