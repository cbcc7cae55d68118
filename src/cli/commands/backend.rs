use crate::cancapp::{config::DEFAULT_API_BASE_URL, ConsoleConfig};
use clap::{Arg, ArgMatches, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("CancApp API base URL")
                .env("CANCAPP_API_URL")
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Session file path (default: <config dir>/cancapp-admin/session.json)")
                .env("CANCAPP_SESSION_FILE")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("CANCAPP_TIMEOUT")
                .default_value("10")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[derive(Debug, Clone)]
pub struct Options {
    pub api_url: Option<String>,
    pub session_file: Option<String>,
    pub timeout: Option<u64>,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            api_url: matches.get_one::<String>(ARG_API_URL).cloned(),
            session_file: matches.get_one::<String>(ARG_SESSION_FILE).cloned(),
            timeout: matches.get_one::<u64>(ARG_TIMEOUT).copied(),
        }
    }

    #[must_use]
    pub fn into_config(self) -> ConsoleConfig {
        ConsoleConfig::with_overrides(
            self.api_url.as_deref(),
            self.session_file.as_deref(),
            self.timeout,
        )
    }
}
