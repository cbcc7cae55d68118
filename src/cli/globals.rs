use crate::cancapp::{Console, ConsoleConfig};
use anyhow::{Context, Result};

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: ConsoleConfig,
}

impl GlobalArgs {
    #[must_use]
    pub const fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }

    /// Opens the console against the configured backend and session file.
    ///
    /// # Errors
    /// Returns an error if the API base URL is not a usable http(s) URL.
    pub fn open(&self) -> Result<Console> {
        Console::open(&self.config).with_context(|| {
            format!("failed to open console for {}", self.config.api_base_url)
        })
    }
}
