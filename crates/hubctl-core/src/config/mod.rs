mod defaults;
mod state;


pub use state::*;

use crate::error::HubError;
use defaults::*;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the Bot API token.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the path of the state document.
pub const CONFIG_PATH_ENV: &str = "CONFIG_FILE_PATH";

/// Process-level settings, resolved from the command line and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bot_token: String,
    pub config_path: PathBuf,
    pub poll_interval_secs: u64,
    /// Upper bound on concurrently running dispatch tasks.
    pub max_concurrent: usize,
    /// System identity that service scripts run as.
    pub run_as: String,
}

impl Settings {
    /// Build settings with defaults for everything but the two required values.
    pub fn new(bot_token: impl Into<String>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            bot_token: bot_token.into(),
            config_path: config_path.into(),
            poll_interval_secs: default_poll_interval(),
            max_concurrent: default_max_concurrent(),
            run_as: default_run_as(),
        }
    }

    /// Reject settings the bot can not start with.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.bot_token.trim().is_empty() {
            return Err(HubError::Config(format!("{TOKEN_ENV} must be set")));
        }
        if self.config_path.as_os_str().is_empty() {
            return Err(HubError::Config(format!("{CONFIG_PATH_ENV} must be set")));
        }
        if self.poll_interval_secs == 0 {
            return Err(HubError::Config(
                "poll interval must be at least one second".into(),
            ));
        }
        if self.max_concurrent == 0 {
            return Err(HubError::Config(
                "max concurrent dispatches must be at least one".into(),
            ));
        }
        if self.run_as.trim().is_empty() {
            return Err(HubError::Config("run-as identity must not be empty".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
