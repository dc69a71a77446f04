//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{MeetingError, MeetingResult};

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/meetings/config.toml
///
/// Every key can be overridden with a `MEETINGS_`-prefixed environment
/// variable, e.g. `MEETINGS_SERVER_URL`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Per-request timeout. There are no retries.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub fn config_path() -> MeetingResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MeetingError::Config("Could not determine config directory".into()))?
            .join("meetings");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented-out config
    /// file there first if none exists.
    pub fn load() -> MeetingResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Layer the file at `path` (if present) under `MEETINGS_*` variables.
    pub fn load_from(path: &Path) -> MeetingResult<Self> {
        Self::load_with_env(path, Environment::with_prefix("MEETINGS"))
    }

    fn load_with_env(path: &Path, env: Environment) -> MeetingResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env.try_parsing(true))
            .build()
            .map_err(|e| MeetingError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MeetingError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MeetingResult<()> {
        let contents = format!(
            "\
# meetings client configuration

# Backend serving /api/meetings:
# server_url = \"{}\"

# Seconds to wait for each request:
# timeout_secs = {}
",
            DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MeetingError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MeetingError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
