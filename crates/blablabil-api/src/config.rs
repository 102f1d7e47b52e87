//! API endpoint configuration.
//!
//! Priority: `BLABLABIL_API_URL` / `BLABLABIL_API_TIMEOUT_SECS` environment
//! variables, then `~/.config/blablabil/config.toml`, then built-in
//! defaults.

use std::env;
use std::path::Path;
use std::time::Duration;

use blablabil_core::Result;
use blablabil_infrastructure::paths::BlablabilPaths;
use serde::Deserialize;

/// Default backend endpoint for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const ENV_BASE_URL: &str = "BLABLABIL_API_URL";
const ENV_TIMEOUT_SECS: &str = "BLABLABIL_API_TIMEOUT_SECS";

/// Resolved endpoint settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the default config file location.
    ///
    /// A missing file is not an error. Environment variables override
    /// file values; built-in defaults cover whatever is left. An
    /// unreadable or malformed file is an error, so a typo does not
    /// silently send traffic elsewhere.
    pub fn load() -> Result<Self> {
        match BlablabilPaths::config_file() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(Self::from_env_or_default()),
        }
    }

    /// Loads configuration from a specific file path (for testing).
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::default();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let file: ConfigFile = toml::from_str(&content)?;
            let section = file.api.unwrap_or_default();
            if let Some(base_url) = section.base_url {
                config.base_url = base_url;
            }
            if let Some(secs) = section.timeout_secs {
                config.timeout = Duration::from_secs(secs);
            }
        }

        config.apply_env();
        Ok(config)
    }

    /// Builds a config pointed at the given endpoint with the default
    /// timeout. Mostly useful in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    fn from_env_or_default() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        // A set-but-empty variable counts as unset.
        if let Some(base_url) = env::var(ENV_BASE_URL).ok().filter(|value| !value.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(timeout) = env::var(ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
        {
            self.timeout = Duration::from_secs(timeout);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api: Option<ApiSection>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}
