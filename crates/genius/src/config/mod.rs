//! Client configuration: where the service lives and how long calls may take.
//!
//! Values come from (highest first) explicit overrides, the `GENIUS_BASE_URL`
//! environment variable, a JSON or YAML file, and built-in defaults.

use crate::error::{GeniusError, GeniusResult};
use crate::model::{Endpoints, Timeout};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding [`ClientConfig::base_url`].
pub const BASE_URL_ENV: &str = "GENIUS_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SUBMIT_PATH: &str = "/walker/codebase_genius";
pub const DEFAULT_HISTORY_PATH: &str = "/walker/repositories";
pub const DEFAULT_HEALTH_PATH: &str = "/walker/health";
pub const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_HISTORY_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_HEALTH_TIMEOUT_MS: u64 = 2_000;

/// Command suggested to users when the backend is offline.
pub const BACKEND_START_COMMAND: &str = "cd Backend && jac serve main.jac";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
    pub submit_path: String,
    pub history_path: String,
    pub health_path: String,
    pub submit_timeout_ms: u64,
    pub history_timeout_ms: u64,
    pub health_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            submit_path: DEFAULT_SUBMIT_PATH.to_string(),
            history_path: DEFAULT_HISTORY_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            submit_timeout_ms: DEFAULT_SUBMIT_TIMEOUT_MS,
            history_timeout_ms: DEFAULT_HISTORY_TIMEOUT_MS,
            health_timeout_ms: DEFAULT_HEALTH_TIMEOUT_MS,
        }
    }
}

/// Per-intent call timeouts: long for jobs and listings, short for liveness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallTimeouts {
    pub submit: Timeout,
    pub history: Timeout,
    pub health: Timeout,
}

impl ClientConfig {
    /// Resolve configuration from an optional file, the environment and an
    /// optional base URL override.
    pub fn load(path: Option<&Path>, base_url: Option<&str>) -> GeniusResult<Self> {
        let mut config = match path {
            Some(path) => load_config_file(path)?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        if let Some(url) = base_url {
            config.base_url = url.to_string();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GeniusResult<()> {
        let base = self.base_url.trim();
        let Some(host) = base
            .strip_prefix("https://")
            .or_else(|| base.strip_prefix("http://"))
        else {
            return Err(
                GeniusError::config("base_url must start with http:// or https://")
                    .with_context(serde_json::json!({ "base_url": self.base_url })),
            );
        };
        if host.trim_matches('/').is_empty() {
            return Err(GeniusError::config("base_url is missing a host")
                .with_context(serde_json::json!({ "base_url": self.base_url })));
        }
        self.timeouts().map(|_| ())
    }

    pub fn timeouts(&self) -> GeniusResult<CallTimeouts> {
        Ok(CallTimeouts {
            submit: timeout_field("submit_timeout_ms", self.submit_timeout_ms)?,
            history: timeout_field("history_timeout_ms", self.history_timeout_ms)?,
            health: timeout_field("health_timeout_ms", self.health_timeout_ms)?,
        })
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::from_base(
            self.base_url.trim(),
            &self.submit_path,
            &self.history_path,
            &self.health_path,
        )
    }
}

fn timeout_field(name: &str, ms: u64) -> GeniusResult<Timeout> {
    Timeout::from_millis(ms).map_err(|err| {
        GeniusError::config(format!("{name} must be greater than zero"))
            .with_context(serde_json::json!({ "field": name, "source": err.message }))
    })
}

/// Read a config file; `.yaml`/`.yml` are parsed as YAML, everything else as JSON.
pub fn load_config_file(path: &Path) -> GeniusResult<ClientConfig> {
    let data = fs::read_to_string(path)
        .map_err(|err| GeniusError::io("failed to read config file", err))?;
    let name = path.to_string_lossy();
    if name.ends_with(".yaml") || name.ends_with(".yml") {
        serde_yml::from_str(&data).map_err(|err| {
            GeniusError::config("failed to parse yaml config")
                .with_context(serde_json::json!({ "source": err.to_string() }))
        })
    } else {
        serde_json::from_str(&data).map_err(|err| {
            GeniusError::config("failed to parse json config")
                .with_context(serde_json::json!({ "source": err.to_string() }))
        })
    }
}
