use crate::error::{GeniusError, GeniusResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// What a call to an endpoint means to the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    /// Submit a repository for documentation generation.
    SubmitJob,
    /// List previously processed repositories.
    ListHistory,
    /// Liveness probe.
    HealthCheck,
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SubmitJob => "submit_job",
            Self::ListHistory => "list_history",
            Self::HealthCheck => "health_check",
        };
        f.write_str(name)
    }
}

/// A service URL together with its meaning. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    kind: EndpointKind,
    url: String,
}

impl Endpoint {
    pub fn new(kind: EndpointKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }

    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The three endpoints of the documentation service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub submit_job: Endpoint,
    pub list_history: Endpoint,
    pub health_check: Endpoint,
}

impl Endpoints {
    /// Join `base_url` with the three endpoint paths.
    pub fn from_base(base_url: &str, submit_path: &str, history_path: &str, health_path: &str) -> Self {
        Self {
            submit_job: Endpoint::new(EndpointKind::SubmitJob, join_url(base_url, submit_path)),
            list_history: Endpoint::new(EndpointKind::ListHistory, join_url(base_url, history_path)),
            health_check: Endpoint::new(EndpointKind::HealthCheck, join_url(base_url, health_path)),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Per-call timeout. Always strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timeout(Duration);

impl Timeout {
    pub fn new(duration: Duration) -> GeniusResult<Self> {
        if duration.is_zero() {
            return Err(GeniusError::config("timeout must be a positive duration"));
        }
        Ok(Self(duration))
    }

    pub fn from_millis(ms: u64) -> GeniusResult<Self> {
        Self::new(Duration::from_millis(ms))
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }

    pub fn as_millis(self) -> u64 {
        u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)
    }
}
