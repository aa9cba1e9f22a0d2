use crate::error::{ErrorCode, GeniusError};
use crate::model::ResultRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the service could not be reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityKind {
    /// Connection refused, DNS failure, or host unreachable.
    Unreachable,
    /// No response within the call timeout.
    TimedOut,
    /// Any other transport failure; the message carries the details.
    Unclassified,
}

impl fmt::Display for ConnectivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unreachable => "unreachable",
            Self::TimedOut => "timed out",
            Self::Unclassified => "transport error",
        };
        f.write_str(name)
    }
}

/// Result of one orchestrator call. Exactly one variant per call.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Success(ResultRecord),
    ConnectivityFailure {
        kind: ConnectivityKind,
        message: String,
    },
    ProtocolFailure {
        status: u16,
    },
    DecodeFailure {
        message: String,
    },
    ApplicationFailure {
        message: String,
    },
}

/// Variant tag of an [`Outcome`], without its data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    ConnectivityFailure,
    ProtocolFailure,
    DecodeFailure,
    ApplicationFailure,
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Success,
            Self::ConnectivityFailure { .. } => OutcomeKind::ConnectivityFailure,
            Self::ProtocolFailure { .. } => OutcomeKind::ProtocolFailure,
            Self::DecodeFailure { .. } => OutcomeKind::DecodeFailure,
            Self::ApplicationFailure { .. } => OutcomeKind::ApplicationFailure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn record(&self) -> Option<&ResultRecord> {
        match self {
            Self::Success(record) => Some(record),
            _ => None,
        }
    }

    /// Convert into a `Result` for `?`-style presentation code.
    pub fn into_result(self) -> Result<ResultRecord, GeniusError> {
        match self {
            Self::Success(record) => Ok(record),
            Self::ConnectivityFailure { kind, message } => Err(GeniusError::new(
                ErrorCode::Connectivity,
                format!("cannot reach the documentation service ({kind})"),
            )
            .with_context(serde_json::json!({ "kind": kind, "source": message }))),
            Self::ProtocolFailure { status } => Err(GeniusError::new(
                ErrorCode::Protocol,
                format!("server error: {status}"),
            )
            .with_context(serde_json::json!({ "status": status }))),
            Self::DecodeFailure { message } => Err(GeniusError::new(
                ErrorCode::Decode,
                "invalid response from server",
            )
            .with_context(serde_json::json!({ "source": message }))),
            Self::ApplicationFailure { message } => {
                Err(GeniusError::new(ErrorCode::Application, message))
            }
        }
    }
}

/// Liveness as seen by the health probe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum HealthStatus {
    Online,
    ServerError { status: u16 },
    Offline { kind: ConnectivityKind, message: String },
}

impl HealthStatus {
    /// The call outcome a probe result corresponds to, for observers.
    pub fn outcome_kind(&self) -> OutcomeKind {
        match self {
            Self::Online => OutcomeKind::Success,
            Self::ServerError { .. } => OutcomeKind::ProtocolFailure,
            Self::Offline { .. } => OutcomeKind::ConnectivityFailure,
        }
    }
}

/// Serializable error payload for JSON output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    pub context: Option<serde_json::Value>,
}
