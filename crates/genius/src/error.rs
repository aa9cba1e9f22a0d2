//! Structured errors with stable codes.
//!
//! Every failure that reaches presentation code is a [`GeniusError`] carrying an
//! [`ErrorCode`]. The code has a stable string form (used in JSON output) and a
//! process exit code (used by the CLI).

use crate::model::ErrorInfo;
use serde_json::Value;
use std::fmt;

pub type GeniusResult<T> = Result<T, GeniusError>;

/// Stable error code for every failure class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Service unreachable, timed out, or failed below the HTTP layer.
    Connectivity,
    /// Service answered with a non-success status code.
    Protocol,
    /// Response body (or a result record) did not have the expected shape.
    Decode,
    /// Service reported an operation error inside a successful response.
    Application,
    /// Invalid client configuration.
    Config,
    /// Invalid command-line input.
    CliInvalidArg,
    /// Local file access failed.
    Io,
}

impl ErrorCode {
    pub const ALL: [Self; 7] = [
        Self::Connectivity,
        Self::Protocol,
        Self::Decode,
        Self::Application,
        Self::Config,
        Self::CliInvalidArg,
        Self::Io,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connectivity => "E_CONNECTIVITY",
            Self::Protocol => "E_PROTOCOL",
            Self::Decode => "E_DECODE",
            Self::Application => "E_APPLICATION",
            Self::Config => "E_CONFIG",
            Self::CliInvalidArg => "E_CLI_INVALID_ARG",
            Self::Io => "E_IO",
        }
    }

    /// Process exit code used by the CLI for this failure class.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Connectivity => 2,
            Self::Protocol => 3,
            Self::Decode => 4,
            Self::Application => 5,
            Self::Config => 6,
            Self::CliInvalidArg => 7,
            Self::Io => 8,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error surfaced to presentation code.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{code}: {message}")]
pub struct GeniusError {
    pub code: ErrorCode,
    pub message: String,
    pub context: Option<Value>,
}

impl GeniusError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, message)
    }

    pub fn cli_invalid_arg(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CliInvalidArg, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Decode, message)
    }

    pub fn io(message: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::Io, message)
            .with_context(serde_json::json!({ "source": err.to_string() }))
    }

    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code.as_str().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
        }
    }
}
