//! Outbound calls to the documentation service.
//!
//! A [`Transport`] performs exactly one call and never fails with an error:
//! every result, including connection problems, is a [`RawOutcome`].

mod http;

pub use http::HttpTransport;

use crate::model::{ConnectivityKind, Endpoint, Timeout};
use serde_json::{Map, Value};

/// Request body sent to an endpoint. May be empty.
pub type RequestPayload = Map<String, Value>;

/// What came back from a single transport call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawOutcome {
    /// The service answered; nothing about the answer has been checked yet.
    Response { status: u16, body: String },
    /// The call never produced a response.
    Connectivity {
        kind: ConnectivityKind,
        message: String,
    },
}

impl RawOutcome {
    pub fn response(status: u16, body: impl Into<String>) -> Self {
        Self::Response {
            status,
            body: body.into(),
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Connectivity {
            kind: ConnectivityKind::Unreachable,
            message: message.into(),
        }
    }

    pub fn timed_out(message: impl Into<String>) -> Self {
        Self::Connectivity {
            kind: ConnectivityKind::TimedOut,
            message: message.into(),
        }
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::Connectivity {
            kind: ConnectivityKind::Unclassified,
            message: message.into(),
        }
    }
}

/// One synchronous call to an endpoint, bounded by `timeout`.
///
/// Implementations must be safe to share between threads; no retries, no caching.
pub trait Transport: Send + Sync {
    fn send(&self, endpoint: &Endpoint, payload: &RequestPayload, timeout: Timeout) -> RawOutcome;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, endpoint: &Endpoint, payload: &RequestPayload, timeout: Timeout) -> RawOutcome {
        (**self).send(endpoint, payload, timeout)
    }
}
