//! Test fixtures for the genius client.
//!
//! Provides a [`ScriptedTransport`] that replays canned transport outcomes and
//! records every request it sees, plus builders for the response bodies the
//! documentation service produces.

pub mod builders;

pub use builders::*;

use genius::config::ClientConfig;
use genius::model::{Endpoint, EndpointKind, Timeout};
use genius::transport::{RawOutcome, RequestPayload, Transport};
use genius::GeniusClient;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One request observed by a [`ScriptedTransport`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub kind: EndpointKind,
    pub url: String,
    pub payload: RequestPayload,
    pub timeout: Timeout,
}

/// Transport that answers from a script instead of the network.
///
/// Outcomes are returned in order; once the script runs out, the last outcome
/// repeats. An empty script answers as an unreachable service.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<RawOutcome>>,
    last: Mutex<Option<RawOutcome>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = RawOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Transport that always answers with `outcome`.
    #[must_use]
    pub fn always(outcome: RawOutcome) -> Self {
        Self::new([outcome])
    }

    /// Requests seen so far, oldest first.
    ///
    /// # Panics
    /// Panics if the request log mutex is poisoned.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("request log mutex poisoned")
            .clone()
    }
}

impl Transport for ScriptedTransport {
    #[allow(clippy::expect_used)]
    fn send(&self, endpoint: &Endpoint, payload: &RequestPayload, timeout: Timeout) -> RawOutcome {
        self.requests
            .lock()
            .expect("request log mutex poisoned")
            .push(RecordedRequest {
                kind: endpoint.kind(),
                url: endpoint.url().to_string(),
                payload: payload.clone(),
                timeout,
            });
        let next = self.script.lock().expect("script mutex poisoned").pop_front();
        let mut last = self.last.lock().expect("script mutex poisoned");
        match next {
            Some(outcome) => {
                *last = Some(outcome.clone());
                outcome
            }
            None => last
                .clone()
                .unwrap_or_else(|| RawOutcome::unreachable("script exhausted")),
        }
    }
}

/// Client over `transport` with the default endpoints and timeouts.
///
/// # Panics
/// Panics if the default configuration is invalid.
#[allow(clippy::expect_used)]
#[must_use]
pub fn scripted_client(transport: ScriptedTransport) -> GeniusClient<ScriptedTransport> {
    let config = ClientConfig::default();
    let timeouts = config.timeouts().expect("default timeouts are positive");
    GeniusClient::with_transport(transport, config.endpoints(), timeouts)
}
