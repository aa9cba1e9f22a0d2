//! The orchestrator: the one entry point presentation code calls.
//!
//! [`GeniusClient::call`] runs transport, decoder, normalizer and classifier in
//! order and stops at the first failure. It never returns an error and never
//! panics; every failure is an [`Outcome`] variant.

mod observer;

#[cfg(test)]
pub use observer::CollectingObserver;
pub use observer::{CallEvent, CallObserver, NoopObserver};

use crate::classify::classify;
use crate::config::{CallTimeouts, ClientConfig};
use crate::decoder::{decode, DecodeError};
use crate::envelope::{is_enveloped, normalize};
use crate::error::GeniusResult;
use crate::model::{
    CallId, Endpoint, Endpoints, HealthStatus, History, Outcome, OutcomeKind, SubmissionReport,
    Timeout, SUCCESS_STATUS,
};
use crate::transport::{HttpTransport, RawOutcome, RequestPayload, Transport};
use std::sync::Arc;
use std::time::Instant;

/// Request field carrying the repository URL on submission.
pub const REPO_URL_FIELD: &str = "repo_url";

/// Client for the documentation service.
///
/// Holds no per-call state, so one client can serve concurrent callers.
pub struct GeniusClient<T = HttpTransport> {
    transport: T,
    endpoints: Endpoints,
    timeouts: CallTimeouts,
    observer: Arc<dyn CallObserver>,
}

impl GeniusClient<HttpTransport> {
    /// Build an HTTP client from validated configuration.
    pub fn from_config(config: &ClientConfig) -> GeniusResult<Self> {
        config.validate()?;
        let timeouts = config.timeouts()?;
        Ok(Self::with_transport(
            HttpTransport::new()?,
            config.endpoints(),
            timeouts,
        ))
    }
}

impl<T: Transport> GeniusClient<T> {
    pub fn with_transport(transport: T, endpoints: Endpoints, timeouts: CallTimeouts) -> Self {
        Self {
            transport,
            endpoints,
            timeouts,
            observer: Arc::new(NoopObserver),
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn CallObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn timeouts(&self) -> &CallTimeouts {
        &self.timeouts
    }

    /// Run one call through the whole pipeline. An absent payload is sent as `{}`.
    pub fn call(
        &self,
        endpoint: &Endpoint,
        payload: Option<&RequestPayload>,
        timeout: Timeout,
    ) -> Outcome {
        let call_id = CallId::new();
        let span = tracing::debug_span!("call", %call_id, endpoint = %endpoint.kind());
        let _entered = span.enter();
        let started = Instant::now();

        let outcome = self.run_pipeline(call_id, endpoint, payload, timeout);

        let duration_ms = elapsed_ms(started);
        match &outcome {
            Outcome::Success(_) => tracing::debug!(duration_ms, "call succeeded"),
            Outcome::ConnectivityFailure { kind, message } => {
                tracing::warn!(%kind, %message, duration_ms, "service unreachable");
            }
            Outcome::ProtocolFailure { status } => {
                tracing::warn!(status, duration_ms, "service returned an error status");
            }
            Outcome::DecodeFailure { message } => {
                tracing::warn!(%message, duration_ms, "response body is not valid JSON");
            }
            Outcome::ApplicationFailure { message } => {
                tracing::warn!(%message, duration_ms, "service reported an error");
            }
        }
        self.finish(call_id, outcome.kind(), duration_ms);
        outcome
    }

    fn finish(&self, call_id: CallId, outcome: OutcomeKind, duration_ms: u64) {
        self.observer.on_event(&CallEvent::Finished {
            call_id,
            outcome,
            duration_ms,
        });
    }

    fn run_pipeline(
        &self,
        call_id: CallId,
        endpoint: &Endpoint,
        payload: Option<&RequestPayload>,
        timeout: Timeout,
    ) -> Outcome {
        let empty = RequestPayload::new();
        let payload = payload.unwrap_or(&empty);

        tracing::debug!(url = endpoint.url(), timeout_ms = timeout.as_millis(), "sending request");
        self.observer.on_event(&CallEvent::Sent {
            call_id,
            endpoint: endpoint.kind(),
        });
        let (status, body) = match self.transport.send(endpoint, payload, timeout) {
            RawOutcome::Response { status, body } => (status, body),
            RawOutcome::Connectivity { kind, message } => {
                return Outcome::ConnectivityFailure { kind, message };
            }
        };

        tracing::debug!(status, body_bytes = body.len(), "response received");
        self.observer
            .on_event(&CallEvent::Received { call_id, status });
        let decoded = match decode(status, &body) {
            Ok(decoded) => decoded,
            Err(DecodeError::Status(status)) => return Outcome::ProtocolFailure { status },
            Err(DecodeError::Body(message)) => return Outcome::DecodeFailure { message },
        };
        self.observer.on_event(&CallEvent::Decoded { call_id });

        let unwrapped = is_enveloped(&decoded);
        let record = normalize(decoded);
        tracing::debug!(unwrapped, "payload normalized");
        self.observer
            .on_event(&CallEvent::Normalized { call_id, unwrapped });

        classify(record)
    }

    /// Submit a repository for documentation generation.
    pub fn submit_repository(&self, repo_url: &str) -> Outcome {
        let mut payload = RequestPayload::new();
        payload.insert(REPO_URL_FIELD.to_string(), repo_url.into());
        self.call(&self.endpoints.submit_job, Some(&payload), self.timeouts.submit)
    }

    /// Submit a repository and read the result as a [`SubmissionReport`].
    pub fn submit_report(&self, repo_url: &str) -> GeniusResult<SubmissionReport> {
        let record = self.submit_repository(repo_url).into_result()?;
        SubmissionReport::from_record(&record)
    }

    /// Fetch the repository history.
    pub fn list_history(&self) -> Outcome {
        self.call(&self.endpoints.list_history, None, self.timeouts.history)
    }

    /// Fetch the repository history as a typed [`History`].
    pub fn history(&self) -> GeniusResult<History> {
        let record = self.list_history().into_result()?;
        Ok(History::from_record(&record))
    }

    /// Probe the service. Only reachability and the status code matter; the body
    /// is ignored, so observers see `Sent`, `Received` and `Finished` but never
    /// `Decoded` or `Normalized`.
    pub fn check_health(&self) -> HealthStatus {
        let call_id = CallId::new();
        let endpoint = &self.endpoints.health_check;
        let span = tracing::debug_span!("call", %call_id, endpoint = %endpoint.kind());
        let _entered = span.enter();
        let started = Instant::now();

        self.observer.on_event(&CallEvent::Sent {
            call_id,
            endpoint: endpoint.kind(),
        });
        let empty = RequestPayload::new();
        let status = match self.transport.send(endpoint, &empty, self.timeouts.health) {
            RawOutcome::Response { status, .. } => {
                self.observer
                    .on_event(&CallEvent::Received { call_id, status });
                if status == SUCCESS_STATUS {
                    HealthStatus::Online
                } else {
                    HealthStatus::ServerError { status }
                }
            }
            RawOutcome::Connectivity { kind, message } => HealthStatus::Offline { kind, message },
        };

        let duration_ms = elapsed_ms(started);
        tracing::debug!(?status, duration_ms, "health probe finished");
        self.finish(call_id, status.outcome_kind(), duration_ms);
        status
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
