use super::{RawOutcome, RequestPayload, Transport};
use crate::error::{GeniusError, GeniusResult};
use crate::model::{Endpoint, Timeout};
use reqwest::blocking::Client;
use std::error::Error as _;

const USER_AGENT: &str = concat!("genius/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP transport. Requests are `POST`s with a JSON body.
///
/// The underlying client pools connections and is cheap to clone; clones share
/// the pool.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> GeniusResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| {
                GeniusError::config("failed to initialize HTTP client")
                    .with_context(serde_json::json!({ "source": error_chain(&err) }))
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, endpoint: &Endpoint, payload: &RequestPayload, timeout: Timeout) -> RawOutcome {
        let response = match self
            .client
            .post(endpoint.url())
            .json(payload)
            .timeout(timeout.as_duration())
            .send()
        {
            Ok(response) => response,
            Err(err) => return classify_error(&err),
        };
        let status = response.status().as_u16();
        match response.text() {
            Ok(body) => RawOutcome::Response { status, body },
            Err(err) => classify_error(&err),
        }
    }
}

fn classify_error(err: &reqwest::Error) -> RawOutcome {
    let message = error_chain(err);
    if err.is_timeout() {
        RawOutcome::timed_out(message)
    } else if err.is_connect() {
        RawOutcome::unreachable(message)
    } else {
        RawOutcome::unclassified(message)
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
