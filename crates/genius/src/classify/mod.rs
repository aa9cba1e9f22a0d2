//! Application-level failure detection on normalized records.

use crate::model::{Outcome, ResultRecord};
use serde_json::Value;

/// Field the service uses to report an operation error.
pub const ERROR_FIELD: &str = "error";

/// Turn a record into an outcome. A mapping whose `error` field is a non-empty
/// string is an application failure; everything else is a success.
pub fn classify(record: ResultRecord) -> Outcome {
    match application_error(&record) {
        Some(message) => Outcome::ApplicationFailure { message },
        None => Outcome::Success(record),
    }
}

fn application_error(record: &ResultRecord) -> Option<String> {
    match record.get(ERROR_FIELD)? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        _ => None,
    }
}
