//! Envelope normalization.
//!
//! The service usually wraps its real output in a `reports` list:
//!
//! ```text
//! {"reports": [{"repository": "r1", "status": "success"}]}
//! ```
//!
//! but not always (health pings, bare lists), and the list may be empty when a
//! call has nothing to report. [`normalize`] resolves all of these to a single
//! [`ResultRecord`].

use crate::model::{Payload, ResultRecord};
use serde_json::{Map, Value};

/// Field the service wraps its results in.
pub const REPORTS_FIELD: &str = "reports";

/// Resolve a decoded payload to its result record.
///
/// 1. Non-mappings are returned unchanged.
/// 2. A mapping whose `reports` field is a non-empty list resolves to the first
///    entry, provided that entry is itself a mapping or a list.
/// 3. Every other mapping is its own record.
///
/// Entries after the first are dropped.
pub fn normalize(payload: Payload) -> ResultRecord {
    match payload {
        Payload::Mapping(map) => match take_first_report(&map) {
            Some(report) => ResultRecord::new(report),
            None => ResultRecord::new(Payload::Mapping(map)),
        },
        other @ (Payload::Sequence(_) | Payload::Scalar(_)) => ResultRecord::new(other),
    }
}

/// Whether [`normalize`] would unwrap this payload.
pub fn is_enveloped(payload: &Payload) -> bool {
    payload
        .as_mapping()
        .is_some_and(|map| first_report(map).is_some())
}

fn first_report(map: &Map<String, Value>) -> Option<&Value> {
    let first = map.get(REPORTS_FIELD)?.as_array()?.first()?;
    (first.is_object() || first.is_array()).then_some(first)
}

fn take_first_report(map: &Map<String, Value>) -> Option<Payload> {
    let first = first_report(map)?;
    let dropped = map
        .get(REPORTS_FIELD)
        .and_then(Value::as_array)
        .map_or(0, |reports| reports.len().saturating_sub(1));
    if dropped > 0 {
        tracing::warn!(dropped, "envelope carried extra reports; only the first is used");
    }
    Some(Payload::from(first.clone()))
}
