//! Typed views over result records returned by the submit-job and
//! list-history endpoints.

use crate::error::{GeniusError, GeniusResult};
use crate::model::{Payload, ResultRecord};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// URL prefixes accepted for repository submissions.
pub const REPOSITORY_URL_PREFIXES: [&str; 2] = ["https://github.com/", "http://github.com/"];

/// Processing state the service reports for a repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Queued,
    Processing,
    Success,
    #[serde(alias = "failed")]
    Error,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Queued => "Queued",
            Self::Processing => "Processing",
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Outcome of a documentation job submission.
///
/// Fields are read leniently: a value of the wrong type (including `null`)
/// reads as absent, and a non-boolean `success` reads as `false`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionReport {
    #[serde(deserialize_with = "lenient_string")]
    pub repository: Option<String>,
    #[serde(deserialize_with = "lenient_status")]
    pub status: Option<ProcessingStatus>,
    #[serde(deserialize_with = "lenient_bool")]
    pub success: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub documentation_path: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub readme_summary: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub error: Option<String>,
}

impl SubmissionReport {
    pub fn from_record(record: &ResultRecord) -> GeniusResult<Self> {
        if record.as_mapping().is_none() {
            return Err(GeniusError::decode(
                "submission result is not an object",
            ));
        }
        record
            .deserialize()
            .map_err(|err| GeniusError::decode(format!("malformed submission result: {err}")))
    }
}

/// One previously submitted repository, as the service last saw it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryHistoryItem {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_status")]
    pub status: Option<ProcessingStatus>,
    #[serde(deserialize_with = "lenient_string")]
    pub documentation_path: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub readme_summary: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn lenient_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ProcessingStatus>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => serde_json::from_value(Value::String(text)).ok(),
        _ => None,
    })
}

/// Snapshot of the service's repository history, in service order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub items: Vec<RepositoryHistoryItem>,
}

impl History {
    /// Accepts a bare list of items or an object with an `items` list.
    /// Anything else is an empty history; entries that are not objects are skipped.
    pub fn from_record(record: &ResultRecord) -> Self {
        let entries: &[Value] = match record.payload() {
            Payload::Sequence(items) => items,
            Payload::Mapping(map) => map
                .get("items")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            Payload::Scalar(_) => &[],
        };
        let items = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                match serde_json::from_value::<RepositoryHistoryItem>(entry.clone()) {
                    Ok(item) => Some(item),
                    Err(err) => {
                        tracing::warn!(index, error = %err, "skipping malformed history entry");
                        None
                    }
                }
            })
            .collect();
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Check a repository reference before submitting it. Returns the trimmed URL.
pub fn validate_repository_url(input: &str) -> GeniusResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GeniusError::cli_invalid_arg(
            "please enter a GitHub repository URL",
        ));
    }
    if !REPOSITORY_URL_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        return Err(GeniusError::cli_invalid_arg(
            "please enter a valid GitHub repository URL (must start with https://github.com/)",
        )
        .with_context(serde_json::json!({ "url": trimmed })));
    }
    Ok(trimmed.to_string())
}
