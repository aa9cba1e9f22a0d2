//! Builders for documentation service response bodies.
//!
//! # Example
//!
//! ```ignore
//! use genius_fixtures::{enveloped, SubmissionBuilder};
//!
//! let body = enveloped(
//!     SubmissionBuilder::new("r1")
//!         .succeeded("outputs/r1/docs.md")
//!         .with_summary("A tool.")
//!         .build(),
//! );
//! ```

use genius::transport::RawOutcome;
use serde_json::{json, Value};

/// Wrap `report` the way the service does: `{"reports": [report]}`.
#[must_use]
pub fn enveloped(report: Value) -> Value {
    json!({ "reports": [report] })
}

/// A 200 response whose body is `value` serialized as JSON.
#[must_use]
pub fn ok_json(value: &Value) -> RawOutcome {
    RawOutcome::response(200, value.to_string())
}

/// A 200 response whose body is `value` wrapped in a `reports` envelope.
#[must_use]
pub fn ok_enveloped(value: Value) -> RawOutcome {
    ok_json(&enveloped(value))
}

/// Fluent builder for a submit-job result.
#[derive(Debug, Clone)]
pub struct SubmissionBuilder {
    repository: String,
    status: String,
    success: bool,
    documentation_path: Option<String>,
    readme_summary: Option<String>,
    error: Option<String>,
}

impl SubmissionBuilder {
    /// A submission that has been accepted and is still processing.
    #[must_use]
    pub fn new(repository: &str) -> Self {
        Self {
            repository: repository.to_string(),
            status: "processing".to_string(),
            success: false,
            documentation_path: None,
            readme_summary: None,
            error: None,
        }
    }

    #[must_use]
    pub fn succeeded(mut self, documentation_path: &str) -> Self {
        self.status = "success".to_string();
        self.success = true;
        self.documentation_path = Some(documentation_path.to_string());
        self
    }

    #[must_use]
    pub fn failed(mut self, error: &str) -> Self {
        self.status = "error".to_string();
        self.success = false;
        self.error = Some(error.to_string());
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.readme_summary = Some(summary.to_string());
        self
    }

    #[must_use]
    pub fn build(self) -> Value {
        let mut value = json!({
            "repository": self.repository,
            "status": self.status,
            "success": self.success,
        });
        if let Some(map) = value.as_object_mut() {
            if let Some(path) = self.documentation_path {
                map.insert("documentation_path".into(), path.into());
            }
            if let Some(summary) = self.readme_summary {
                map.insert("readme_summary".into(), summary.into());
            }
            if let Some(error) = self.error {
                map.insert("error".into(), error.into());
            }
        }
        value
    }
}

/// One repository history entry.
#[must_use]
pub fn history_item(name: &str, status: &str) -> Value {
    json!({
        "name": name,
        "url": format!("https://github.com/example/{name}"),
        "status": status,
        "documentation_path": if status == "success" {
            Value::String(format!("outputs/{name}/docs.md"))
        } else {
            Value::Null
        },
    })
}
