//! Human-readable output for reports, history and health.

use genius::config::BACKEND_START_COMMAND;
use genius::model::{
    ConnectivityKind, HealthStatus, History, ProcessingStatus, RepositoryHistoryItem,
    SubmissionReport,
};
use genius::{ErrorCode, GeniusError};
use std::fmt::Write as _;

/// Terminal styling decision, made once at startup.
#[derive(Clone, Copy, Debug)]
pub struct Style {
    pub color: bool,
}

impl Style {
    fn paint(self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn status(self, status: Option<ProcessingStatus>) -> String {
        let label = status.map_or_else(|| "Unknown".to_string(), |s| s.to_string());
        match status {
            Some(ProcessingStatus::Success) => self.paint("32", &label),
            Some(ProcessingStatus::Error) => self.paint("31", &label),
            Some(ProcessingStatus::Processing | ProcessingStatus::Queued) => {
                self.paint("33", &label)
            }
            Some(ProcessingStatus::Unknown) | None => label,
        }
    }
}

pub fn submission(style: Style, report: &SubmissionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Documentation generation started!");
    let _ = writeln!(
        out,
        "Repository: {}",
        report.repository.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(out, "Status: {}", style.status(report.status));
    if !report.success {
        return out;
    }
    let _ = writeln!(out, "{}", style.paint("32", "Documentation generated successfully!"));
    let _ = writeln!(
        out,
        "Output Path: {}",
        report.documentation_path.as_deref().unwrap_or("Unknown")
    );
    if let Some(summary) = report.readme_summary.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "README Summary");
        let _ = writeln!(out, "--------------");
        let _ = writeln!(out, "{summary}");
    }
    out
}

pub fn history(style: Style, history: &History) -> String {
    if history.is_empty() {
        return "No repositories have been processed yet.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "Found {} processed repositories", history.len());
    for item in &history.items {
        let _ = writeln!(out);
        out.push_str(&history_item(style, item));
    }
    out
}

fn history_item(style: Style, item: &RepositoryHistoryItem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", item.name.as_deref().unwrap_or("Unknown"));
    let _ = writeln!(out, "  URL: {}", item.url.as_deref().unwrap_or("Unknown"));
    let _ = writeln!(out, "  Status: {}", style.status(item.status));
    let _ = writeln!(
        out,
        "  Docs: {}",
        item.documentation_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("Not generated")
    );
    let _ = writeln!(
        out,
        "  Summary: {}",
        item.readme_summary.as_deref().unwrap_or("N/A")
    );
    out
}

pub fn health(style: Style, status: &HealthStatus) -> String {
    match status {
        HealthStatus::Online => format!("server: {}\n", style.paint("32", "online")),
        HealthStatus::ServerError { status } => {
            format!("server: {} ({status})\n", style.paint("31", "error"))
        }
        HealthStatus::Offline { kind, .. } => format!(
            "server: {} ({kind})\n{}",
            style.paint("31", "offline"),
            start_hint()
        ),
    }
}

/// Extra guidance printed after an error, if any.
pub fn error_hint(err: &GeniusError) -> Option<String> {
    match err.code {
        ErrorCode::Connectivity => Some(start_hint()),
        _ => None,
    }
}

fn start_hint() -> String {
    format!("Make sure the Jac server is running:\n  {BACKEND_START_COMMAND}\n")
}

/// Map a non-online health status to the error the CLI exits with.
pub fn health_error(status: &HealthStatus) -> Option<GeniusError> {
    match status {
        HealthStatus::Online => None,
        HealthStatus::ServerError { status } => Some(
            GeniusError::new(ErrorCode::Protocol, format!("server error: {status}"))
                .with_context(serde_json::json!({ "status": status })),
        ),
        HealthStatus::Offline { kind, message } => Some(offline_error(*kind, message)),
    }
}

fn offline_error(kind: ConnectivityKind, message: &str) -> GeniusError {
    GeniusError::new(ErrorCode::Connectivity, format!("server offline ({kind})"))
        .with_context(serde_json::json!({ "kind": kind, "source": message }))
}
