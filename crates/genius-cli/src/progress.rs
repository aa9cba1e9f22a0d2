//! Spinner shown while a call is in flight, using indicatif.

use genius::client::{CallEvent, CallObserver};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Call observer that draws a spinner on stderr until the call finishes.
pub struct SpinnerProgress {
    message: String,
    spinner: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            spinner: Mutex::new(None),
        }
    }
}

impl CallObserver for SpinnerProgress {
    fn on_event(&self, event: &CallEvent) {
        match event {
            CallEvent::Sent { .. } => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb.set_message(self.message.clone());
                pb.enable_steady_tick(Duration::from_millis(100));
                if let Ok(mut spinner) = self.spinner.lock() {
                    *spinner = Some(pb);
                }
            }
            CallEvent::Received { status, .. } => {
                if let Ok(spinner) = self.spinner.lock() {
                    if let Some(pb) = spinner.as_ref() {
                        pb.set_message(format!("{} (HTTP {status})", self.message));
                    }
                }
            }
            CallEvent::Decoded { .. } | CallEvent::Normalized { .. } => {}
            CallEvent::Finished { .. } => {
                if let Ok(mut spinner) = self.spinner.lock() {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                }
            }
        }
    }
}
