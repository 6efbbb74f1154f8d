//! Notification contract
//!
//! Narrow seam for the host's toast system. The switch emits exactly one
//! error toast per failed toggle, naming the calendar's title.

use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn toast(&self, message: &str, severity: Severity);
}

pub fn toggle_failure_message(title: &str) -> String {
    format!("Something went wrong when toggling \"{}\"", title)
}

pub fn notify_toggle_failure(notifier: &dyn Notifier, title: &str) {
    notifier.toast(&toggle_failure_message(title), Severity::Error);
}

/// Log-backed default for hosts without a toast layer.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn toast(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => error!("[Toast] {}", message),
            Severity::Warning => warn!("[Toast] {}", message),
            Severity::Info => info!("[Toast] {}", message),
        }
    }
}
