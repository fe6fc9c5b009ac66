//! Transient user notifications raised during an export.

use std::fmt;
use std::sync::Mutex;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Receives progress and outcome messages meant for the user.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

/// Forwards notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => log::error!("{message}"),
            Severity::Success | Severity::Info => log::info!("{message}"),
        }
    }
}

/// Keeps every notification in order, for callers that want to inspect them later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<(String, Severity)> {
        self.messages().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((message.to_string(), severity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_notifications_in_order() {
        let notifier = RecordingNotifier::default();
        notifier.notify("Generating PDF...", Severity::Info);
        notifier.notify("done", Severity::Success);
        assert_eq!(
            notifier.messages(),
            vec![
                ("Generating PDF...".to_string(), Severity::Info),
                ("done".to_string(), Severity::Success),
            ]
        );
        assert_eq!(notifier.last(), Some(("done".to_string(), Severity::Success)));
    }
}
