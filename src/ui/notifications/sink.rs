// SPDX-License-Identifier: MPL-2.0
//! Destinations for resolved notification text.

use super::notification::Severity;
use std::sync::{Arc, Mutex};

/// Shows a resolved message to the user.
pub trait Notifier: Send {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Prints alerts to stderr and everything else to stdout.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Error | Severity::Warning => eprintln!("[{}] {}", severity.label(), message),
            Severity::Success | Severity::Info => println!("{message}"),
        }
    }
}

/// Keeps every message. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl RecordingNotifier {
    /// Messages received so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Messages of the given severity.
    #[must_use]
    pub fn with_severity(&self, severity: Severity) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.push((severity, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_clones_share_log() {
        let mut notifier = RecordingNotifier::default();
        let observer = notifier.clone();
        notifier.notify(Severity::Error, "boom");
        notifier.notify(Severity::Info, "fine");

        assert_eq!(observer.messages().len(), 2);
        assert_eq!(observer.with_severity(Severity::Error), vec!["boom".to_string()]);
    }
}
