// src/notify.rs

//! User-facing notifications.
//!
//! The web frontend surfaced failures as toast messages; here the same role
//! is played by a [`Notifier`] the stores call into. The CLI routes
//! notifications to the log; tests install recording notifiers.

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Sink for user-facing messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Notifier backed by the `log` facade.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info | Severity::Success => log::info!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Notifier that records every message for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub messages: Mutex<Vec<(Severity, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, severity: Severity, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push((severity, message.to_string()));
        }
    }

    impl RecordingNotifier {
        pub fn errors(&self) -> usize {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .filter(|(s, _)| *s == Severity::Error)
                .count()
        }
    }
}
