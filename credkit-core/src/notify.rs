//! The process-wide transient-message channel every action reports
//! through.
//!
//! Delivery is best effort: a notification with no subscribers is simply
//! dropped, and the channel never blocks the emitting action.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Outcome carried by a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The operation fully confirmed.
    Success,
    /// The operation failed; the message stays generic, diagnostics go to
    /// the log.
    Failure,
}

/// One transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Whether the reported operation succeeded.
    pub outcome: Outcome,
    /// The user-facing text.
    pub message: String,
}

/// Cloneable handle on the notification channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    /// Notifications are transient; a modest buffer is enough for any
    /// surface that actually renders them.
    const BUFFER: usize = 32;

    /// Creates a new notification channel.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(Self::BUFFER);
        Self { tx }
    }

    /// Subscribes to notifications emitted from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Emits a success notification.
    pub fn success<S: Into<String>>(&self, message: S) {
        self.emit(Outcome::Success, message.into());
    }

    /// Emits a failure notification.
    pub fn failure<S: Into<String>>(&self, message: S) {
        self.emit(Outcome::Failure, message.into());
    }

    fn emit(&self, outcome: Outcome, message: String) {
        // No subscribers is fine.
        let _ = self.tx.send(Notification { outcome, message });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
