//! User-facing notifications
//!
//! The error classifier reports every failure through a [`Notifier`] that is
//! injected when the client is built. A desktop or web shell would render
//! these as transient alerts; headless callers can log them or drop them.

use std::fmt;

use tokio::sync::mpsc;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// An operation completed.
    Success,
    /// Something needs attention but nothing failed.
    Warning,
    /// An operation failed.
    Error,
}

/// Displays a transient alert to the user.
pub trait Notifier: Send + Sync + fmt::Debug {
    /// Show `message` with the given severity.
    fn notify(&self, severity: Severity, message: &str);
}

/// Notifier that writes alerts to the `fundhub::notify` tracing target.
///
/// This is the default when no notifier is supplied.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info | Severity::Success => {
                tracing::info!(target: "fundhub::notify", ?severity, "{}", message)
            }
            Severity::Warning => tracing::warn!(target: "fundhub::notify", "{}", message),
            Severity::Error => tracing::error!(target: "fundhub::notify", "{}", message),
        }
    }
}

/// Notifier that discards every alert.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _severity: Severity, _message: &str) {}
}

/// A notification forwarded by [`ChannelNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity of the alert
    pub severity: Severity,
    /// Text to display
    pub message: String,
}

/// Alerts a [`ChannelNotifier`] buffers before it starts dropping them.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 64;

/// Notifier that forwards alerts to a UI task over a bounded channel.
///
/// Notifying never blocks. When the UI task falls behind and the buffer is
/// full, the alert is dropped and logged instead.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end the UI should drain.
    pub fn new() -> (Self, mpsc::Receiver<Notification>) {
        Self::with_capacity(DEFAULT_NOTIFICATION_CAPACITY)
    }

    /// Like [`ChannelNotifier::new`], buffering at most `capacity` alerts.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        let notification = Notification {
            severity,
            message: message.to_string(),
        };
        match self.tx.try_send(notification) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(dropped)) => {
                tracing::warn!(
                    severity = ?dropped.severity,
                    "notification channel full, alert dropped: {}",
                    dropped.message
                );
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!("notification receiver dropped, alert discarded: {}", message);
            }
        }
    }
}
