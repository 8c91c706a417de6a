//! User-visible notifications (toasts).

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Sender side of the notification channel.
///
/// Sending never fails the caller: a closed channel just means nobody is
/// listening any more.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    sender: Option<UnboundedSender<Notification>>,
}

impl Notifier {
    pub fn new(sender: UnboundedSender<Notification>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// A notifier that drops everything.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn notify(&self, notification: Notification) {
        if let Some(sender) = &self.sender {
            if sender.send(notification).is_err() {
                tracing::debug!("Notification receiver dropped");
            }
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notification::success(message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(Notification::info(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Notification::error(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_notifier_delivers_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = Notifier::new(tx);
        notifier.success("saved");
        notifier.error("failed");

        assert_eq!(rx.try_recv().unwrap(), Notification::success("saved"));
        assert_eq!(rx.try_recv().unwrap().level, NotificationLevel::Error);
    }

    #[test]
    fn test_silent_notifier_is_noop() {
        Notifier::silent().info("nobody listens");
    }
}
