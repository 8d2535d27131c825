//! Observable session state and the app-wide status message bus.
//!
//! Both are `tokio::sync::watch` channels: a subscriber sees the latest
//! value as soon as it subscribes and is woken on every change.

use buy01_core::User;
use tokio::sync::watch;

/// Current user and signed-in flag.
#[derive(Debug)]
pub struct SessionState {
    user: watch::Sender<Option<User>>,
    signed_in: watch::Sender<bool>,
}

impl SessionState {
    #[must_use]
    pub fn new(user: Option<User>, signed_in: bool) -> Self {
        Self {
            user: watch::Sender::new(user),
            signed_in: watch::Sender::new(signed_in),
        }
    }

    /// Snapshot of the cached user.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        *self.signed_in.borrow()
    }

    pub fn set_user(&self, user: Option<User>) {
        self.user.send_replace(user);
    }

    pub fn set_signed_in(&self, signed_in: bool) {
        // Only wake subscribers on an actual transition.
        self.signed_in.send_if_modified(|current| {
            let changed = *current != signed_in;
            *current = signed_in;
            changed
        });
    }

    /// Receiver for user changes.
    #[must_use]
    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.user.subscribe()
    }

    /// Receiver for signed-in flag changes.
    #[must_use]
    pub fn subscribe_signed_in(&self) -> watch::Receiver<bool> {
        self.signed_in.subscribe()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(None, false)
    }
}

/// A status message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl StatusMessage {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            success: None,
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            error: None,
            success: Some(message.into()),
        }
    }
}

/// App-wide status message bus. Starts empty.
#[derive(Debug)]
pub struct Notifier {
    tx: watch::Sender<Option<StatusMessage>>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tx: watch::Sender::new(None),
        }
    }

    pub fn publish(&self, message: StatusMessage) {
        self.tx.send_replace(Some(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(StatusMessage::error(message));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(StatusMessage::success(message));
    }

    /// Dismiss the current message.
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Latest published message.
    #[must_use]
    pub fn latest(&self) -> Option<StatusMessage> {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<StatusMessage>> {
        self.tx.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
