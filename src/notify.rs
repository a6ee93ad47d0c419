//! # User Notifications
//!
//! One-shot, user-facing messages the cart emits when an operation fails.
//! Delivery is fire-and-forget: a notifier never reports back and never
//! blocks the actor.

use std::fmt::Display;

use tokio::sync::mpsc;
use tracing::warn;

/// A failure the user should be told about.
///
/// Messages are in the storefront's display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Requested quantity exceeds the available stock (add and update).
    OutOfStock,
    /// Adding a product failed for any other reason.
    AddProductFailed,
    /// Removing a product failed, including when it was not in the cart.
    RemoveProductFailed,
    /// Changing a quantity failed, including when the product was not in the cart.
    UpdateAmountFailed,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Notification::OutOfStock => "Quantidade solicitada fora de estoque",
            Notification::AddProductFailed => "Erro na adição do produto",
            Notification::RemoveProductFailed => "Erro na remoção do produto",
            Notification::UpdateAmountFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to a channel read by the UI layer.
///
/// If the receiver is gone the notification is dropped.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        let _ = self.sender.send(notification);
    }
}

/// Writes notifications to the log. Used when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        warn!(?notification, message = notification.message(), "Cart notification");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_notifier_delivers_in_order() {
        let (notifier, mut receiver) = ChannelNotifier::new();

        notifier.notify(Notification::OutOfStock);
        notifier.notify(Notification::RemoveProductFailed);

        assert_eq!(receiver.recv().await, Some(Notification::OutOfStock));
        assert_eq!(receiver.recv().await, Some(Notification::RemoveProductFailed));
    }

    #[test]
    fn test_notify_after_receiver_dropped_is_silent() {
        let (notifier, receiver) = ChannelNotifier::new();
        drop(receiver);
        notifier.notify(Notification::AddProductFailed);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Notification::OutOfStock.to_string(),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(
            Notification::UpdateAmountFailed.message(),
            "Erro na alteração de quantidade do produto"
        );
    }
}
