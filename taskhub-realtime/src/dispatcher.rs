use std::sync::Arc;

use crate::{
    models::Notification,
    registry::ConnectionRegistry,
    transport::{ChannelTransport, TransportError},
};

/// Event name notifications are delivered under.
pub const NOTIFICATION_EVENT: &str = "notification";

/// Fire-and-forget delivery to currently connected users.
///
/// At-most-once: a user with no live channel misses the notification,
/// with no queueing and no error surfaced to the caller.
#[derive(Clone)]
pub struct NotificationDispatcher {
    registry: Arc<ConnectionRegistry>,
    transport: Arc<dyn ChannelTransport>,
}

impl NotificationDispatcher {
    pub fn new(registry: Arc<ConnectionRegistry>, transport: Arc<dyn ChannelTransport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub async fn notify(&self, user_id: &str, notification: Notification) {
        let Some(channel) = self.registry.lookup(user_id) else {
            tracing::debug!(user_id, kind = %notification.kind, "no live channel, notification dropped");
            return;
        };

        let payload = match serde_json::to_value(&notification) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(user_id, error = %e, "failed to serialize notification");
                return;
            }
        };

        match self.transport.send(&channel, NOTIFICATION_EVENT, payload).await {
            Ok(()) => {
                tracing::debug!(user_id, channel = %channel, kind = %notification.kind, "notification delivered");
            }
            Err(TransportError::ChannelClosed(_)) => {
                // Delivery raced a disconnect; best-effort only.
                tracing::debug!(user_id, channel = %channel, "channel closed before delivery");
            }
            Err(e) => {
                tracing::warn!(user_id, channel = %channel, error = %e, "notification delivery failed");
            }
        }
    }
}
