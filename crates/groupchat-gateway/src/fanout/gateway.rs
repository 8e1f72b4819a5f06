//! Message gateway
//!
//! The single place where a newly persisted message becomes a registry
//! publish. Stateless: it owns no connection or subscription state and
//! never stores message bodies.

use crate::connection::ConnectionRegistry;
use crate::protocol::ServerFrame;
use groupchat_core::Message;
use std::sync::Arc;

/// Stateless dispatcher from the write path into the registry
///
/// Contract: callers invoke `publish` only after the message store has
/// durably assigned the message an identifier, and at most once per
/// persisted message. Delivery is best-effort; a client that misses its
/// copy recovers via a history fetch from the store.
pub struct MessageGateway {
    registry: Arc<ConnectionRegistry>,
}

impl MessageGateway {
    /// Create a new gateway over a registry
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Fan a persisted message out to the group's subscribers
    ///
    /// Returns the number of connections the message was enqueued for.
    pub fn publish(&self, message: &Message) -> usize {
        let frame = ServerFrame::message(message.clone());
        let delivered = self.registry.publish(&message.group_id, &frame);

        tracing::debug!(
            message_id = %message.id,
            group_id = %message.group_id,
            delivered = delivered,
            "Message fanned out"
        );

        delivered
    }

    /// Access the underlying registry
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }
}

impl std::fmt::Debug for MessageGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageGateway")
            .field("registry", &self.registry)
            .finish()
    }
}
