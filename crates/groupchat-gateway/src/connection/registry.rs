//! Connection registry
//!
//! Maintains the live mapping from group to subscribed connections and
//! owns that state exclusively. One registry instance is shared across
//! all connection-handling tasks and all publisher callers.
//!
//! Locking discipline: the subscription map sits behind a single
//! `parking_lot::RwLock`. `publish` takes the write lock for the duration
//! of its enqueue loop, so deliveries within a group are totally ordered
//! (FIFO per group) and can never observe a half-finished `disconnect`.
//! All sends are non-blocking `try_send`s onto bounded per-connection
//! queues, which keeps every critical section short.

use super::Connection;
use crate::protocol::ServerFrame;
use dashmap::DashMap;
use groupchat_core::{ConnectionId, GroupId};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Registry of live connections and their group subscriptions
pub struct ConnectionRegistry {
    /// Live connections by ID
    connections: DashMap<ConnectionId, Arc<Connection>>,

    /// Group ID to subscribed connections
    ///
    /// Values hold the `Arc<Connection>` directly so `publish` never has
    /// to reach back into `connections` while holding this lock.
    groups: RwLock<HashMap<GroupId, HashMap<ConnectionId, Arc<Connection>>>>,

    /// Count of swallowed per-connection send failures
    send_failures: AtomicU64,
}

impl ConnectionRegistry {
    /// Create a new, empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            groups: RwLock::new(HashMap::new()),
            send_failures: AtomicU64::new(0),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn register(&self, connection: Arc<Connection>) {
        let id = connection.id().clone();
        self.connections.insert(id.clone(), connection);
        tracing::debug!(connection_id = %id, "Connection registered");
    }

    /// Subscribe a connection to a group
    ///
    /// Idempotent: a connection appears in a group's subscriber set at
    /// most once. No membership check happens here; authorization is a
    /// write-path concern. Returns false if the connection is unknown or
    /// already disconnected (disconnect is terminal).
    ///
    /// The `subscribed` acknowledgment is enqueued while the subscription
    /// lock is held, so no message published to the group afterwards can
    /// be queued ahead of it.
    pub fn subscribe(&self, connection_id: &ConnectionId, group_id: GroupId) -> bool {
        let connection = match self.connections.get(connection_id) {
            Some(entry) => Arc::clone(entry.value()),
            None => return false,
        };

        let mut groups = self.groups.write();
        // Re-check liveness under the lock: a disconnect that completed
        // after the lookup above must not see its connection resurface
        // in a subscriber set.
        if connection.is_closed() || !self.connections.contains_key(connection_id) {
            return false;
        }
        groups
            .entry(group_id.clone())
            .or_default()
            .insert(connection_id.clone(), Arc::clone(&connection));

        let ack = ServerFrame::subscribed(group_id.clone());
        if connection.try_send(ack).is_err() {
            self.record_send_failure(connection_id, &group_id);
        }
        drop(groups);

        tracing::trace!(
            connection_id = %connection_id,
            group_id = %group_id,
            "Connection subscribed to group"
        );

        true
    }

    /// Unsubscribe a connection from a group
    ///
    /// No error if the connection was not subscribed.
    pub fn unsubscribe(&self, connection_id: &ConnectionId, group_id: &GroupId) {
        let mut groups = self.groups.write();
        if let Some(subscribers) = groups.get_mut(group_id) {
            subscribers.remove(connection_id);
            if subscribers.is_empty() {
                groups.remove(group_id);
            }
        }
        drop(groups);

        tracing::trace!(
            connection_id = %connection_id,
            group_id = %group_id,
            "Connection unsubscribed from group"
        );
    }

    /// Disconnect a connection
    ///
    /// Removes it from every group in one step under the subscription
    /// lock; a concurrent publish sees the connection in either all of
    /// its groups or none of them. Terminal: the connection can never be
    /// subscribed again.
    pub fn disconnect(&self, connection_id: &ConnectionId) {
        let removed = self.connections.remove(connection_id);

        {
            let mut groups = self.groups.write();
            groups.retain(|_, subscribers| {
                subscribers.remove(connection_id);
                !subscribers.is_empty()
            });
        }

        if let Some((_, connection)) = removed {
            connection.close();
            tracing::debug!(
                connection_id = %connection_id,
                age_ms = connection.age().as_millis() as u64,
                "Connection disconnected"
            );
        }
    }

    /// Deliver a frame to every connection subscribed to a group
    ///
    /// Best-effort per connection: a failed send (full queue, gone
    /// transport) is counted and logged but never removes the connection
    /// or surfaces to the caller; cleanup stays with that connection's
    /// own disconnect. Returns the number of successful enqueues.
    pub fn publish(&self, group_id: &GroupId, frame: &ServerFrame) -> usize {
        // Write lock, not read: publishes to a group must not interleave,
        // so every subscriber sees the same delivery order.
        let groups = self.groups.write();
        let Some(subscribers) = groups.get(group_id) else {
            return 0;
        };

        let mut delivered = 0;
        for (connection_id, connection) in subscribers {
            match connection.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(_) => self.record_send_failure(connection_id, group_id),
            }
        }
        drop(groups);

        tracing::trace!(
            group_id = %group_id,
            delivered = delivered,
            "Frame published to group"
        );

        delivered
    }

    fn record_send_failure(&self, connection_id: &ConnectionId, group_id: &GroupId) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            connection_id = %connection_id,
            group_id = %group_id,
            "Send failed, leaving connection for its disconnect to clean up"
        );
    }

    /// Check whether a connection is subscribed to a group
    pub fn is_subscribed(&self, connection_id: &ConnectionId, group_id: &GroupId) -> bool {
        self.groups
            .read()
            .get(group_id)
            .is_some_and(|subscribers| subscribers.contains_key(connection_id))
    }

    /// Get the groups a connection is currently subscribed to
    pub fn subscriptions(&self, connection_id: &ConnectionId) -> HashSet<GroupId> {
        self.groups
            .read()
            .iter()
            .filter(|(_, subscribers)| subscribers.contains_key(connection_id))
            .map(|(group_id, _)| group_id.clone())
            .collect()
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of groups with at least one subscriber
    pub fn group_count(&self) -> usize {
        self.groups.read().len()
    }

    /// Number of connections subscribed to a group
    pub fn subscriber_count(&self, group_id: &GroupId) -> usize {
        self.groups
            .read()
            .get(group_id)
            .map_or(0, HashMap::len)
    }

    /// Check whether a connection is registered
    pub fn has_connection(&self, connection_id: &ConnectionId) -> bool {
        self.connections.contains_key(connection_id)
    }

    /// Total swallowed send failures since startup
    pub fn send_failure_count(&self) -> u64 {
        self.send_failures.load(Ordering::Relaxed)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.connections.len())
            .field("groups", &self.groups.read().len())
            .finish()
    }
}
