//! Individual client connection
//!
//! Represents one live transport session. The connection holds the sending
//! half of a bounded channel; a per-connection task drains the other half
//! into the WebSocket, so enqueueing a frame here never blocks on a slow
//! client.

use crate::protocol::ServerFrame;
use groupchat_core::ConnectionId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// A single live client connection
pub struct Connection {
    /// Unique connection ID
    id: ConnectionId,

    /// Bounded channel to the task writing to the WebSocket
    sender: mpsc::Sender<ServerFrame>,

    /// Set once on disconnect; a closed connection is terminal
    closed: AtomicBool,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection with a freshly generated ID
    pub fn new(sender: mpsc::Sender<ServerFrame>) -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::generate(),
            sender,
            closed: AtomicBool::new(false),
            created_at: Instant::now(),
        })
    }

    /// Get the connection ID
    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Enqueue a frame without blocking
    ///
    /// Fails when the outbound queue is full or the transport task has
    /// gone away; callers treat both as a best-effort send failure.
    pub fn try_send(
        &self,
        frame: ServerFrame,
    ) -> Result<(), mpsc::error::TrySendError<ServerFrame>> {
        self.sender.try_send(frame)
    }

    /// Mark the connection closed (terminal)
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Check whether the connection is closed
    ///
    /// True once `close` ran or the transport side dropped its receiver.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst) || self.sender.is_closed()
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}
