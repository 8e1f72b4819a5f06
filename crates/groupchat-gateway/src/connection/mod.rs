//! Connection management
//!
//! Owns live WebSocket connections and their group subscriptions.

mod connection;
mod registry;

pub use connection::Connection;
pub use registry::ConnectionRegistry;
