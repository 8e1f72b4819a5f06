//! # groupchat-gateway
//!
//! Real-time group messaging gateway: owns the live client connections,
//! their group subscriptions, and the fan-out of newly persisted messages
//! to every connection currently viewing a group.

pub mod connection;
pub mod fanout;
pub mod protocol;
pub mod server;
pub mod store;
