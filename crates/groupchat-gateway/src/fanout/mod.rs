//! Message fan-out
//!
//! Translates newly persisted messages into registry publishes.

mod gateway;

pub use gateway::MessageGateway;
