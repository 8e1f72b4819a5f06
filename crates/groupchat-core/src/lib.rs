//! # groupchat-core
//!
//! Domain layer for the group messaging subsystem: the `Message` entity,
//! typed identifiers, domain errors, and the ports consumed from external
//! collaborators (message persistence and group membership).
//! This crate has zero dependencies on infrastructure (web framework,
//! transport, etc.).

pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::Message;
pub use error::DomainError;
pub use ports::{MembershipChecker, MessageStore, StoreResult};
pub use value_objects::{ConnectionId, GroupId, MessageId, UserId};
