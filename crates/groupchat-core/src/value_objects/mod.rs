//! Value objects - typed identifiers used across the subsystem

mod ids;

pub use ids::{ConnectionId, GroupId, MessageId, UserId};
