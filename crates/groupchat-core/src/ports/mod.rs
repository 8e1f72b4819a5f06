//! Collaborator ports - interfaces consumed from external systems
//!
//! The messaging core defines what it needs from the surrounding system
//! and the infrastructure provides the implementation. Message history
//! lives in the relational store; group membership is decided by the
//! membership service. Neither is implemented by this core.

use async_trait::async_trait;

use crate::entities::Message;
use crate::error::DomainError;
use crate::value_objects::{GroupId, UserId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

/// Durable message persistence
///
/// `append` must succeed before any fan-out occurs: the store assigns
/// the message identifier and timestamp exactly once.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a new message and return it with its assigned identifier
    async fn append(
        &self,
        group_id: &GroupId,
        sender_id: &UserId,
        content: String,
    ) -> StoreResult<Message>;

    /// Fetch recent messages for a group, most-recent-first
    ///
    /// Used by clients for history on initial load; independent of the
    /// live fan-out path.
    async fn recent(&self, group_id: &GroupId, limit: usize) -> StoreResult<Vec<Message>>;
}

/// Group membership authorization
///
/// Called by the write path before a message reaches the gateway. The
/// registry itself performs no membership check at subscribe time.
#[async_trait]
pub trait MembershipChecker: Send + Sync {
    /// Check whether a user is a member of a group
    async fn is_member(&self, user_id: &UserId, group_id: &GroupId) -> StoreResult<bool>;
}
