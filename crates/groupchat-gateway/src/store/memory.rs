//! In-memory message store and membership checker

use async_trait::async_trait;
use groupchat_core::{
    DomainError, GroupId, MembershipChecker, Message, MessageId, MessageStore, StoreResult, UserId,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// In-memory message store
///
/// Messages are kept per group in append order. Identifiers are assigned
/// here, exactly once, before the message is ever visible to callers.
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    messages: Mutex<HashMap<GroupId, Vec<Message>>>,
}

impl MemoryMessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored messages across all groups
    pub fn len(&self) -> usize {
        self.messages.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn append(
        &self,
        group_id: &GroupId,
        sender_id: &UserId,
        content: String,
    ) -> StoreResult<Message> {
        if content.trim().is_empty() {
            return Err(DomainError::EmptyContent);
        }

        let message = Message::new(
            MessageId::from(uuid::Uuid::new_v4().to_string()),
            group_id.clone(),
            sender_id.clone(),
            content,
        );

        self.messages
            .lock()
            .entry(group_id.clone())
            .or_default()
            .push(message.clone());

        Ok(message)
    }

    async fn recent(&self, group_id: &GroupId, limit: usize) -> StoreResult<Vec<Message>> {
        let messages = self.messages.lock();
        let Some(stored) = messages.get(group_id) else {
            return Ok(Vec::new());
        };
        Ok(stored.iter().rev().take(limit).cloned().collect())
    }
}

/// In-memory membership checker
///
/// Allow-all by default, mirroring a deployment where membership is
/// enforced upstream. Tests switch to explicit grants to exercise the
/// 403 path.
#[derive(Debug, Default)]
pub struct MemoryMembership {
    /// None: every user is a member of every group
    grants: Mutex<Option<HashSet<(UserId, GroupId)>>>,
}

impl MemoryMembership {
    /// Allow-all checker
    #[must_use]
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Checker that only allows explicitly granted (user, group) pairs
    #[must_use]
    pub fn deny_by_default() -> Self {
        Self {
            grants: Mutex::new(Some(HashSet::new())),
        }
    }

    /// Grant a user membership of a group
    pub fn grant(&self, user_id: UserId, group_id: GroupId) {
        let mut grants = self.grants.lock();
        grants
            .get_or_insert_with(HashSet::new)
            .insert((user_id, group_id));
    }
}

#[async_trait]
impl MembershipChecker for MemoryMembership {
    async fn is_member(&self, user_id: &UserId, group_id: &GroupId) -> StoreResult<bool> {
        let grants = self.grants.lock();
        Ok(match grants.as_ref() {
            None => true,
            Some(set) => set.contains(&(user_id.clone(), group_id.clone())),
        })
    }
}
