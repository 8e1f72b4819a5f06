//! Message entity - one chat message posted to a group

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{GroupId, MessageId, UserId};

/// Message entity
///
/// Created by the write path after authorization and persistence succeed;
/// immutable thereafter. Fan-out is a read-only projection of the
/// persisted record. Serializes in camelCase, matching the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub group_id: GroupId,
    pub sender_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new Message with the current timestamp
    pub fn new(id: MessageId, group_id: GroupId, sender_id: UserId, content: String) -> Self {
        Self {
            id,
            group_id,
            sender_id,
            content,
            created_at: Utc::now(),
        }
    }

    /// Check if message content is empty after trimming whitespace
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Get a truncated preview of the message content
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}
