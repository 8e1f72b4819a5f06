//! Frame formats
//!
//! Two inbound control frames are recognized; anything else, including
//! malformed JSON, fails to parse and the caller drops it silently so a
//! bad client frame can never terminate the session.

use groupchat_core::{GroupId, Message};
use serde::{Deserialize, Serialize};

/// Control frame sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientFrame {
    /// `{"type":"subscribe","groupId":"<string>"}`
    Subscribe {
        #[serde(rename = "groupId")]
        group_id: GroupId,
    },
    /// `{"type":"unsubscribe","groupId":"<string>"}`
    Unsubscribe {
        #[serde(rename = "groupId")]
        group_id: GroupId,
    },
}

impl ClientFrame {
    /// Deserialize from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON text
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Frame pushed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerFrame {
    /// Subscribe acknowledgment: `{"type":"subscribed","groupId":"<string>"}`
    Subscribed {
        #[serde(rename = "groupId")]
        group_id: GroupId,
    },
    /// Message delivery: `{"type":"message","message":<Message JSON>}`
    Message { message: Message },
}

impl ServerFrame {
    /// Create a subscribe acknowledgment frame
    #[must_use]
    pub fn subscribed(group_id: GroupId) -> Self {
        Self::Subscribed { group_id }
    }

    /// Create a message delivery frame
    #[must_use]
    pub fn message(message: Message) -> Self {
        Self::Message { message }
    }

    /// Serialize to JSON text
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
