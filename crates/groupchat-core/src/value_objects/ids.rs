//! Typed identifiers
//!
//! All identifiers in the subsystem are opaque strings. Groups and users
//! are identified by the external relational store; message identifiers
//! are assigned by the persistence layer at append time; connection
//! identifiers are generated per transport session.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id! {
    /// Identifier of a group (chat/coordination unit, owned externally)
    GroupId
}

string_id! {
    /// Identifier of a verified user (authentication is an external precondition)
    UserId
}

string_id! {
    /// Identifier of a persisted message, assigned exactly once by the store
    MessageId
}

string_id! {
    /// Identifier of one live client transport session
    ConnectionId
}

impl ConnectionId {
    /// Generate a fresh connection identifier for a new transport session
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
