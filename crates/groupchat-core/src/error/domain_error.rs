//! Domain errors

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Message content must not be empty")]
    EmptyContent,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a member of this group")]
    NotAMember,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),
}

impl DomainError {
    /// Stable machine-readable error code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::PersistenceFailed(_) => "PERSISTENCE_FAILED",
        }
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyContent | Self::ContentTooLong { .. })
    }

    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAMember)
    }
}
