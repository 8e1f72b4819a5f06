//! Request extractors

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use groupchat_core::UserId;

use super::response::ApiError;

/// Verified caller identity
///
/// Session validation happens upstream of this subsystem; the verified
/// user id reaches us in the `X-User-Id` header. A request without it is
/// rejected before any handler logic runs.
#[derive(Debug, Clone)]
pub struct Identity(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| Self(UserId::from(value)))
            .ok_or(ApiError::MissingIdentity)
    }
}
