//! Domain errors raised by validation and business rules.
//!
//! Messages in `String` variants are user-facing and are returned verbatim
//! in `{"message": ...}` bodies.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// Rejected client input.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Missing or unverifiable credentials.
    #[error("unauthenticated: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role does not allow the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("internal: {0}")]
    Internal(String),
}
