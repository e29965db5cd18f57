//! Domain error taxonomy.
//!
//! Rule code reports failures through these variants and stays unaware
//! of HTTP; the API layer owns the mapping to status codes.

use crate::types::DbId;

/// Failure categories raised by lookups and workflow rules.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup by id came back empty.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// The request content is unusable as given.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The operation contradicts the record's current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller could not be identified.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is known but not allowed to do this.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A failure the caller can do nothing about.
    #[error("internal: {0}")]
    Internal(String),
}
