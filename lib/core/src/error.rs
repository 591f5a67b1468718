use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Clients match on these —
// never on the human-readable message string.

/// Stable error code constants.
///
/// Clients should match on `code` from `{"code": "NOT_FOUND", "message": "..."}`.
/// Codes never change; messages may be reworded.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type used across all modules.
///
/// Each variant maps to a stable error code (see [`error_code`]).
/// Lookup misses on read paths are `Option`s, not errors — `NotFound` is
/// reserved for operations whose contract requires the record to exist
/// (update, delete, resolve of a named id).
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate key / resource already exists.
    #[error("{0}")]
    Conflict(String),

    /// Input data is invalid.
    #[error("{0}")]
    Validation(String),

    /// A status change not present in the entity's transition table.
    #[error("{0}")]
    InvalidTransition(String),

    /// Storage backend failure.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Conflict(_) => error_code::ALREADY_EXISTS,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::InvalidTransition(_) => error_code::INVALID_TRANSITION,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }
}
