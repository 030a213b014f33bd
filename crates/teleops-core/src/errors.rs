//! Cross-cutting error types for Teleops.
//!
//! Domain-specific errors (`ApiError`, `DesignError`, ...) are defined in their
//! respective crates. The CLI converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Teleops crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
