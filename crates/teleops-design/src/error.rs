//! Design editor error types.

use teleops_api::ApiError;
use teleops_core::errors::CoreError;
use thiserror::Error;

use crate::notice::Severity;

/// Errors raised by design session operations.
///
/// Validation failures are raised before any backend call and leave the
/// session untouched. Backend failures leave the session at its last
/// known-good state.
#[derive(Debug, Error)]
pub enum DesignError {
    /// The session has no project context.
    #[error("no project selected")]
    NoProject,

    /// The operation needs an open draft.
    #[error("no draft is open")]
    NoDraft,

    /// The draft already holds a row with this name in this category.
    #[error("'{name}' already exists in category '{category}'")]
    DuplicateItem { name: String, category: String },

    /// Publishing requires at least one item.
    #[error("cannot publish an empty draft")]
    EmptyDraft,

    /// There is no saved server draft that differs from the current one.
    #[error("nothing to revert")]
    NothingToRevert,

    /// The operation needs a draft persisted on the server.
    #[error("the draft has not been saved to the server")]
    NoServerDraft,

    /// A destructive action was requested without confirmation.
    #[error("confirmation required to {0}")]
    ConfirmationRequired(&'static str),

    /// A row index is outside the draft.
    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// No row with this id exists in the draft.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// The backend refused to publish because of its version ceiling.
    #[error("version limit reached: {0}")]
    VersionLimit(String),

    /// Another operation currently holds the session.
    #[error("another operation is in progress")]
    Busy,

    /// Local draft cache I/O or format failure.
    #[error("draft cache error at {path}: {reason}")]
    Cache { path: String, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    /// Transport, status, or parse failure talking to the backend.
    #[error("backend error: {0}")]
    Backend(ApiError),
}

impl From<ApiError> for DesignError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::VersionLimit { message } => Self::VersionLimit(message),
            other => Self::Backend(other),
        }
    }
}

impl DesignError {
    /// How the failure is surfaced to the user.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Backend(_) | Self::Cache { .. } | Self::Core(CoreError::InvalidTransition { .. }) => {
                Severity::Error
            }
            _ => Severity::Warning,
        }
    }
}
