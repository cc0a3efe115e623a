//! Error types for board domain validation.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The stage title is empty after trimming.
    #[error("stage title must not be empty")]
    EmptyStageTitle,

    /// The user name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,
}
