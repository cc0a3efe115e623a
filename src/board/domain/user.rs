//! User reference domain type for task assignment.

use super::{BoardDomainError, UserId};
use serde::{Deserialize, Serialize};

/// Lightweight reference to an assignable user.
///
/// The board only needs enough to label assignment chips and populate the
/// users select; account data proper lives outside this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    id: UserId,
    name: String,
}

impl UserRef {
    /// Creates a user reference.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyUserName`] when the name is empty
    /// after trimming.
    pub fn new(id: UserId, name: impl Into<String>) -> Result<Self, BoardDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BoardDomainError::EmptyUserName);
        }
        Ok(Self { id, name })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
