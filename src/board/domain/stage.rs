//! Stage (board column) domain type.

use super::{BoardDomainError, StageId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A named lifecycle phase rendered as one board column.
///
/// Column order is `created_at` ascending and is fixed for the lifetime of a
/// board render; moving tasks never reorders stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    id: StageId,
    title: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStageData {
    /// Persisted stage identifier.
    pub id: StageId,
    /// Persisted stage title.
    pub title: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Stage {
    /// Creates a new stage with the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyStageTitle`] when the title is empty
    /// after trimming.
    pub fn new(title: impl Into<String>, clock: &impl Clock) -> Result<Self, BoardDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BoardDomainError::EmptyStageTitle);
        }
        Ok(Self {
            id: StageId::new(),
            title,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a stage from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStageData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            created_at: data.created_at,
        }
    }

    /// Returns the stage identifier.
    #[must_use]
    pub const fn id(&self) -> StageId {
        self.id
    }

    /// Returns the stage title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
