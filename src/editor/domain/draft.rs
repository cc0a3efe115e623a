//! Pending-edit buffers for the accordion sections.

use super::SectionKey;
use crate::board::domain::{Task, TaskPatch, UserRef};
use chrono::{DateTime, Utc};

/// The buffered edit of the currently open section.
///
/// Seeded from the task's current value when the section opens, mutated by
/// the draft setters, and turned into a [`TaskPatch`] on explicit save.
/// Discarded wholesale on cancel or section switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionDraft {
    /// Pending description, `None` clears the field.
    Description(Option<String>),
    /// Pending due date, `None` clears the field.
    DueDate(Option<DateTime<Utc>>),
    /// Pending assigned-user set.
    Users(Vec<UserRef>),
}

impl SectionDraft {
    /// Seeds a draft for a section from the task's current value.
    #[must_use]
    pub fn seed(section: SectionKey, task: &Task) -> Self {
        match section {
            SectionKey::Description => Self::Description(task.description().map(str::to_owned)),
            SectionKey::DueDate => Self::DueDate(task.due_date()),
            SectionKey::Users => Self::Users(task.users().to_vec()),
        }
    }

    /// Returns the section this draft belongs to.
    #[must_use]
    pub const fn section(&self) -> SectionKey {
        match self {
            Self::Description(_) => SectionKey::Description,
            Self::DueDate(_) => SectionKey::DueDate,
            Self::Users(_) => SectionKey::Users,
        }
    }

    /// Converts the draft into the partial update it represents.
    #[must_use]
    pub fn into_patch(self) -> TaskPatch {
        match self {
            Self::Description(description) => TaskPatch::new().with_description(description),
            Self::DueDate(due_date) => TaskPatch::new().with_due_date(due_date),
            Self::Users(users) => TaskPatch::new().with_users(users),
        }
    }
}
