//! Per-field save-trigger policy for the task detail panel.
//!
//! The mixed autosave/explicit-save behaviour lives in this one table
//! instead of being scattered across sub-forms, so it is a single source of
//! truth the editor service consults and tests can pin down.

use super::SectionKey;
use serde::{Deserialize, Serialize};

/// The editable fields of the task detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Inline title, always editable.
    Title,
    /// Stage select in the pinned stage row.
    Stage,
    /// Completion checkbox in the pinned stage row.
    Completed,
    /// Description section.
    Description,
    /// Due date section.
    DueDate,
    /// Assigned users section.
    Users,
}

/// When a field's edit is sent to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveTrigger {
    /// Every change persists immediately, no confirmation step and no
    /// debounce.
    AutoImmediate,
    /// Changes buffer in a draft until an explicit Save; Cancel discards
    /// them without issuing a request.
    Explicit,
}

/// Save behaviour of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    /// How saving is triggered.
    pub trigger: SaveTrigger,
    /// The accordion section hosting the field's form, `None` for fields
    /// pinned outside the accordion.
    pub section: Option<SectionKey>,
    /// Whether a successful save closes the hosting section.
    pub closes_on_save: bool,
}

/// Returns the save policy of a field.
#[must_use]
pub const fn policy(field: FieldKind) -> FieldPolicy {
    match field {
        FieldKind::Title | FieldKind::Stage | FieldKind::Completed => FieldPolicy {
            trigger: SaveTrigger::AutoImmediate,
            section: None,
            closes_on_save: false,
        },
        FieldKind::Description => FieldPolicy {
            trigger: SaveTrigger::Explicit,
            section: Some(SectionKey::Description),
            closes_on_save: true,
        },
        FieldKind::DueDate => FieldPolicy {
            trigger: SaveTrigger::Explicit,
            section: Some(SectionKey::DueDate),
            closes_on_save: true,
        },
        FieldKind::Users => FieldPolicy {
            trigger: SaveTrigger::Explicit,
            section: Some(SectionKey::Users),
            closes_on_save: true,
        },
    }
}
