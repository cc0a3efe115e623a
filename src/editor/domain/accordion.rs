//! Mutually-exclusive accordion state for the task detail panel.

use serde::{Deserialize, Serialize};

/// The collapsible sections of the task detail panel.
///
/// Title and stage/completed sit outside the accordion: the title is always
/// editable inline and the stage row autosaves in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    /// Markdown description editor.
    Description,
    /// Due date picker.
    DueDate,
    /// Assigned users select.
    Users,
}

impl SectionKey {
    /// Returns the canonical key string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::DueDate => "due_date",
            Self::Users => "users",
        }
    }
}

/// At most one section open at a time.
///
/// Closed sections render a read-only summary (or an "add …" prompt when
/// the field is empty); the open section mounts its edit form. State is
/// local to one task-detail view and resets whenever the viewed task
/// changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Option<SectionKey>,
}

impl Accordion {
    /// Creates a fully closed accordion.
    #[must_use]
    pub const fn new() -> Self {
        Self { open: None }
    }

    /// Toggles a section: opens it when closed, closes it when it is the
    /// open one, and switches to it when another section is open (opening
    /// one section implicitly closes the other).
    ///
    /// Returns the section open after the transition.
    pub const fn toggle(&mut self, section: SectionKey) -> Option<SectionKey> {
        self.open = match self.open {
            Some(open) if matches(open, section) => None,
            _ => Some(section),
        };
        self.open
    }

    /// Closes whichever section is open.
    pub const fn close(&mut self) {
        self.open = None;
    }

    /// Returns the open section, if any.
    #[must_use]
    pub const fn open_section(&self) -> Option<SectionKey> {
        self.open
    }

    /// Returns `true` when the given section is the open one.
    #[must_use]
    pub const fn is_open(&self, section: SectionKey) -> bool {
        match self.open {
            Some(open) => matches(open, section),
            None => false,
        }
    }
}

/// Const-context equality for section keys.
const fn matches(a: SectionKey, b: SectionKey) -> bool {
    matches!(
        (a, b),
        (SectionKey::Description, SectionKey::Description)
            | (SectionKey::DueDate, SectionKey::DueDate)
            | (SectionKey::Users, SectionKey::Users)
    )
}
