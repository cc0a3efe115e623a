//! Domain model for the task detail panel.
//!
//! The accordion state machine, the per-field save-policy table, and the
//! pending-edit buffers. Task and stage values come from the board domain;
//! nothing here touches a port.

mod accordion;
mod draft;
mod policy;

pub use accordion::{Accordion, SectionKey};
pub use draft::SectionDraft;
pub use policy::{FieldKind, FieldPolicy, SaveTrigger, policy};
