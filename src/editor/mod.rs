//! Task detail panel: single-open-section editing with mixed
//! autosave/explicit-save semantics.
//!
//! The panel shows a task's title inline (always editable), a pinned
//! stage/completed row, and three accordion sections (description, due
//! date, users) of which at most one is open. Title, stage, and completed
//! autosave immediately; the accordion sections buffer a draft until an
//! explicit save. The module reuses the board's domain types and ports:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
