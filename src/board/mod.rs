//! Stage-based task board: grouping, drag resolution, and the optimistic
//! board controller.
//!
//! The board owns a derived view model (unassigned bucket plus one column
//! per stage) rebuilt from two independently fetched collections, resolves
//! pointer gestures into stage moves, and issues optimistic stage
//! reassignments with rollback on failure. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
