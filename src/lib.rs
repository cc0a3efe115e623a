//! Stagehand: the stage-based task board core of an admin dashboard.
//!
//! This crate provides the board engine behind a drag-and-drop kanban view:
//! grouping tasks into ordered stage columns plus an unassigned bucket,
//! resolving pointer gestures into stage moves, issuing optimistic stage
//! reassignments with rollback on failure, and the single-open-section
//! task detail panel with mixed autosave/explicit-save semantics.
//!
//! # Architecture
//!
//! Stagehand follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory here;
//!   transport adapters live in the surrounding application)
//!
//! The core never talks to the network or the router directly: all data
//! access goes through the [`board::ports::BoardStore`] facade and all
//! navigation through [`board::ports::Navigator`].
//!
//! # Modules
//!
//! - [`board`]: Grouping, drag resolution, and the optimistic controller
//! - [`editor`]: The accordion-based task detail panel

pub mod board;
pub mod editor;
