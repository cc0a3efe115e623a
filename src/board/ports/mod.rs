//! Port contracts for the board.
//!
//! Ports define infrastructure-agnostic interfaces: the data-access facade
//! over tasks, stages, and users, and the navigation facade over the router.

pub mod navigation;
pub mod store;

pub use navigation::{Navigator, task_create_path, task_edit_path, task_list_path};
pub use store::{
    BoardStore, BoardStoreError, BoardStoreResult, Credentials, StageQuery, TaskQuery,
};
