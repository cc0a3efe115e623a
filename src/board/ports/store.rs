//! Data-access port for the board: list, update, and delete over the task
//! and stage resources.
//!
//! The board core is transport-agnostic: any conforming implementation
//! (GraphQL gateway, REST client, in-memory test store) satisfies this
//! contract. Credentials are an explicit constructor input of the adapter,
//! never ambient process state.

use crate::board::domain::{Stage, Task, TaskId, TaskPatch, UserRef};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for board store operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// Errors surfaced by board store implementations.
///
/// All three remote-failure classes follow the same rollback path in the
/// controller; only the user-facing message differs. Auth escalation (and
/// toast rendering) belongs to the surrounding shell.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// Network unreachable, timeout, or other transport-level failure.
    #[error("transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The session credential was rejected.
    #[error("authorization rejected: {0}")]
    Auth(String),

    /// The server rejected the submitted values, e.g. a stage deleted
    /// concurrently.
    #[error("validation rejected: {0}")]
    Validation(String),

    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

impl BoardStoreError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

/// Explicit session credential handed to store adapters at construction.
///
/// Threading the credential through construction keeps session state out of
/// ambient globals; the adapter presents it on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials(String);

impl Credentials {
    /// Creates a credential from an opaque token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the opaque token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// Query contract for listing stages.
///
/// Implementations must return stages sorted by `created_at` ascending
/// (the fixed column order). When `titles` is non-empty only stages whose
/// title is in the set are returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageQuery {
    titles: Vec<String>,
}

impl StageQuery {
    /// Creates an unfiltered stage query.
    #[must_use]
    pub const fn new() -> Self {
        Self { titles: Vec::new() }
    }

    /// Restricts the query to stages with one of the given titles.
    #[must_use]
    pub fn with_titles(mut self, titles: impl IntoIterator<Item = String>) -> Self {
        self.titles = titles.into_iter().collect();
        self
    }

    /// Returns the allowed-title filter; empty means no filter.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Returns `true` when the given title passes the filter.
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        self.titles.is_empty() || self.titles.iter().any(|allowed| allowed == title)
    }
}

/// Query contract for listing tasks.
///
/// Implementations must return every task (no pagination) sorted by due
/// date ascending with undated tasks last; the board groups but never
/// sorts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery;

impl TaskQuery {
    /// Creates the task query.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Data-access contract consumed by the board controller and task editor.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Lists stages per the [`StageQuery`] contract.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardStoreError`] on transport or authorization failure.
    async fn list_stages(&self, query: &StageQuery) -> BoardStoreResult<Vec<Stage>>;

    /// Lists tasks per the [`TaskQuery`] contract.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardStoreError`] on transport or authorization failure.
    async fn list_tasks(&self, query: &TaskQuery) -> BoardStoreResult<Vec<Task>>;

    /// Fetches a single task, `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardStoreError`] on transport or authorization failure.
    async fn find_task(&self, id: TaskId) -> BoardStoreResult<Option<Task>>;

    /// Applies a partial update and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::NotFound`] for an unknown task,
    /// [`BoardStoreError::Validation`] when the server rejects the values,
    /// or a transport/authorization failure.
    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> BoardStoreResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::NotFound`] for an unknown task, or a
    /// transport/authorization failure.
    async fn delete_task(&self, id: TaskId) -> BoardStoreResult<()>;

    /// Lists assignable users for the users select, in a stable order.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardStoreError`] on transport or authorization failure.
    async fn list_users(&self) -> BoardStoreResult<Vec<UserRef>>;
}
