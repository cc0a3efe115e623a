//! Task aggregate root and partial-update patch.

use super::{BoardDomainError, StageId, TaskId, UserRef};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// `stage_id` of `None` means the task sits in the unassigned bucket. A
/// `stage_id` referencing a stage that no longer exists is tolerated:
/// grouping files the task under unassigned without rewriting the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    completed: bool,
    stage_id: Option<StageId>,
    users: Vec<UserRef>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted stage assignment, if any.
    pub stage_id: Option<StageId>,
    /// Persisted assigned users in assignment order.
    pub users: Vec<UserRef>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the given stage (or unassigned).
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        title: impl Into<String>,
        stage_id: Option<StageId>,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            description: None,
            due_date: None,
            completed: false,
            stage_id,
            users: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// Assigned users are de-duplicated by id, keeping first occurrence
    /// order.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            completed: data.completed,
            stage_id: data.stage_id,
            users: dedupe_users(data.users),
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns whether the task is marked complete.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the stage assignment, `None` for unassigned.
    #[must_use]
    pub const fn stage_id(&self) -> Option<StageId> {
        self.stage_id
    }

    /// Returns the assigned users in assignment order.
    #[must_use]
    pub fn users(&self) -> &[UserRef] {
        &self.users
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to another stage (or unassigned) and touches
    /// `updated_at`.
    ///
    /// This is the optimistic-update entry point: the controller applies it
    /// locally before the store round trip completes and reverses it with a
    /// second call on failure.
    pub fn assign_stage(&mut self, stage_id: Option<StageId>, clock: &impl Clock) {
        self.stage_id = stage_id;
        self.touch(clock);
    }

    /// Applies a partial update and touches `updated_at`.
    ///
    /// Empty patches leave the task untouched, including the timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the patch carries an
    /// empty title; no other field is applied in that case.
    pub fn apply(&mut self, patch: &TaskPatch, clock: &impl Clock) -> Result<(), BoardDomainError> {
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(BoardDomainError::EmptyTaskTitle);
            }
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(stage_id) = patch.stage_id {
            self.stage_id = stage_id;
        }
        if let Some(users) = &patch.users {
            self.users = dedupe_users(users.clone());
        }
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Removes duplicate user references by id, keeping first occurrence order.
fn dedupe_users(users: Vec<UserRef>) -> Vec<UserRef> {
    let mut seen = Vec::with_capacity(users.len());
    let mut deduped = Vec::with_capacity(users.len());
    for user in users {
        if seen.contains(&user.id()) {
            continue;
        }
        seen.push(user.id());
        deduped.push(user);
    }
    deduped
}

/// Partial task update submitted through the data-access facade.
///
/// Clearable fields (`description`, `due_date`, `stage_id`) use a nested
/// `Option`: the outer level marks field presence in the patch, the inner
/// level carries the new value where `None` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage_id: Option<Option<StageId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    users: Option<Vec<UserRef>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets or clears the stage assignment.
    #[must_use]
    pub const fn with_stage(mut self, stage_id: Option<StageId>) -> Self {
        self.stage_id = Some(stage_id);
        self
    }

    /// Replaces the assigned user set.
    #[must_use]
    pub fn with_users(mut self, users: impl IntoIterator<Item = UserRef>) -> Self {
        self.users = Some(users.into_iter().collect());
        self
    }

    /// Returns `true` when the patch carries no field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
            && self.stage_id.is_none()
            && self.users.is_none()
    }

    /// Returns the patched title, if present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the patched stage assignment, if present.
    #[must_use]
    pub const fn stage_id(&self) -> Option<Option<StageId>> {
        self.stage_id
    }
}
