//! Task editor service: the detail panel's state and save protocol.

use crate::board::{
    domain::{BoardDomainError, Stage, StageId, Task, TaskId, TaskPatch, UserRef},
    ports::{BoardStore, BoardStoreError, Navigator, StageQuery, task_list_path},
};
use crate::editor::domain::{Accordion, SectionDraft, SectionKey};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors surfaced by the task editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The task's data is still being fetched; no section is interactive
    /// yet.
    #[error("task detail is still loading")]
    Loading,

    /// The edited task does not exist (deleted concurrently, or a stale
    /// route).
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A draft setter or save addressed a section that is not open.
    #[error("section {} is not open", .0.as_str())]
    SectionNotOpen(SectionKey),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

/// Result type for task editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Component-local state of one task detail view.
///
/// Holds the loaded task snapshot, the accordion, the open section's draft,
/// and the save-error slot. State is never shared across tasks: a new task
/// identity means a new editor (everything reset to closed).
///
/// Save semantics follow the per-field policy table
/// ([`crate::editor::domain::policy`]): title, stage, and completed
/// autosave immediately; description, due date, and users buffer in a
/// draft until an explicit save, which closes the section on success and
/// keeps it open with the error stashed on failure.
pub struct TaskEditor<S, N>
where
    S: BoardStore,
    N: Navigator,
{
    store: Arc<S>,
    navigator: Arc<N>,
    task_id: TaskId,
    task: Option<Task>,
    accordion: Accordion,
    draft: Option<SectionDraft>,
    save_error: Option<BoardStoreError>,
}

impl<S, N> TaskEditor<S, N>
where
    S: BoardStore,
    N: Navigator,
{
    /// Creates an editor in the loading state for the given task.
    #[must_use]
    pub const fn new(store: Arc<S>, navigator: Arc<N>, task_id: TaskId) -> Self {
        Self {
            store,
            navigator,
            task_id,
            task: None,
            accordion: Accordion::new(),
            draft: None,
            save_error: None,
        }
    }

    /// Fetches the task and leaves the panel interactive.
    ///
    /// Also resets accordion, draft, and error state, so re-loading after a
    /// task-identity change starts from all-closed.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] when the task does not exist, or
    /// [`EditorError::Store`] on transport/authorization failure; the panel
    /// stays in the loading state in both cases.
    pub async fn load(&mut self) -> EditorResult<()> {
        let task = self
            .store
            .find_task(self.task_id)
            .await?
            .ok_or(EditorError::NotFound(self.task_id))?;
        self.task = Some(task);
        self.accordion = Accordion::new();
        self.draft = None;
        self.save_error = None;
        Ok(())
    }

    /// Returns `true` while the task is still being fetched; every section
    /// renders a skeleton and nothing is interactive.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.task.is_none()
    }

    /// Returns the loaded task snapshot.
    #[must_use]
    pub const fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    /// Returns the open accordion section, if any.
    #[must_use]
    pub const fn open_section(&self) -> Option<SectionKey> {
        self.accordion.open_section()
    }

    /// Returns the open section's pending draft, if any.
    #[must_use]
    pub const fn draft(&self) -> Option<&SectionDraft> {
        self.draft.as_ref()
    }

    /// Returns the last save failure of the open section, kept until the
    /// user retries, cancels, or switches sections.
    #[must_use]
    pub const fn save_error(&self) -> Option<&BoardStoreError> {
        self.save_error.as_ref()
    }

    /// Toggles an accordion section and returns the section open after the
    /// transition.
    ///
    /// Opening a section seeds its draft from the task's current value;
    /// any transition discards the previous draft and clears the error
    /// slot.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Loading`] before [`load`](Self::load)
    /// completes.
    pub fn toggle(&mut self, section: SectionKey) -> EditorResult<Option<SectionKey>> {
        let task = self.task.as_ref().ok_or(EditorError::Loading)?;
        let open = self.accordion.toggle(section);
        self.draft = open.map(|key| SectionDraft::seed(key, task));
        self.save_error = None;
        Ok(open)
    }

    /// Buffers a description edit; requires the description section open.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SectionNotOpen`] otherwise.
    pub fn draft_description(&mut self, description: Option<String>) -> EditorResult<()> {
        match &mut self.draft {
            Some(SectionDraft::Description(value)) => {
                *value = description;
                Ok(())
            }
            _ => Err(EditorError::SectionNotOpen(SectionKey::Description)),
        }
    }

    /// Buffers a due date edit; requires the due date section open.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SectionNotOpen`] otherwise.
    pub fn draft_due_date(&mut self, due_date: Option<DateTime<Utc>>) -> EditorResult<()> {
        match &mut self.draft {
            Some(SectionDraft::DueDate(value)) => {
                *value = due_date;
                Ok(())
            }
            _ => Err(EditorError::SectionNotOpen(SectionKey::DueDate)),
        }
    }

    /// Buffers an assigned-users edit; requires the users section open.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SectionNotOpen`] otherwise.
    pub fn draft_users(&mut self, users: impl IntoIterator<Item = UserRef>) -> EditorResult<()> {
        match &mut self.draft {
            Some(SectionDraft::Users(value)) => {
                *value = users.into_iter().collect();
                Ok(())
            }
            _ => Err(EditorError::SectionNotOpen(SectionKey::Users)),
        }
    }

    /// Saves the open section's draft.
    ///
    /// On success the snapshot is replaced with the task returned by the
    /// store and the section closes back to its read-only summary. On
    /// failure the section stays open with the pending draft intact and
    /// the error stashed for retry or cancel.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SectionNotOpen`] when no section is open, or
    /// the store failure that was stashed.
    pub async fn save_open_section(&mut self) -> EditorResult<()> {
        let Some(draft) = self.draft.clone() else {
            return Err(match self.accordion.open_section() {
                Some(section) => EditorError::SectionNotOpen(section),
                None => EditorError::Loading,
            });
        };
        let section = draft.section();
        match self.store.update_task(self.task_id, draft.into_patch()).await {
            Ok(task) => {
                debug!(task_id = %self.task_id, section = section.as_str(), "section saved");
                self.task = Some(task);
                self.accordion.close();
                self.draft = None;
                self.save_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(
                    task_id = %self.task_id,
                    section = section.as_str(),
                    error = %err,
                    "section save rejected"
                );
                self.save_error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    /// Discards the open section's pending edits and closes it without
    /// issuing any request.
    pub fn cancel(&mut self) {
        self.accordion.close();
        self.draft = None;
        self.save_error = None;
    }

    /// Autosaves a title change (no debounce, no section involved).
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Domain`] for an empty title without issuing a
    /// request, [`EditorError::Loading`] before load, or the store failure
    /// (the local snapshot is left untouched so the inline field can
    /// retry).
    pub async fn rename(&mut self, title: impl Into<String>) -> EditorResult<()> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle.into());
        }
        self.autosave(TaskPatch::new().with_title(title)).await
    }

    /// Autosaves a stage reassignment from the pinned stage row.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Loading`] before load, or the store failure.
    pub async fn set_stage(&mut self, stage_id: Option<StageId>) -> EditorResult<()> {
        self.autosave(TaskPatch::new().with_stage(stage_id)).await
    }

    /// Autosaves the completion flag from the pinned stage row.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Loading`] before load, or the store failure.
    pub async fn set_completed(&mut self, completed: bool) -> EditorResult<()> {
        self.autosave(TaskPatch::new().with_completed(completed)).await
    }

    /// Deletes the task and navigates back to the board.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Loading`] before load, or the store failure;
    /// navigation only happens after a successful delete.
    pub async fn delete(&mut self) -> EditorResult<()> {
        if self.task.is_none() {
            return Err(EditorError::Loading);
        }
        self.store.delete_task(self.task_id).await?;
        self.navigator.replace(task_list_path());
        Ok(())
    }

    /// Lists the stages offered by the stage select, per the given query.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] when the listing fails.
    pub async fn stage_options(&self, query: &StageQuery) -> EditorResult<Vec<Stage>> {
        Ok(self.store.list_stages(query).await?)
    }

    /// Lists the users offered by the users select.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] when the listing fails.
    pub async fn user_options(&self) -> EditorResult<Vec<UserRef>> {
        Ok(self.store.list_users().await?)
    }

    async fn autosave(&mut self, patch: TaskPatch) -> EditorResult<()> {
        if self.task.is_none() {
            return Err(EditorError::Loading);
        }
        let task = self.store.update_task(self.task_id, patch).await?;
        self.task = Some(task);
        Ok(())
    }
}
