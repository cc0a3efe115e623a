//! In-memory board store for tests and local wiring.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{Stage, Task, TaskId, TaskPatch, UserRef},
    ports::{BoardStore, BoardStoreError, BoardStoreResult, Credentials, StageQuery, TaskQuery},
};

#[derive(Debug, Default)]
struct StoreState {
    stages: Vec<Stage>,
    tasks: HashMap<TaskId, Task>,
    users: Vec<UserRef>,
    update_calls: u64,
    next_update_failure: Option<BoardStoreError>,
}

/// Thread-safe in-memory implementation of the board store port.
///
/// Honors both query contracts: stage listing filters by title and sorts by
/// creation time ascending; task listing sorts by due date ascending with
/// undated tasks last. Credentials are checked on every call when the store
/// was built with an expected credential, mirroring a real gateway's
/// per-request session check.
pub struct InMemoryBoardStore<C> {
    presented: Credentials,
    expected: Option<Credentials>,
    clock: Arc<C>,
    state: Arc<RwLock<StoreState>>,
}

// Manual impl: a derive would demand `C: Clone`, but the clock is only ever
// held behind an `Arc`. Clones share the underlying state.
impl<C> Clone for InMemoryBoardStore<C> {
    fn clone(&self) -> Self {
        Self {
            presented: self.presented.clone(),
            expected: self.expected.clone(),
            clock: Arc::clone(&self.clock),
            state: Arc::clone(&self.state),
        }
    }
}

impl<C> InMemoryBoardStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store that accepts any credential.
    #[must_use]
    pub fn new(credentials: Credentials, clock: Arc<C>) -> Self {
        Self {
            presented: credentials,
            expected: None,
            clock,
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    /// Creates an empty store that rejects every call whose presented
    /// credential differs from `expected`.
    #[must_use]
    pub fn with_expected_credentials(
        credentials: Credentials,
        expected: Credentials,
        clock: Arc<C>,
    ) -> Self {
        Self {
            presented: credentials,
            expected: Some(expected),
            clock,
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    /// Seeds a stage.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn seed_stage(&self, stage: Stage) -> BoardStoreResult<()> {
        self.write_state()?.stages.push(stage);
        Ok(())
    }

    /// Seeds a task.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn seed_task(&self, task: Task) -> BoardStoreResult<()> {
        self.write_state()?.tasks.insert(task.id(), task);
        Ok(())
    }

    /// Seeds an assignable user.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn seed_user(&self, user: UserRef) -> BoardStoreResult<()> {
        self.write_state()?.users.push(user);
        Ok(())
    }

    /// Queues an error returned by the next `update_task` call.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn fail_next_update(&self, error: BoardStoreError) -> BoardStoreResult<()> {
        self.write_state()?.next_update_failure = Some(error);
        Ok(())
    }

    /// Returns how many `update_task` calls reached the store, including
    /// injected failures.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the state lock is poisoned.
    pub fn update_calls(&self) -> BoardStoreResult<u64> {
        Ok(self.read_state()?.update_calls)
    }

    fn read_state(&self) -> BoardStoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|err| BoardStoreError::transport(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> BoardStoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|err| BoardStoreError::transport(std::io::Error::other(err.to_string())))
    }

    fn authorize(&self) -> BoardStoreResult<()> {
        match &self.expected {
            Some(expected) if *expected != self.presented => {
                Err(BoardStoreError::Auth("invalid session token".to_owned()))
            }
            _ => Ok(()),
        }
    }
}

/// Validates that a patched stage assignment still references a live stage.
fn validate_stage_reference(state: &StoreState, patch: &TaskPatch) -> BoardStoreResult<()> {
    if let Some(Some(stage_id)) = patch.stage_id() {
        if !state.stages.iter().any(|stage| stage.id() == stage_id) {
            return Err(BoardStoreError::Validation(format!(
                "stage no longer exists: {stage_id}"
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl<C> BoardStore for InMemoryBoardStore<C>
where
    C: Clock + Send + Sync,
{
    async fn list_stages(&self, query: &StageQuery) -> BoardStoreResult<Vec<Stage>> {
        self.authorize()?;
        let state = self.read_state()?;
        let mut stages: Vec<Stage> = state
            .stages
            .iter()
            .filter(|stage| query.matches(stage.title()))
            .cloned()
            .collect();
        stages.sort_by_key(Stage::created_at);
        Ok(stages)
    }

    async fn list_tasks(&self, _query: &TaskQuery) -> BoardStoreResult<Vec<Task>> {
        self.authorize()?;
        let state = self.read_state()?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        // Due date ascending, undated tasks last, creation time as the tie
        // breaker for a deterministic order.
        tasks.sort_by_key(|task| {
            (
                task.due_date().is_none(),
                task.due_date(),
                task.created_at(),
            )
        });
        Ok(tasks)
    }

    async fn find_task(&self, id: TaskId) -> BoardStoreResult<Option<Task>> {
        self.authorize()?;
        Ok(self.read_state()?.tasks.get(&id).cloned())
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> BoardStoreResult<Task> {
        self.authorize()?;
        let mut state = self.write_state()?;
        state.update_calls += 1;
        if let Some(failure) = state.next_update_failure.take() {
            return Err(failure);
        }
        validate_stage_reference(&state, &patch)?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(BoardStoreError::NotFound(id))?;
        task.apply(&patch, &*self.clock)
            .map_err(|err| BoardStoreError::Validation(err.to_string()))?;
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> BoardStoreResult<()> {
        self.authorize()?;
        let mut state = self.write_state()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(BoardStoreError::NotFound(id))
    }

    async fn list_users(&self) -> BoardStoreResult<Vec<UserRef>> {
        self.authorize()?;
        Ok(self.read_state()?.users.clone())
    }
}
