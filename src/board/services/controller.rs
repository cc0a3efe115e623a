//! Board controller: owns the reconciled view model and the optimistic
//! stage-reassignment protocol.

use crate::board::{
    domain::{BoardDomainError, BoardViewModel, DragResolution, Stage, StageId, Task, TaskMove,
        TaskPatch, group},
    ports::{BoardStore, BoardStoreError, Navigator, StageQuery, TaskQuery, task_edit_path},
};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::{RwLock, watch};
use tracing::{debug, warn};

/// Stage titles rendered as board columns. The query still sorts by
/// creation time; the filter only excludes ad hoc stages.
const DEFAULT_STAGE_TITLES: [&str; 4] = ["TODO", "IN PROGRESS", "IN REVIEW", "DONE"];

/// Board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Allowed-title filter applied to the stage query.
    #[serde(default = "default_stage_titles")]
    pub stage_titles: Vec<String>,
}

fn default_stage_titles() -> Vec<String> {
    DEFAULT_STAGE_TITLES.map(str::to_owned).to_vec()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            stage_titles: default_stage_titles(),
        }
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Published board state.
///
/// `Loading` until the first refresh lands both source collections; the
/// shell renders the column skeleton for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BoardSnapshot {
    /// Stages and/or tasks are still being fetched.
    #[default]
    Loading,
    /// Both collections loaded; the derived view model.
    Ready(BoardViewModel),
}

#[derive(Debug, Default)]
struct BoardState {
    stages: Vec<Stage>,
    tasks: Vec<Task>,
    applied_fetch: u64,
}

/// Owns the board view model and the mutation protocol around it.
///
/// The view model is mutated from exactly two places: a fresh grouping
/// derivation after a refresh, and the optimistic patch (or its rollback)
/// in [`on_drop`](Self::on_drop). Consumers subscribe to the published
/// snapshot instead of reaching into controller state.
pub struct BoardController<S, N, C>
where
    S: BoardStore,
    N: Navigator,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    navigator: Arc<N>,
    clock: Arc<C>,
    config: BoardConfig,
    state: RwLock<BoardState>,
    issued_fetches: AtomicU64,
    snapshot_tx: watch::Sender<BoardSnapshot>,
}

impl<S, N, C> BoardController<S, N, C>
where
    S: BoardStore,
    N: Navigator,
    C: Clock + Send + Sync,
{
    /// Creates a controller in the loading state.
    #[must_use]
    pub fn new(store: Arc<S>, navigator: Arc<N>, clock: Arc<C>, config: BoardConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(BoardSnapshot::Loading);
        Self {
            store,
            navigator,
            clock,
            config,
            state: RwLock::new(BoardState::default()),
            issued_fetches: AtomicU64::new(0),
            snapshot_tx,
        }
    }

    /// Subscribes to published board snapshots.
    ///
    /// The receiver observes the current value immediately and every
    /// subsequent derivation; consumers re-render from the slice they care
    /// about.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Returns the currently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Fetches both source collections and re-derives the view model.
    ///
    /// Completions of superseded refreshes are discarded (last fetch wins):
    /// a slow response must not overwrite state derived from a newer fetch,
    /// nor clobber a later optimistic patch with stale collections.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when either list call fails; no
    /// partial state is applied.
    pub async fn refresh(&self) -> BoardServiceResult<()> {
        let ticket = self.issued_fetches.fetch_add(1, Ordering::SeqCst) + 1;
        let stage_query = StageQuery::new().with_titles(self.config.stage_titles.iter().cloned());
        let stages = self.store.list_stages(&stage_query).await?;
        let tasks = self.store.list_tasks(&TaskQuery::new()).await?;

        let mut state = self.state.write().await;
        let newest = self.issued_fetches.load(Ordering::SeqCst);
        if ticket != newest || ticket <= state.applied_fetch {
            debug!(ticket, newest, "discarding superseded fetch");
            return Ok(());
        }
        state.applied_fetch = ticket;
        state.stages = stages;
        state.tasks = tasks;
        debug!(
            ticket,
            stages = state.stages.len(),
            tasks = state.tasks.len(),
            "applied refresh"
        );
        self.publish(&state);
        Ok(())
    }

    /// Handles the resolution of a drag session.
    ///
    /// No-op resolutions issue no request. A click navigates to the task's
    /// detail view. A move is applied optimistically before the store round
    /// trip; on any failure the task reverts to its source stage and the
    /// error is returned for the shell's notification layer. The board
    /// itself never crashes on a failed mutation and nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the stage update is
    /// rejected; local state has already been rolled back by then.
    pub async fn on_drop(&self, resolution: DragResolution) -> BoardServiceResult<()> {
        match resolution {
            DragResolution::Ignored | DragResolution::NoChange => Ok(()),
            DragResolution::Clicked(task_id) => {
                self.navigator.replace(&task_edit_path(task_id));
                Ok(())
            }
            DragResolution::Moved(task_move) => self.apply_move(task_move).await,
        }
    }

    /// Navigates to the task-creation view for the given stage.
    ///
    /// Local state is untouched: creation happens out of process and a
    /// later refresh picks up the new task.
    pub fn add_task(&self, stage_id: Option<StageId>) {
        self.navigator.go_to_create(stage_id);
    }

    async fn apply_move(&self, task_move: TaskMove) -> BoardServiceResult<()> {
        {
            let mut state = self.state.write().await;
            let Some(task) = find_task_mut(&mut state.tasks, task_move) else {
                // The task disappeared between derivation and drop (stale
                // resolution after a refresh); nothing to move.
                debug!(task_id = %task_move.task_id, "dropped task no longer present");
                return Ok(());
            };
            task.assign_stage(task_move.target_stage_id, &*self.clock);
            self.publish(&state);
        }

        let patch = TaskPatch::new().with_stage(task_move.target_stage_id);
        match self.store.update_task(task_move.task_id, patch).await {
            // The optimistic state already reflects the outcome; a
            // background refresh reconciles with server truth later.
            Ok(_) => Ok(()),
            Err(err) => {
                let mut state = self.state.write().await;
                if let Some(task) = find_task_mut(&mut state.tasks, task_move) {
                    task.assign_stage(task_move.source_stage_id, &*self.clock);
                    self.publish(&state);
                }
                warn!(
                    task_id = %task_move.task_id,
                    error = %err,
                    "stage update rejected, rolled back"
                );
                Err(err.into())
            }
        }
    }

    fn publish(&self, state: &BoardState) {
        let view = group(&state.tasks, &state.stages);
        self.snapshot_tx.send_replace(BoardSnapshot::Ready(view));
    }
}

fn find_task_mut(tasks: &mut [Task], task_move: TaskMove) -> Option<&mut Task> {
    tasks.iter_mut().find(|task| task.id() == task_move.task_id)
}
