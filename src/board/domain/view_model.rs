//! Derived board view model and the stage-grouping derivation.

use super::{Stage, Task, TaskId};
use serde::{Deserialize, Serialize};

/// One rendered column: a stage and the tasks currently filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageColumn {
    /// The stage heading the column.
    pub stage: Stage,
    /// Tasks assigned to the stage, in incoming task order.
    pub tasks: Vec<Task>,
}

/// Derived board state: the unassigned bucket plus one column per stage.
///
/// This is a value, not a store: it is rebuilt from scratch by [`group`]
/// whenever either source collection changes and is owned exclusively by the
/// board controller. Child components receive clones and emit intents
/// upward instead of mutating it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardViewModel {
    /// Tasks with no stage, or whose stage no longer exists.
    pub unassigned: Vec<Task>,
    /// Stage columns in stage order.
    pub columns: Vec<StageColumn>,
}

impl BoardViewModel {
    /// Returns the total number of tasks across all buckets.
    #[must_use]
    pub fn task_count(&self) -> usize {
        let assigned: usize = self.columns.iter().map(|column| column.tasks.len()).sum();
        self.unassigned.len() + assigned
    }

    /// Finds a task in any bucket by id.
    #[must_use]
    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.unassigned
            .iter()
            .chain(self.columns.iter().flat_map(|column| column.tasks.iter()))
            .find(|task| task.id() == id)
    }
}

/// Partitions a flat task collection into per-stage buckets plus the
/// unassigned bucket.
///
/// Every task lands in exactly one bucket: its stage's column when the
/// stage exists, otherwise unassigned. A dangling `stage_id` (stage deleted
/// concurrently) is filed under unassigned without rewriting the task's
/// field. Relative task order within each bucket follows the input order;
/// callers sort beforehand (the store's task query sorts by due date).
///
/// Inputs are never mutated and the output is a fresh structure on every
/// call, so unchanged inputs yield structurally equal output. Collections
/// here are small (dozens), so re-derivation beats incremental patching.
#[must_use]
pub fn group(tasks: &[Task], stages: &[Stage]) -> BoardViewModel {
    let unassigned = tasks
        .iter()
        .filter(|task| {
            task.stage_id()
                .is_none_or(|id| !stages.iter().any(|stage| stage.id() == id))
        })
        .cloned()
        .collect();

    let columns = stages
        .iter()
        .map(|stage| StageColumn {
            stage: stage.clone(),
            tasks: tasks
                .iter()
                .filter(|task| task.stage_id() == Some(stage.id()))
                .cloned()
                .collect(),
        })
        .collect();

    BoardViewModel {
        unassigned,
        columns,
    }
}
