//! Navigation port: the board never talks to the router directly.

use crate::board::domain::{StageId, TaskId};

/// Returns the route of the task list (the board itself).
#[must_use]
pub const fn task_list_path() -> &'static str {
    "/tasks"
}

/// Returns the route of the task-creation view, carrying the target stage
/// when one was chosen.
#[must_use]
pub fn task_create_path(stage_id: Option<StageId>) -> String {
    stage_id.map_or_else(
        || "/tasks/new".to_owned(),
        |id| format!("/tasks/new?stageId={id}"),
    )
}

/// Returns the route of a task's detail/edit view.
#[must_use]
pub fn task_edit_path(task_id: TaskId) -> String {
    format!("/tasks/edit/{task_id}")
}

/// Routing contract consumed by the board controller and task editor.
pub trait Navigator: Send + Sync {
    /// Replaces the current location with the given path.
    fn replace(&self, path: &str);

    /// Navigates to the task-creation view for the given stage (`None` for
    /// unassigned). Creation happens out of process; a later refresh picks
    /// up the new task.
    fn go_to_create(&self, stage_id: Option<StageId>) {
        self.replace(&task_create_path(stage_id));
    }
}
