//! Application services for the task detail panel.

mod task_editor;

pub use task_editor::{EditorError, EditorResult, TaskEditor};
