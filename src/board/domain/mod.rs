//! Domain model for the stage-based task board.
//!
//! Pure business values and state machines: identifiers, the task and stage
//! aggregates, the derived board view model with its grouping derivation,
//! and the drag session. No infrastructure concern crosses this boundary.

mod drag;
mod error;
mod ids;
mod stage;
mod task;
mod user;
mod view_model;

pub use drag::{
    ACTIVATION_DISTANCE, DragResolution, DragSession, DropColumn, PointerPoint, TaskMove,
};
pub use error::BoardDomainError;
pub use ids::{StageId, TaskId, UserId};
pub use stage::{PersistedStageData, Stage};
pub use task::{PersistedTaskData, Task, TaskPatch};
pub use user::UserRef;
pub use view_model::{BoardViewModel, StageColumn, group};
