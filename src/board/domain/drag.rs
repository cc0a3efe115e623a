//! Drag session state machine for pointer-driven task relocation.
//!
//! The session is pure state: the surrounding shell feeds it pointer events
//! and reads the resolution on release. It never touches the store; the
//! board controller receives the resolution and decides whether a mutation
//! is issued.

use super::{StageId, TaskId};
use serde::{Deserialize, Serialize};

/// Pointer travel (in logical pixels) required before a press becomes a
/// drag rather than a click.
pub const ACTIVATION_DISTANCE: i64 = 5;

/// A pointer position in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPoint {
    /// Horizontal position.
    pub x: i64,
    /// Vertical position.
    pub y: i64,
}

impl PointerPoint {
    /// Creates a pointer position.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    ///
    /// Squared comparison keeps the activation check in integer space.
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> i64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A column the pointer can hover over during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropColumn {
    /// The virtual column holding tasks with no stage.
    Unassigned,
    /// A concrete stage column.
    Stage(StageId),
}

impl DropColumn {
    /// Normalizes the column to a stage assignment: the unassigned column
    /// becomes `None`.
    #[must_use]
    pub const fn stage_id(self) -> Option<StageId> {
        match self {
            Self::Unassigned => None,
            Self::Stage(id) => Some(id),
        }
    }
}

/// An actionable relocation produced by a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMove {
    /// The task being relocated.
    pub task_id: TaskId,
    /// Stage the task came from; `None` for the unassigned bucket.
    pub source_stage_id: Option<StageId>,
    /// Stage the task was dropped on; `None` for the unassigned bucket.
    pub target_stage_id: Option<StageId>,
}

/// Outcome of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragResolution {
    /// Released without a preceding press; nothing to do.
    Ignored,
    /// Released before the activation threshold: a plain click, which must
    /// still open the task detail view.
    Clicked(TaskId),
    /// The drag ended without an actionable move: dropped outside any
    /// column, dropped on its own column, or cancelled. No mutation may be
    /// issued.
    NoChange,
    /// The drag ended over a different column.
    Moved(TaskMove),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    Pressed {
        task_id: TaskId,
        source_stage_id: Option<StageId>,
        origin: PointerPoint,
    },
    Dragging {
        task_id: TaskId,
        source_stage_id: Option<StageId>,
        pointer: PointerPoint,
        hover: Option<DropColumn>,
    },
}

/// Tracks one in-progress pointer gesture over the board.
///
/// Lifecycle: [`press`](Self::press) on pointer-down,
/// [`pointer_moved`](Self::pointer_moved) on every move (activation happens
/// past [`ACTIVATION_DISTANCE`]), then either [`release`](Self::release)
/// or [`cancel`](Self::cancel). The session always returns to idle after
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    state: DragState,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DragSession {
    /// Creates an idle session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Records a pointer press on a task card.
    ///
    /// A press while a gesture is already in flight restarts the session;
    /// platforms deliver a cancel first, but a lost event must not wedge
    /// the machine.
    pub const fn press(
        &mut self,
        task_id: TaskId,
        source_stage_id: Option<StageId>,
        at: PointerPoint,
    ) {
        self.state = DragState::Pressed {
            task_id,
            source_stage_id,
            origin: at,
        };
    }

    /// Feeds a pointer move, with the column currently under the pointer.
    ///
    /// While pressed, travel past the activation threshold promotes the
    /// press to a drag. While dragging, updates the tracked pointer (for
    /// the floating overlay) and the hover target. Returns `true` when the
    /// session is dragging after the move.
    pub const fn pointer_moved(&mut self, at: PointerPoint, over: Option<DropColumn>) -> bool {
        match self.state {
            DragState::Idle => false,
            DragState::Pressed {
                task_id,
                source_stage_id,
                origin,
            } => {
                if origin.distance_squared(at) >= ACTIVATION_DISTANCE * ACTIVATION_DISTANCE {
                    self.state = DragState::Dragging {
                        task_id,
                        source_stage_id,
                        pointer: at,
                        hover: over,
                    };
                    true
                } else {
                    false
                }
            }
            DragState::Dragging {
                task_id,
                source_stage_id,
                ..
            } => {
                self.state = DragState::Dragging {
                    task_id,
                    source_stage_id,
                    pointer: at,
                    hover: over,
                };
                true
            }
        }
    }

    /// Resolves a pointer release and resets the session.
    ///
    /// A sub-threshold release is a click. A drop resolves to
    /// [`DragResolution::Moved`] only when the pointer is over a column
    /// different from the source; dropping on the source column or outside
    /// any column is the no-op guard.
    pub fn release(&mut self) -> DragResolution {
        let resolution = match self.state {
            DragState::Idle => DragResolution::Ignored,
            DragState::Pressed { task_id, .. } => DragResolution::Clicked(task_id),
            DragState::Dragging {
                task_id,
                source_stage_id,
                hover,
                ..
            } => hover.map_or(DragResolution::NoChange, |column| {
                let target_stage_id = column.stage_id();
                if target_stage_id == source_stage_id {
                    DragResolution::NoChange
                } else {
                    DragResolution::Moved(TaskMove {
                        task_id,
                        source_stage_id,
                        target_stage_id,
                    })
                }
            }),
        };
        self.state = DragState::Idle;
        resolution
    }

    /// Cancels the gesture (escape, platform cancel, pointer left the
    /// surface) and resets the session. The dragged card's position is
    /// visually restored by the shell.
    pub const fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Returns the task currently being dragged, for dimming the in-place
    /// card and labelling the overlay.
    #[must_use]
    pub const fn active_task(&self) -> Option<TaskId> {
        match self.state {
            DragState::Dragging { task_id, .. } => Some(task_id),
            DragState::Idle | DragState::Pressed { .. } => None,
        }
    }

    /// Returns the tracked pointer position while dragging, for placing the
    /// floating overlay.
    #[must_use]
    pub const fn pointer_position(&self) -> Option<PointerPoint> {
        match self.state {
            DragState::Dragging { pointer, .. } => Some(pointer),
            DragState::Idle | DragState::Pressed { .. } => None,
        }
    }

    /// Returns `true` while a drag (not a mere press) is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}
