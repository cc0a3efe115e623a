//! In-memory adapters for the board ports.

mod navigation;
mod store;

pub use navigation::RecordingNavigator;
pub use store::InMemoryBoardStore;
