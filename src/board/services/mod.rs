//! Application services for the board.

mod controller;

pub use controller::{
    BoardConfig, BoardController, BoardServiceError, BoardServiceResult, BoardSnapshot,
};
