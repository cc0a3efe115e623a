//! Recording navigator for tests.

use crate::board::ports::Navigator;
use std::sync::{Mutex, PoisonError};

/// Navigator that records every replaced path instead of routing.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Creates a navigator with no recorded paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded paths in navigation order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_owned());
    }
}
