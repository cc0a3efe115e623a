//! Unit tests for the editor context.

mod editor_tests;
