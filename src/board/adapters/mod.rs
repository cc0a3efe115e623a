//! Adapter implementations of the board ports.
//!
//! Only the in-memory adapters live in this crate; real transport adapters
//! (GraphQL gateway, application router) are provided by the surrounding
//! application against the same port contracts.

pub mod memory;
