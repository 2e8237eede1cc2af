//! Command implementations
//!
//! `run` resolves and executes the tests for a version; `list` prints the
//! declared versions.

pub mod list;
pub mod run;
