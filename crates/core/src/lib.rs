//! Core library for vtest
//!
//! Feature version parsing, manifest scanning, cumulative feature resolution,
//! test command execution, logging, and error handling.

pub mod config;
pub mod errors;
pub mod logging;
pub mod manifest;
pub mod plan;
pub mod resolve;
pub mod runner;
pub mod version;

