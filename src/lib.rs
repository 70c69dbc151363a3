//! AUMVION — simulated self-healing security platform.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod catalog;
pub mod analyst;
pub mod session;
pub mod engine;
pub mod dashboard;
