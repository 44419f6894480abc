//! # relay-proto
//!
//! Shared types, error definitions, and traits for the Relay workspace.
//!
//! This crate provides the foundational abstractions used across all Relay
//! crates, including:
//! - The `Tool` record and its tri-state run outcome
//! - The `ToolStore` persistence contract
//! - The `CommandRunner` process-execution contract
//! - Tool name validation
//! - Common error types

mod error;
mod runner;
mod store;
mod tool;
mod validate;

pub use error::{Error, Result};
pub use runner::{CommandRunner, RUN_TIMEOUT_MS, RunReport, StdioMode, round2};
pub use store::ToolStore;
pub use tool::{RunOutcome, Snapshot, Tool};
pub use validate::validate_tool_name;
