//! # relay-core
//!
//! The selection and execution core for Relay.
//!
//! This crate provides:
//! - The benchmark pass that probes every tool and elects the fastest
//! - The adaptive answer flow with ranked fallback across known-good tools
//! - The single-tool invocation wrapper
//! - The JSON-file `ToolStore` implementation
//! - Fuzzy search over the tool collection
//! - Snapshot import/export

mod engine;
mod find;
mod store;
mod transfer;

pub use engine::{
    Answer, BestPick, CheckOptions, CheckOutcome, Engine, NullReporter, PROBE_PROMPT, Reporter,
};
pub use find::{fuzzy_score, search_tools};
pub use store::JsonStore;
pub use transfer::{export_snapshot, import_snapshot};
