//! # relay-adapters
//!
//! Process-level plumbing for Relay: the [`ShellRunner`] implementation of
//! the `CommandRunner` contract. External AI CLIs are opaque shell command
//! strings; this crate spawns them, enforces the per-invocation timeout,
//! and reports exit status, timing, and captured output without ever
//! raising on a failed command.

mod shell;

pub use shell::ShellRunner;
