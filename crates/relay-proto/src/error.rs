//! Common error types for the Relay workspace.

use thiserror::Error;

/// Errors surfaced by the Relay core crates.
///
/// Invocation failures are deliberately absent: a tool that exits non-zero,
/// times out, or fails to launch is recorded on its `Tool` record and fed
/// into the fallback decision. Only the terminal outcomes of a whole
/// operation appear here.
#[derive(Debug, Error)]
pub enum Error {
    /// A tool name or field failed validation.
    #[error("{0}")]
    Validation(String),

    /// A tool name was referenced that does not exist in the store.
    #[error("Tool \"{0}\" not found")]
    NotFound(String),

    /// A benchmark was required but produced no working tool.
    #[error("No tools passed the benchmark")]
    NoCandidates,

    /// The best tool and every viable fallback candidate failed.
    #[error("All tools failed to provide a response")]
    AllToolsFailed,

    /// An imported configuration file could not be parsed.
    #[error("Invalid configuration file: {0}")]
    ImportFormat(String),

    /// Underlying filesystem failure from the store or import/export.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;
