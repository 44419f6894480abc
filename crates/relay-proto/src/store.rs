//! The persistence contract for the tool collection and best pointer.

use crate::{Result, Snapshot, Tool};

/// Persists the ordered tool collection and the single `best` pointer.
///
/// The store is deliberately dumb: name uniqueness and validity are the
/// caller's job (see [`crate::validate_tool_name`]). The selection core
/// holds no state of its own and operates on a handle to one of these,
/// which keeps it testable against a throwaway store.
pub trait ToolStore {
    /// All tools in insertion order.
    fn tools(&self) -> Vec<Tool>;

    /// Looks up a single tool by name.
    fn tool(&self, name: &str) -> Option<Tool>;

    /// True if a tool with this name exists.
    fn contains(&self, name: &str) -> bool {
        self.tool(name).is_some()
    }

    /// Appends a tool to the collection.
    fn add_tool(&mut self, tool: Tool) -> Result<()>;

    /// Applies `apply` to the named tool and persists. Returns false when
    /// no tool has that name.
    fn update_tool<F>(&mut self, name: &str, apply: F) -> Result<bool>
    where
        F: FnOnce(&mut Tool),
        Self: Sized;

    /// Removes the named tool. Clears the best pointer when it referenced
    /// the deleted tool. Returns false when no tool had that name.
    fn delete_tool(&mut self, name: &str) -> Result<bool>;

    /// Overwrites the whole store with an imported snapshot.
    fn replace(&mut self, snapshot: Snapshot) -> Result<()>;

    /// Name of the tool currently considered fastest, if any.
    fn best(&self) -> Option<String>;

    /// Sets or clears the best pointer.
    fn set_best(&mut self, name: Option<String>) -> Result<()>;
}
