//! JSON-file implementation of the `ToolStore` contract.

use relay_proto::{Result, Snapshot, Tool, ToolStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File-backed tool store.
///
/// The whole snapshot is read once at open and rewritten after every
/// mutation. There is a single writer per process and no cross-process
/// locking; the atomicity of `fs::write` is all the durability this
/// store promises.
pub struct JsonStore {
    path: PathBuf,
    state: Snapshot,
}

impl JsonStore {
    /// Opens the store at the platform config location
    /// (`<config dir>/relay/config.json`).
    pub fn open_default() -> Result<Self> {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::open(base.join("relay").join("config.json"))
    }

    /// Opens a store at an explicit path. A missing file is an empty
    /// store; an unreadable one is reported and replaced on next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(state) => state,
                Err(err) => {
                    warn!(path = %path.display(), %err, "config file is corrupt, starting empty");
                    Snapshot::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Snapshot::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, state })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.state)
            .map_err(|err| std::io::Error::new(ErrorKind::InvalidData, err))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ToolStore for JsonStore {
    fn tools(&self) -> Vec<Tool> {
        self.state.tools.clone()
    }

    fn tool(&self, name: &str) -> Option<Tool> {
        self.state.tools.iter().find(|t| t.name == name).cloned()
    }

    fn add_tool(&mut self, tool: Tool) -> Result<()> {
        self.state.tools.push(tool);
        self.persist()
    }

    fn update_tool<F>(&mut self, name: &str, apply: F) -> Result<bool>
    where
        F: FnOnce(&mut Tool),
    {
        let Some(tool) = self.state.tools.iter_mut().find(|t| t.name == name) else {
            return Ok(false);
        };
        apply(tool);
        self.persist()?;
        Ok(true)
    }

    fn delete_tool(&mut self, name: &str) -> Result<bool> {
        let before = self.state.tools.len();
        self.state.tools.retain(|t| t.name != name);
        if self.state.tools.len() == before {
            return Ok(false);
        }
        if self.state.best.as_deref() == Some(name) {
            self.state.best = None;
        }
        self.persist()?;
        Ok(true)
    }

    fn replace(&mut self, snapshot: Snapshot) -> Result<()> {
        self.state = snapshot;
        self.persist()
    }

    fn best(&self) -> Option<String> {
        self.state.best.clone()
    }

    fn set_best(&mut self, name: Option<String>) -> Result<()> {
        self.state.best = name;
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_proto::RunOutcome;
    use tempfile::TempDir;

    fn open_in(dir: &TempDir) -> JsonStore {
        JsonStore::open(dir.path().join("config.json")).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir);
        assert!(store.tools().is_empty());
        assert!(store.best().is_none());
    }

    #[test]
    fn test_add_update_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.add_tool(Tool::new("claude", "claude -p", "Claude")).unwrap();
        let updated = store
            .update_tool("claude", |t| {
                t.time_taken = Some(1.25);
                t.outcome = RunOutcome::Succeeded;
            })
            .unwrap();
        assert!(updated);

        let reopened = open_in(&dir);
        let tool = reopened.tool("claude").unwrap();
        assert_eq!(tool.time_taken, Some(1.25));
        assert_eq!(tool.outcome, RunOutcome::Succeeded);
    }

    #[test]
    fn test_update_unknown_tool_returns_false() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        assert!(!store.update_tool("ghost", |_| {}).unwrap());
    }

    #[test]
    fn test_delete_clears_best_pointer() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.add_tool(Tool::new("aaa", "a", "a")).unwrap();
        store.add_tool(Tool::new("bbb", "b", "b")).unwrap();
        store.set_best(Some("aaa".to_string())).unwrap();

        assert!(store.delete_tool("aaa").unwrap());
        assert!(store.best().is_none());
        assert!(store.tool("bbb").is_some());
    }

    #[test]
    fn test_delete_other_tool_keeps_best() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        store.add_tool(Tool::new("aaa", "a", "a")).unwrap();
        store.add_tool(Tool::new("bbb", "b", "b")).unwrap();
        store.set_best(Some("aaa".to_string())).unwrap();

        assert!(store.delete_tool("bbb").unwrap());
        assert_eq!(store.best().as_deref(), Some("aaa"));
    }

    #[test]
    fn test_delete_unknown_returns_false() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        assert!(!store.delete_tool("ghost").unwrap());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        let store = JsonStore::open(&path).unwrap();
        assert!(store.tools().is_empty());
    }

    #[test]
    fn test_tools_preserve_insertion_order() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir);
        for name in ["one", "two", "three"] {
            store.add_tool(Tool::new(name, "cmd", "desc")).unwrap();
        }
        let names: Vec<String> = store.tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["one", "two", "three"]);
    }
}
