//! Snapshot import and export.

use relay_proto::{Error, Result, Snapshot, ToolStore};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Writes the current tool collection and best pointer to `path` as
/// pretty-printed JSON.
pub fn export_snapshot(store: &impl ToolStore, path: &Path) -> Result<()> {
    let snapshot = Snapshot {
        tools: store.tools(),
        best: store.best(),
    };
    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    debug!(path = %path.display(), tools = snapshot.tools.len(), "exported snapshot");
    Ok(())
}

/// Replaces the whole store with the snapshot at `path`.
///
/// The file is parsed completely before anything is written; a malformed
/// file leaves the store exactly as it was. Returns the number of
/// imported tools.
pub fn import_snapshot(store: &mut impl ToolStore, path: &Path) -> Result<usize> {
    let raw = fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|err| Error::ImportFormat(err.to_string()))?;
    if !value.get("tools").is_some_and(serde_json::Value::is_array) {
        return Err(Error::ImportFormat(
            "configuration must contain a \"tools\" array".to_string(),
        ));
    }
    let snapshot: Snapshot =
        serde_json::from_value(value).map_err(|err| Error::ImportFormat(err.to_string()))?;

    let count = snapshot.tools.len();
    store.replace(snapshot)?;
    Ok(count)
}
