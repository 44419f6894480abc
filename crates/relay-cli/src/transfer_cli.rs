//! The `relay export` and `relay import` commands.

use anyhow::Result;
use colored::Colorize;
use relay_core::{JsonStore, export_snapshot, import_snapshot};
use std::path::{Path, PathBuf};

pub fn execute_export(store: &JsonStore, path: Option<PathBuf>) -> Result<()> {
    let target = path.unwrap_or_else(|| {
        store
            .path()
            .parent()
            .map_or_else(|| PathBuf::from("config-exported.json"), |dir| {
                dir.join("config-exported.json")
            })
    });
    export_snapshot(store, &target)?;
    println!(
        "{}",
        format!("Configuration exported to: {}", target.display()).green()
    );
    Ok(())
}

pub fn execute_import(store: &mut JsonStore, path: &Path) -> Result<()> {
    let count = import_snapshot(store, path)?;
    println!(
        "{}",
        format!(
            "Configuration imported from: {} ({count} tools)",
            path.display()
        )
        .green()
    );
    println!(
        "{}",
        "Note: Existing configuration has been overwritten".yellow()
    );
    Ok(())
}
