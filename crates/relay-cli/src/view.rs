//! The `relay view` command.

use anyhow::Result;
use relay_core::JsonStore;
use relay_proto::{Error, ToolStore};

use crate::render;

pub fn execute(store: &JsonStore, tool_name: &str) -> Result<()> {
    let tool = store
        .tool(tool_name)
        .ok_or_else(|| Error::NotFound(tool_name.to_string()))?;
    println!("{}", render::tool_details(&tool));
    Ok(())
}
