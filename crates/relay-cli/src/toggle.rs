//! The `relay enable` and `relay disable` commands.

use anyhow::Result;
use colored::Colorize;
use relay_core::JsonStore;
use relay_proto::{Error, ToolStore};

pub fn execute(store: &mut JsonStore, tool_name: &str, enable: bool) -> Result<()> {
    let tool = store
        .tool(tool_name)
        .ok_or_else(|| Error::NotFound(tool_name.to_string()))?;

    let state = if enable { "enabled" } else { "disabled" };
    if tool.disabled != enable {
        println!(
            "{}",
            format!("Tool \"{tool_name}\" is already {state}").yellow()
        );
        return Ok(());
    }

    store.update_tool(tool_name, |t| t.disabled = !enable)?;
    println!("{}", format!("✓ Tool \"{tool_name}\" {state}").green());
    Ok(())
}
