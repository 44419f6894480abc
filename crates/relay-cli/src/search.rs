//! The `relay find` command.

use anyhow::Result;
use colored::Colorize;
use relay_core::{JsonStore, search_tools};
use relay_proto::ToolStore;

use crate::render;

pub fn execute(store: &JsonStore, query: &str) -> Result<()> {
    let tools = store.tools();
    if tools.is_empty() {
        println!(
            "{}",
            "No tools configured. Use \"relay add\" to add a tool.".yellow()
        );
        return Ok(());
    }

    let matches = search_tools(&tools, query);
    if matches.is_empty() {
        println!(
            "{}",
            format!("No tools found matching \"{query}\"").yellow()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} tool(s) matching \"{query}\":\n", matches.len()).bold()
    );
    render::print_markdown(&render::tool_table(&matches, None));
    Ok(())
}
