//! The `relay list` command.

use anyhow::Result;
use colored::Colorize;
use relay_core::JsonStore;
use relay_proto::ToolStore;

use crate::render;

pub fn execute(store: &JsonStore) -> Result<()> {
    if store.tools().is_empty() {
        println!(
            "{}",
            "No tools configured. Use \"relay add\" to add a tool.".yellow()
        );
        return Ok(());
    }
    print_table(store);
    Ok(())
}

/// Prints the tool table, most recently run first. The sort is
/// display-only; stored order is untouched.
pub fn print_table(store: &JsonStore) {
    let mut tools = store.tools();
    tools.sort_by(|a, b| match (a.last_ran, b.last_ran) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(a), Some(b)) => b.cmp(&a),
    });

    let best = store.best();
    render::print_markdown(&render::tool_table(&tools, best.as_deref()));
}
