//! The `relay delete` command.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::{Confirm, MultiSelect};
use relay_core::JsonStore;
use relay_proto::{Error, ToolStore};

use crate::prompt::or_cancelled;

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Tool to delete
    pub tool_name: Option<String>,

    /// Tool to delete (alternative to the positional argument)
    #[arg(short = 't', long = "tool-name")]
    pub tool: Option<String>,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

pub fn execute(store: &mut JsonStore, args: DeleteArgs) -> Result<()> {
    let targets: Vec<String> = match args.tool_name.or(args.tool) {
        Some(name) => {
            if !store.contains(&name) {
                return Err(Error::NotFound(name).into());
            }
            vec![name]
        }
        None => {
            let tools = store.tools();
            if tools.is_empty() {
                println!("{}", "No tools configured.".yellow());
                return Ok(());
            }
            let labels: Vec<String> = tools
                .iter()
                .map(|t| format!("{} - {}", t.name, t.description))
                .collect();
            let result = MultiSelect::new()
                .with_prompt("Select tools to delete")
                .items(&labels)
                .interact();
            let Some(picked) = or_cancelled(result) else {
                return Ok(());
            };
            if picked.is_empty() {
                println!("{}", "Operation cancelled".yellow());
                return Ok(());
            }
            picked.into_iter().map(|i| tools[i].name.clone()).collect()
        }
    };

    let confirmed = args.yes || {
        let names = targets
            .iter()
            .map(|name| format!("\"{name}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let result = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete: {names}?"))
            .default(false)
            .interact();
        match or_cancelled(result) {
            Some(answer) => answer,
            None => return Ok(()),
        }
    };

    if !confirmed {
        println!("{}", "Operation cancelled".yellow());
        return Ok(());
    }

    for name in targets {
        store.delete_tool(&name)?;
        println!(
            "{}",
            format!("✓ Tool \"{name}\" deleted successfully").green()
        );
    }
    Ok(())
}
