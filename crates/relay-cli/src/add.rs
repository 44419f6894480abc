//! The `relay add` command.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::Input;
use relay_core::JsonStore;
use relay_proto::{Error, Tool, ToolStore, validate_tool_name};

use crate::prompt::or_cancelled;

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Tool name (lowercase alphanumeric, 3-100 characters)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Shell command the tool runs
    #[arg(short, long)]
    pub command: Option<String>,

    /// Tool description
    #[arg(short, long)]
    pub description: Option<String>,
}

pub fn execute(store: &mut JsonStore, args: AddArgs) -> Result<()> {
    let name = match args.name {
        Some(name) => {
            validate_tool_name(&name)?;
            name
        }
        None => {
            let result = Input::<String>::new()
                .with_prompt("Tool name")
                .validate_with(|input: &String| {
                    validate_tool_name(input).map_err(|err| err.to_string())
                })
                .interact_text();
            match or_cancelled(result) {
                Some(name) => name,
                None => return Ok(()),
            }
        }
    };

    let command = match args.command {
        Some(command) => command,
        None => {
            let result = Input::<String>::new()
                .with_prompt("Command")
                .validate_with(|input: &String| non_empty(input, "Command"))
                .interact_text();
            match or_cancelled(result) {
                Some(command) => command,
                None => return Ok(()),
            }
        }
    };

    let description = match args.description {
        Some(description) => description,
        None => {
            let result = Input::<String>::new()
                .with_prompt("Description")
                .validate_with(|input: &String| non_empty(input, "Description"))
                .interact_text();
            match or_cancelled(result) {
                Some(description) => description,
                None => return Ok(()),
            }
        }
    };

    if store.contains(&name) {
        return Err(Error::Validation(format!("Tool \"{name}\" already exists")).into());
    }

    store.add_tool(Tool::new(&name, command, description))?;
    println!("{}", format!("✓ Tool \"{name}\" added successfully").green());
    Ok(())
}

fn non_empty(input: &str, field: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}
