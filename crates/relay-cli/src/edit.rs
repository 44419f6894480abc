//! The `relay edit` command.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::{Input, MultiSelect, Select};
use relay_core::JsonStore;
use relay_proto::{Error, Tool, ToolStore, validate_tool_name};

use crate::prompt::or_cancelled;

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Tool to edit
    pub tool_name: Option<String>,

    /// Tool to edit (alternative to the positional argument)
    #[arg(short = 't', long = "tool-name")]
    pub tool: Option<String>,

    /// New tool name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New tool command
    #[arg(short, long)]
    pub command: Option<String>,

    /// New tool description
    #[arg(short, long)]
    pub description: Option<String>,
}

pub fn execute(store: &mut JsonStore, args: EditArgs) -> Result<()> {
    let selected = args.tool_name.or(args.tool);

    let tool = match selected {
        Some(name) => store
            .tool(&name)
            .ok_or_else(|| Error::NotFound(name.clone()))?,
        None => {
            let tools = store.tools();
            if tools.is_empty() {
                println!(
                    "{}",
                    "No tools configured. Use \"relay add\" to add a tool.".yellow()
                );
                return Ok(());
            }
            let labels: Vec<String> = tools
                .iter()
                .map(|t| format!("{} - {}", t.name, t.description))
                .collect();
            let result = Select::new()
                .with_prompt("Select a tool to edit")
                .items(&labels)
                .default(0)
                .interact();
            match or_cancelled(result) {
                Some(index) => tools[index].clone(),
                None => return Ok(()),
            }
        }
    };

    let mut new_name = args.name;
    let mut new_command = args.command;
    let mut new_description = args.description;

    // With nothing to apply directly, ask which fields to change.
    if new_name.is_none() && new_command.is_none() && new_description.is_none() {
        let properties = ["Name", "Command", "Description"];
        let picked = loop {
            let result = MultiSelect::new()
                .with_prompt("Select properties to edit")
                .items(&properties)
                .interact();
            match or_cancelled(result) {
                Some(picked) if picked.is_empty() => {
                    println!("{}", "Please select at least one property".yellow());
                }
                Some(picked) => break picked,
                None => return Ok(()),
            }
        };

        for index in picked {
            let current = match index {
                0 => tool.name.clone(),
                1 => tool.command.clone(),
                _ => tool.description.clone(),
            };
            let mut input = Input::<String>::new()
                .with_prompt(properties[index])
                .default(current);
            if index == 0 {
                input = input.validate_with(|value: &String| {
                    validate_tool_name(value).map_err(|err| err.to_string())
                });
            }
            let Some(value) = or_cancelled(input.interact_text()) else {
                return Ok(());
            };
            match index {
                0 => new_name = Some(value),
                1 => new_command = Some(value),
                _ => new_description = Some(value),
            }
        }
    }

    let rename_to = new_name.filter(|name| *name != tool.name);

    if let Some(name) = rename_to {
        validate_tool_name(&name)?;
        if store.contains(&name) {
            return Err(Error::Validation(format!("Tool \"{name}\" already exists")).into());
        }
        let updated = Tool {
            name: name.clone(),
            command: new_command.unwrap_or_else(|| tool.command.clone()),
            description: new_description.unwrap_or_else(|| tool.description.clone()),
            ..tool.clone()
        };
        store.delete_tool(&tool.name)?;
        store.add_tool(updated)?;
        println!(
            "{}",
            format!("✓ Tool \"{}\" updated to \"{name}\"", tool.name).green()
        );
    } else {
        store.update_tool(&tool.name, |t| {
            if let Some(command) = new_command {
                t.command = command;
            }
            if let Some(description) = new_description {
                t.description = description;
            }
        })?;
        println!(
            "{}",
            format!("✓ Tool \"{}\" updated successfully", tool.name).green()
        );
    }
    Ok(())
}
