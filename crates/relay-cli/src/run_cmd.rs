//! The `relay run` command: invoke one tool directly.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use relay_adapters::ShellRunner;
use relay_core::{Engine, JsonStore};

use crate::{AlreadyReported, render};

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Tool to run
    pub tool_name: String,

    /// Prompt appended to the tool command
    pub prompt: Option<String>,

    /// Show the actual command being executed
    #[arg(long)]
    pub debug: bool,
}

pub async fn execute(store: &mut JsonStore, args: RunArgs) -> Result<()> {
    println!("{}", format!("Running {}...\n", args.tool_name).bold());

    let runner = ShellRunner::new();
    let report = Engine::new(store, &runner)
        .run_tool(&args.tool_name, args.prompt.as_deref(), args.debug)
        .await?;

    if report.success {
        if let Some(output) = &report.stdout {
            render::print_markdown(output);
        }
        return Ok(());
    }

    println!("{}", "\n✗ Command failed".red());
    if let Some(message) = report.failure_message() {
        println!("{}", format!("Error: {message}").red());
    }
    Err(AlreadyReported.into())
}
