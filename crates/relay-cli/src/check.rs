//! The `relay check` command: benchmark every tool.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use relay_adapters::ShellRunner;
use relay_core::{CheckOptions, Engine, JsonStore};
use relay_proto::ToolStore;

use crate::{list, progress::SpinnerReporter};

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Show debug information including the commands being executed
    #[arg(long)]
    pub debug: bool,

    /// Include disabled tools in the benchmark
    #[arg(long)]
    pub include_disabled: bool,
}

pub async fn execute(store: &mut JsonStore, args: CheckArgs) -> Result<()> {
    if store.tools().is_empty() {
        println!(
            "{}",
            "No tools configured. Use \"relay add\" to add a tool.".yellow()
        );
        return Ok(());
    }

    println!("{}", "Checking tools... This may take a while.\n".bold());

    let runner = ShellRunner::new();
    let opts = CheckOptions {
        debug: args.debug,
        include_disabled: args.include_disabled,
    };
    let mut reporter = SpinnerReporter::default();
    let outcome = Engine::new(store, &runner)
        .check(&opts, &mut reporter)
        .await?;

    match outcome.best {
        Some(pick) => println!(
            "{}",
            format!("\nBest Tool: {} ({:.2}s)\n", pick.name, pick.time_taken)
                .green()
                .bold()
        ),
        None => println!("{}", "\nNo tools succeeded\n".yellow()),
    }

    list::print_table(store);
    Ok(())
}
