//! Relay command-line entry point.
//!
//! Thin dispatch layer: subcommands parse here and hand off to their
//! modules; a bare quoted argument is routed to the adaptive answer flow.
//! This is the only place that decides the process exit code; the core
//! crates return results and never terminate the process themselves.

mod add;
mod answer;
mod check;
mod delete;
mod edit;
mod list;
mod onboard;
mod progress;
mod prompt;
mod render;
mod run_cmd;
mod search;
mod toggle;
mod transfer_cli;
mod view;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use relay_core::JsonStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Marker error for failures the command already reported to the user.
/// `main` exits 1 without printing anything further.
#[derive(Debug)]
pub(crate) struct AlreadyReported;

impl std::fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("failure already reported")
    }
}

impl std::error::Error for AlreadyReported {}

#[derive(Parser, Debug)]
#[command(
    name = "relay",
    version,
    about = "Benchmark your AI CLI tools and answer prompts with the fastest one"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Answer the prompt with the best tool only; no fallback on failure
    #[arg(long, hide = true)]
    no_autocheck: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new tool
    Add(add::AddArgs),

    /// Edit an existing tool
    Edit(edit::EditArgs),

    /// Delete tools (interactive selection if no tool specified)
    Delete(delete::DeleteArgs),

    /// View detailed information about a tool
    View {
        /// Tool to inspect
        tool_name: String,
    },

    /// List all tools
    List,

    /// Search for tools by name or description
    Find {
        /// Search query
        query: String,
    },

    /// Run all tools to benchmark and verify functionality
    Check(check::CheckArgs),

    /// Run a specific tool with an optional prompt
    Run(run_cmd::RunArgs),

    /// Export configuration to a file
    Export {
        /// Destination path (default: next to the config file)
        path: Option<PathBuf>,
    },

    /// Import configuration from a file, replacing the current one
    Import {
        /// Snapshot file to import
        path: PathBuf,
    },

    /// Enable a tool
    Enable {
        /// Tool to enable
        tool_name: String,
    },

    /// Disable a tool (excluded from benchmarks and fallback)
    Disable {
        /// Tool to disable
        tool_name: String,
    },

    /// Display the onboarding guide for AI agents
    Onboard,

    /// Anything else is treated as a prompt for the best tool
    #[command(external_subcommand)]
    Prompt(Vec<String>),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        if err.downcast_ref::<AlreadyReported>().is_none() {
            eprintln!("{}", format!("Error: {err}").red());
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let mut store = JsonStore::open_default().context("failed to open the config store")?;
    tracing::debug!(path = %store.path().display(), "opened config store");

    match command {
        Commands::Add(args) => add::execute(&mut store, args),
        Commands::Edit(args) => edit::execute(&mut store, args),
        Commands::Delete(args) => delete::execute(&mut store, args),
        Commands::View { tool_name } => view::execute(&store, &tool_name),
        Commands::List => list::execute(&store),
        Commands::Find { query } => search::execute(&store, &query),
        Commands::Check(args) => check::execute(&mut store, args).await,
        Commands::Run(args) => run_cmd::execute(&mut store, args).await,
        Commands::Export { path } => transfer_cli::execute_export(&store, path),
        Commands::Import { path } => transfer_cli::execute_import(&mut store, &path),
        Commands::Enable { tool_name } => toggle::execute(&mut store, &tool_name, true),
        Commands::Disable { tool_name } => toggle::execute(&mut store, &tool_name, false),
        Commands::Onboard => onboard::execute(),
        Commands::Prompt(tokens) => dispatch_prompt(&mut store, tokens, cli.no_autocheck).await,
    }
}

/// Routes a bare argument to the adaptive answer flow. The prompt must be
/// a single (quoted) argument containing whitespace; anything else is an
/// unknown command. The `--no-autocheck` flag is accepted on either side
/// of the prompt.
async fn dispatch_prompt(
    store: &mut JsonStore,
    mut tokens: Vec<String>,
    no_autocheck: bool,
) -> anyhow::Result<()> {
    let autocheck = !(no_autocheck || tokens.iter().any(|t| t == "--no-autocheck"));
    tokens.retain(|t| t != "--no-autocheck");

    if tokens.len() == 1 && tokens[0].contains(char::is_whitespace) {
        return answer::execute(store, &tokens[0], autocheck).await;
    }

    eprintln!(
        "{}",
        format!("Unknown command: {}", tokens.join(" ")).red()
    );
    Cli::command().print_help()?;
    Err(AlreadyReported.into())
}
