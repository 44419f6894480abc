//! The `relay onboard` command: usage guide aimed at AI agents.

use anyhow::Result;
use colored::Colorize;

pub fn execute() -> Result<()> {
    println!("{}\n", "Relay - AI Tool Manager Onboarding Guide".bold().cyan());

    println!("{}", "Overview:".bold());
    println!(
        "Relay manages a set of AI CLI tools, benchmarks them, and answers prompts\n\
         with the fastest working one, falling back to alternatives on failure.\n"
    );

    println!("{}", "Tool management:".bold());
    println!("  add     - Add a new tool (interactive or via flags)");
    println!("  edit    - Edit an existing tool");
    println!("  delete  - Remove tools with confirmation");
    println!("  list    - Display all configured tools with status");
    println!("  view    - Show details for a specific tool");
    println!("  find    - Search tools by name or description\n");

    println!("{}", "AI operations:".bold());
    println!("  \"<prompt>\" - Answer a prompt with the best tool, with fallback");
    println!("  run        - Execute a specific tool with an optional prompt");
    println!("  check      - Benchmark all tools and elect the fastest\n");

    println!("{}", "Configuration & control:".bold());
    println!("  export  - Export the tool configuration to JSON");
    println!("  import  - Import a configuration, replacing the current one");
    println!("  enable  - Re-enable a disabled tool");
    println!("  disable - Exclude a tool from benchmarks and fallback");
    println!("  onboard - Show this guide\n");

    println!("{}", "Examples:".bold());
    println!("  relay add --name claude --command \"claude -p\" --description \"Claude CLI\"");
    println!("  relay check --debug");
    println!("  relay \"explain this stack trace\"");
    println!("  relay \"summarize this repo\" --no-autocheck");
    println!("  relay run claude \"write a commit message\" --debug");
    println!("  relay disable slowtool");
    println!("  relay export backup.json\n");

    println!("{}", "How selection works:".bold());
    println!(
        "check probes every enabled tool with a fixed prompt and records latency\n\
         and status; the fastest success becomes the best tool. A bare prompt runs\n\
         the best tool first and falls back through the remaining known-good tools\n\
         by ascending latency, promoting whichever one answers."
    );
    Ok(())
}
