//! Terminal rendering: markdown output, the tool table, and detail views.

use chrono::{DateTime, Utc};
use colored::Colorize;
use relay_proto::{RunOutcome, Tool};
use termimad::MadSkin;

const CELL_WIDTH: usize = 40;

/// Renders markdown (tool answers, tables) to the terminal.
pub fn print_markdown(text: &str) {
    MadSkin::default().print_text(text);
}

/// The tool list as a markdown table, rendered with [`print_markdown`].
/// The best tool's name is highlighted.
pub fn tool_table(tools: &[Tool], best: Option<&str>) -> String {
    let mut table = String::from("|Tool|Command|Description|Last Run|Time|Status|\n");
    table.push_str("|-|-|-|-|-|-|\n");
    for tool in tools {
        let name = if best == Some(tool.name.as_str()) {
            format!("**{}**", tool.name)
        } else {
            tool.name.clone()
        };
        table.push_str(&format!(
            "|{}|{}|{}|{}|{}|{}|\n",
            cell(&name),
            cell(&tool.command),
            cell(&tool.description),
            relative_time(tool.last_ran),
            time_taken(tool.time_taken),
            status(tool),
        ));
    }
    table
}

/// Detail card for a single tool.
pub fn tool_details(tool: &Tool) -> String {
    let status = match tool.outcome {
        RunOutcome::NeverRun => "Not run yet".to_string(),
        RunOutcome::Succeeded => format!("{}", "✓ OK".green()),
        RunOutcome::Failed => format!("{}", "✗ Failed".red()),
    };

    let mut out = format!(
        "{}        {}\n{}     {}\n{} {}\n{}    {}\n{}  {}\n{}      {}",
        "Name:".bold(),
        tool.name,
        "Command:".bold(),
        tool.command.cyan(),
        "Description:".bold(),
        tool.description,
        "Last Run:".bold(),
        relative_time(tool.last_ran),
        "Time Taken:".bold(),
        time_taken(tool.time_taken),
        "Status:".bold(),
        status,
    );
    if let Some(err) = &tool.last_error {
        out.push_str(&format!("\n{}   {}", "Last Error:".red(), err));
    }
    out
}

fn status(tool: &Tool) -> &'static str {
    if tool.disabled {
        return "Disabled";
    }
    match tool.outcome {
        RunOutcome::NeverRun => "-",
        RunOutcome::Succeeded => "✓",
        RunOutcome::Failed => "✗",
    }
}

/// Truncates long cell content and keeps pipes out of the table syntax.
fn cell(text: &str) -> String {
    let safe = text.replace('|', "¦");
    if safe.chars().count() > CELL_WIDTH {
        let head: String = safe.chars().take(CELL_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        safe
    }
}

/// `1.25s`-style latency, `-` when never measured.
pub fn time_taken(seconds: Option<f64>) -> String {
    match seconds {
        Some(seconds) => format!("{seconds:.2}s"),
        None => "-".to_string(),
    }
}

/// Human-relative timestamp (`3 minutes ago`), `-` when never run.
pub fn relative_time(timestamp: Option<DateTime<Utc>>) -> String {
    let Some(timestamp) = timestamp else {
        return "-".to_string();
    };
    let seconds = Utc::now()
        .signed_duration_since(timestamp)
        .num_seconds()
        .max(0);

    match seconds {
        0..=9 => "just now".to_string(),
        10..=59 => format!("{seconds} seconds ago"),
        60..=3_599 => plural(seconds / 60, "minute"),
        3_600..=86_399 => plural(seconds / 3_600, "hour"),
        86_400..=2_591_999 => plural(seconds / 86_400, "day"),
        2_592_000..=31_535_999 => plural(seconds / 2_592_000, "month"),
        _ => plural(seconds / 31_536_000, "year"),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
