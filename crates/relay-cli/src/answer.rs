//! The default flow: answer a prompt with the best tool, falling back as
//! needed.

use anyhow::Result;
use colored::Colorize;
use relay_adapters::ShellRunner;
use relay_core::{Engine, JsonStore};

use crate::{progress::SpinnerReporter, render};

pub async fn execute(store: &mut JsonStore, prompt: &str, autocheck: bool) -> Result<()> {
    let runner = ShellRunner::new();
    let mut reporter = SpinnerReporter::default();
    let answer = Engine::new(store, &runner)
        .answer(prompt, autocheck, &mut reporter)
        .await?;

    if let Some(output) = &answer.output {
        render::print_markdown(output);
    }

    let tail = if answer.primary {
        format!("(BEST) in {:.1}s", answer.elapsed)
    } else {
        format!("in {:.1}s", answer.elapsed)
    };
    println!(
        "\n{} {} {}",
        "Answered via".dimmed().italic(),
        answer.tool.to_uppercase().bold().cyan(),
        tail.dimmed().italic()
    );
    Ok(())
}
