//! Spinner-driven progress display for benchmark and fallback runs.

use colored::Colorize;
use indicatif::ProgressBar;
use relay_core::Reporter;
use relay_proto::RunReport;
use std::time::Duration;

/// Shows one spinner per probe and narrates fallback attempts.
#[derive(Default)]
pub struct SpinnerReporter {
    spinner: Option<ProgressBar>,
}

impl Reporter for SpinnerReporter {
    fn benchmark_triggered(&mut self) {
        println!(
            "{}",
            "No best tool configured. Running benchmark...".yellow()
        );
    }

    fn probe_started(&mut self, name: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner.set_message(format!("Testing {name}..."));
        self.spinner = Some(spinner);
    }

    fn probe_finished(&mut self, name: &str, report: &RunReport) {
        if let Some(spinner) = self.spinner.take() {
            if report.success {
                spinner.finish_with_message(format!(
                    "{}",
                    format!("✓ {name} - {}s", report.time_taken).green()
                ));
            } else {
                spinner.finish_with_message(format!("{}", format!("✗ {name} - failed").red()));
            }
        }
    }

    fn fallback_attempt(&mut self, name: &str) {
        println!("{}", format!("Falling back to {name}...").dimmed());
    }
}
