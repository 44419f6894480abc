//! Shell execution of tool command templates.

use async_trait::async_trait;
use colored::Colorize;
use relay_proto::{CommandRunner, RUN_TIMEOUT_MS, RunReport, StdioMode, round2};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::debug;

/// Runs tool commands through `sh -c` with a hard timeout.
///
/// The command template is opaque; when a prompt is present it is appended
/// as a trailing double-quoted argument, matching how the tools expect to
/// receive it.
pub struct ShellRunner {
    timeout: Duration,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellRunner {
    /// Creates a runner with the standard 60 second timeout.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_millis(RUN_TIMEOUT_MS),
        }
    }

    /// Overrides the timeout. Used by tests; production callers keep the
    /// standard limit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn timed_out_report(&self, started: Instant) -> RunReport {
        RunReport {
            success: false,
            time_taken: round2(started.elapsed().as_secs_f64()),
            stdout: None,
            stderr: None,
            error: Some(format!(
                "Command timed out after {}s",
                self.timeout.as_secs_f64()
            )),
        }
    }
}

fn launch_failed_report(started: Instant, err: &std::io::Error) -> RunReport {
    RunReport {
        success: false,
        time_taken: round2(started.elapsed().as_secs_f64()),
        stdout: None,
        stderr: None,
        error: Some(format!("Command execution failed: {err}")),
    }
}

fn non_empty(raw: Vec<u8>) -> Option<String> {
    let text = String::from_utf8_lossy(&raw).trim().to_string();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(
        &self,
        command: &str,
        prompt: Option<&str>,
        mode: StdioMode,
        debug: bool,
    ) -> RunReport {
        let full_command = match prompt {
            Some(prompt) => format!("{command} \"{prompt}\""),
            None => command.to_string(),
        };

        if debug {
            println!(
                "\n{} {}\n",
                "Debug: Executing command:".dimmed(),
                full_command.cyan()
            );
        }
        debug!(command = %full_command, ?mode, "spawning tool process");

        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(&full_command);
        match mode {
            StdioMode::Inherit => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
            }
            StdioMode::CaptureAll => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
            }
            StdioMode::CaptureStderr => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::piped());
            }
        }
        // If the timeout drops the wait future, the child must not outlive it.
        cmd.kill_on_drop(true);

        let started = Instant::now();

        if mode == StdioMode::Inherit {
            let mut child = match cmd.spawn() {
                Ok(child) => child,
                Err(err) => return launch_failed_report(started, &err),
            };
            return match tokio::time::timeout(self.timeout, child.wait()).await {
                Ok(Ok(status)) => RunReport {
                    success: status.success(),
                    time_taken: round2(started.elapsed().as_secs_f64()),
                    stdout: None,
                    stderr: None,
                    error: None,
                },
                Ok(Err(err)) => launch_failed_report(started, &err),
                Err(_) => {
                    let _ = child.kill().await;
                    self.timed_out_report(started)
                }
            };
        }

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => return launch_failed_report(started, &err),
        };
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => RunReport {
                success: output.status.success(),
                time_taken: round2(started.elapsed().as_secs_f64()),
                stdout: (mode == StdioMode::CaptureAll)
                    .then(|| non_empty(output.stdout))
                    .flatten(),
                stderr: non_empty(output.stderr),
                error: None,
            },
            Ok(Err(err)) => launch_failed_report(started, &err),
            Err(_) => self.timed_out_report(started),
        }
    }
}
