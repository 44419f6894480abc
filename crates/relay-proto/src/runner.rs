//! The process-execution contract consumed by the selection core.

use async_trait::async_trait;

/// Hard per-invocation timeout, after which the child is killed and the
/// invocation reported as a failure.
pub const RUN_TIMEOUT_MS: u64 = 60_000;

/// How the child process's stdio is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Stream everything straight to the terminal.
    Inherit,
    /// Capture stdout and stderr, discard stdin.
    CaptureAll,
    /// Capture stderr only, discard stdout (benchmark probes).
    CaptureStderr,
}

/// Result of one external invocation.
///
/// Non-zero exits are reported here, never raised: `success` is simply
/// `exit_code == 0`. On launch failure or timeout, `error` is set and no
/// output is captured.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub success: bool,

    /// Elapsed seconds for this invocation, rounded to 2 decimal places.
    pub time_taken: f64,

    /// Trimmed captured stdout, when the mode captured it and it was
    /// non-empty.
    pub stdout: Option<String>,

    /// Trimmed captured stderr, when the mode captured it and it was
    /// non-empty.
    pub stderr: Option<String>,

    /// Launch or timeout error from the runner itself.
    pub error: Option<String>,
}

impl RunReport {
    /// The message to record for a failed invocation: captured stderr,
    /// else the runner's own error, in that preference order.
    pub fn failure_message(&self) -> Option<String> {
        self.stderr.clone().or_else(|| self.error.clone())
    }
}

/// Executes a shell command template with an optional appended prompt.
///
/// Implementations append the prompt as a trailing quoted argument, enforce
/// the hard timeout, and must not fail the future on non-zero exits.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `command` (plus `prompt`, when given) to completion or timeout.
    ///
    /// When `debug` is set the fully-formed command line is echoed before
    /// execution.
    async fn run(
        &self,
        command: &str,
        prompt: Option<&str>,
        mode: StdioMode,
        debug: bool,
    ) -> RunReport;
}

/// Rounds a seconds value to 2 decimal places, the precision recorded on
/// tool records.
pub fn round2(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234_56), 1.23);
        assert_eq!(round2(1.235), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_failure_message_prefers_stderr() {
        let report = RunReport {
            success: false,
            time_taken: 0.1,
            stdout: None,
            stderr: Some("boom".to_string()),
            error: Some("spawn failed".to_string()),
        };
        assert_eq!(report.failure_message().as_deref(), Some("boom"));

        let report = RunReport {
            stderr: None,
            ..report
        };
        assert_eq!(report.failure_message().as_deref(), Some("spawn failed"));
    }
}
