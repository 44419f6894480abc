//! Tool selection and execution orchestration.
//!
//! Two flows share this module: the benchmark pass, which probes every
//! eligible tool and elects the fastest working one, and the adaptive
//! answer flow, which tries the recorded best tool and degrades through
//! the remaining known-good tools ranked by latency. Both run strictly
//! sequentially and convert every invocation failure into persisted
//! record state rather than an error.

#[cfg(test)]
mod tests;

use chrono::Utc;
use relay_proto::{
    CommandRunner, Error, Result, RunOutcome, RunReport, StdioMode, Tool, ToolStore,
};
use std::time::Instant;
use tracing::debug;

/// Fixed probe prompt sent to every tool during a benchmark pass.
pub const PROBE_PROMPT: &str = "hello";

/// Receives progress notifications from the engine.
///
/// The CLI drives a spinner from these; tests record them. All methods
/// default to no-ops so implementers pick what they need.
pub trait Reporter {
    /// The answer flow found no best tool and is about to benchmark.
    fn benchmark_triggered(&mut self) {}

    /// A benchmark pass is starting over `_total` eligible tools.
    fn benchmark_started(&mut self, _total: usize) {}

    /// A probe of `_name` is starting.
    fn probe_started(&mut self, _name: &str) {}

    /// The probe of `_name` finished.
    fn probe_finished(&mut self, _name: &str, _report: &RunReport) {}

    /// The answer flow is falling back to `_name`.
    fn fallback_attempt(&mut self, _name: &str) {}
}

/// Reporter that ignores everything.
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Options for the benchmark pass.
#[derive(Debug, Default, Clone)]
pub struct CheckOptions {
    /// Echo each fully-formed command before execution.
    pub debug: bool,
    /// Probe disabled tools too.
    pub include_disabled: bool,
}

/// The elected best tool after a benchmark pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPick {
    pub name: String,
    pub time_taken: f64,
}

/// Summary of a benchmark pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// How many tools were probed.
    pub probed: usize,
    /// The new best tool, or None when no probe succeeded (in which case
    /// the previous best pointer is left untouched).
    pub best: Option<BestPick>,
}

/// A successful adaptive answer.
#[derive(Debug, Clone)]
pub struct Answer {
    /// Tool that produced the answer.
    pub tool: String,
    /// Captured stdout, to be rendered as markdown.
    pub output: Option<String>,
    /// Wall-clock seconds for the whole operation, including any
    /// benchmark pass that ran first.
    pub elapsed: f64,
    /// True when the recorded best tool answered, false for a fallback.
    pub primary: bool,
}

/// Orchestrates tool selection against a store and a process runner.
///
/// Holds no state of its own; everything it decides is read from and
/// written back to the store per invocation.
pub struct Engine<'a, S, R> {
    store: &'a mut S,
    runner: &'a R,
}

impl<'a, S: ToolStore, R: CommandRunner> Engine<'a, S, R> {
    pub fn new(store: &'a mut S, runner: &'a R) -> Self {
        Self { store, runner }
    }

    /// Benchmarks every eligible tool with the fixed probe prompt and
    /// elects the fastest one that succeeded.
    ///
    /// Each probed tool gets its metrics rewritten; ties on the minimum
    /// latency go to the earlier tool in collection order. When nothing
    /// succeeds the previous best pointer survives.
    pub async fn check(
        &mut self,
        opts: &CheckOptions,
        reporter: &mut dyn Reporter,
    ) -> Result<CheckOutcome> {
        let eligible: Vec<Tool> = self
            .store
            .tools()
            .into_iter()
            .filter(|t| !t.disabled || opts.include_disabled)
            .collect();
        reporter.benchmark_started(eligible.len());

        let mut best: Option<BestPick> = None;
        for tool in &eligible {
            reporter.probe_started(&tool.name);
            let report = self
                .runner
                .run(
                    &tool.command,
                    Some(PROBE_PROMPT),
                    StdioMode::CaptureStderr,
                    opts.debug,
                )
                .await;

            let success = report.success;
            let time_taken = report.time_taken;
            let failure = if success { None } else { report.failure_message() };
            let now = Utc::now();
            self.store.update_tool(&tool.name, move |t| {
                t.time_taken = Some(time_taken);
                t.last_ran = Some(now);
                t.outcome = if success {
                    RunOutcome::Succeeded
                } else {
                    RunOutcome::Failed
                };
                t.last_error = failure;
            })?;

            if success && best.as_ref().is_none_or(|b| time_taken < b.time_taken) {
                best = Some(BestPick {
                    name: tool.name.clone(),
                    time_taken,
                });
            }
            reporter.probe_finished(&tool.name, &report);
        }

        if let Some(pick) = &best {
            debug!(best = %pick.name, time_taken = pick.time_taken, "benchmark elected best tool");
            self.store.set_best(Some(pick.name.clone()))?;
        }

        Ok(CheckOutcome {
            probed: eligible.len(),
            best,
        })
    }

    /// Answers `prompt` with the best tool, falling back through the
    /// remaining known-good tools by ascending latency.
    ///
    /// With no best recorded, a full benchmark pass runs first; if that
    /// elects nothing the operation fails with [`Error::NoCandidates`].
    /// When `autocheck` is false a failing best tool is fatal with no
    /// fallback attempted.
    pub async fn answer(
        &mut self,
        prompt: &str,
        autocheck: bool,
        reporter: &mut dyn Reporter,
    ) -> Result<Answer> {
        let started = Instant::now();

        let mut best_name = self.store.best();
        if best_name.is_none() {
            reporter.benchmark_triggered();
            self.check(&CheckOptions::default(), reporter).await?;
            best_name = self.store.best();
        }
        let Some(best_name) = best_name else {
            return Err(Error::NoCandidates);
        };
        let best = self
            .store
            .tool(&best_name)
            .ok_or_else(|| Error::NotFound(best_name.clone()))?;

        let report = self.invoke(&best, prompt).await;
        if report.success {
            return Ok(Answer {
                tool: best_name,
                output: report.stdout,
                elapsed: started.elapsed().as_secs_f64(),
                primary: true,
            });
        }
        self.record_failure(&best_name, &report)?;

        if !autocheck {
            return Err(Error::AllToolsFailed);
        }

        for candidate in fallback_candidates(&self.store.tools(), &best_name) {
            debug!(tool = %candidate.name, "best tool failed, trying fallback");
            reporter.fallback_attempt(&candidate.name);
            let report = self.invoke(&candidate, prompt).await;
            if report.success {
                self.store.set_best(Some(candidate.name.clone()))?;
                return Ok(Answer {
                    tool: candidate.name,
                    output: report.stdout,
                    elapsed: started.elapsed().as_secs_f64(),
                    primary: false,
                });
            }
            self.record_failure(&candidate.name, &report)?;
        }

        Err(Error::AllToolsFailed)
    }

    /// Invokes a single tool by name, with output captured, and records
    /// the outcome on its record.
    pub async fn run_tool(
        &mut self,
        name: &str,
        prompt: Option<&str>,
        debug: bool,
    ) -> Result<RunReport> {
        let tool = self
            .store
            .tool(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        let report = self
            .runner
            .run(&tool.command, prompt, StdioMode::CaptureAll, debug)
            .await;

        let success = report.success;
        let time_taken = report.time_taken;
        let failure = if success { None } else { report.failure_message() };
        let now = Utc::now();
        self.store.update_tool(name, move |t| {
            t.time_taken = Some(time_taken);
            t.last_ran = Some(now);
            t.outcome = if success {
                RunOutcome::Succeeded
            } else {
                RunOutcome::Failed
            };
            t.last_error = failure;
        })?;

        Ok(report)
    }

    async fn invoke(&self, tool: &Tool, prompt: &str) -> RunReport {
        self.runner
            .run(&tool.command, Some(prompt), StdioMode::CaptureAll, false)
            .await
    }

    fn record_failure(&mut self, name: &str, report: &RunReport) -> Result<()> {
        let failure = report.failure_message();
        let now = Utc::now();
        self.store.update_tool(name, move |t| {
            t.outcome = RunOutcome::Failed;
            t.last_error = failure;
            t.last_ran = Some(now);
        })?;
        Ok(())
    }
}

/// Fallback order after the best tool failed: every enabled tool whose
/// last recorded outcome was a success, excluding the failed best itself,
/// sorted by ascending recorded latency with unmeasured tools last.
///
/// Tools that have never run or are known-broken are not retried here;
/// fallback is bounded to historically viable candidates.
fn fallback_candidates(tools: &[Tool], exclude: &str) -> Vec<Tool> {
    let mut candidates: Vec<Tool> = tools
        .iter()
        .filter(|t| t.name != exclude && !t.disabled && t.outcome.is_success())
        .cloned()
        .collect();
    candidates.sort_by(|a, b| {
        a.time_taken
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.time_taken.unwrap_or(f64::INFINITY))
    });
    candidates
}
