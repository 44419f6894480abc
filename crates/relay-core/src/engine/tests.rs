use super::*;
use crate::JsonStore;
use async_trait::async_trait;
use relay_proto::{RunOutcome, Snapshot};
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;

/// Scripted runner: responses are queued per command string and consumed
/// in order; unscripted commands fail. Every call is recorded.
#[derive(Default)]
struct FakeRunner {
    scripts: Mutex<HashMap<String, Vec<RunReport>>>,
    calls: Mutex<Vec<(String, Option<String>, StdioMode)>>,
}

impl FakeRunner {
    fn new() -> Self {
        Self::default()
    }

    fn script(self, command: &str, report: RunReport) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_default()
            .push(report);
        self
    }

    fn calls(&self) -> Vec<(String, Option<String>, StdioMode)> {
        self.calls.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        command: &str,
        prompt: Option<&str>,
        mode: StdioMode,
        _debug: bool,
    ) -> RunReport {
        self.calls.lock().unwrap().push((
            command.to_string(),
            prompt.map(String::from),
            mode,
        ));
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(command) {
            Some(queue) if !queue.is_empty() => queue.remove(0),
            _ => failing(0.01, "unscripted command"),
        }
    }
}

fn passing(time_taken: f64) -> RunReport {
    RunReport {
        success: true,
        time_taken,
        ..RunReport::default()
    }
}

fn answering(time_taken: f64, output: &str) -> RunReport {
    RunReport {
        success: true,
        time_taken,
        stdout: Some(output.to_string()),
        ..RunReport::default()
    }
}

fn failing(time_taken: f64, stderr: &str) -> RunReport {
    RunReport {
        success: false,
        time_taken,
        stderr: Some(stderr.to_string()),
        ..RunReport::default()
    }
}

/// Records which engine notifications fired.
#[derive(Default)]
struct RecordingReporter {
    benchmark_triggered: bool,
    probes: Vec<String>,
    fallbacks: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn benchmark_triggered(&mut self) {
        self.benchmark_triggered = true;
    }

    fn probe_started(&mut self, name: &str) {
        self.probes.push(name.to_string());
    }

    fn fallback_attempt(&mut self, name: &str) {
        self.fallbacks.push(name.to_string());
    }
}

fn store_with(dir: &TempDir, tools: Vec<Tool>, best: Option<&str>) -> JsonStore {
    let mut store = JsonStore::open(dir.path().join("config.json")).unwrap();
    store
        .replace(Snapshot {
            tools,
            best: best.map(String::from),
        })
        .unwrap();
    store
}

fn succeeded(mut tool: Tool, time_taken: f64) -> Tool {
    tool.outcome = RunOutcome::Succeeded;
    tool.time_taken = Some(time_taken);
    tool
}

fn failed(mut tool: Tool) -> Tool {
    tool.outcome = RunOutcome::Failed;
    tool.last_error = Some("previous failure".to_string());
    tool
}

// ── Benchmark pass ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_check_elects_fastest_successful_tool() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![
            Tool::new("slow", "slow-cmd", ""),
            Tool::new("fast", "fast-cmd", ""),
            Tool::new("broken", "broken-cmd", ""),
        ],
        None,
    );
    let runner = FakeRunner::new()
        .script("slow-cmd", passing(2.5))
        .script("fast-cmd", passing(0.8))
        .script("broken-cmd", failing(0.1, "no api key"));

    let outcome = Engine::new(&mut store, &runner)
        .check(&CheckOptions::default(), &mut NullReporter)
        .await
        .unwrap();

    assert_eq!(outcome.probed, 3);
    assert_eq!(
        outcome.best,
        Some(BestPick {
            name: "fast".to_string(),
            time_taken: 0.8
        })
    );
    assert_eq!(store.best().as_deref(), Some("fast"));

    let slow = store.tool("slow").unwrap();
    assert_eq!(slow.outcome, RunOutcome::Succeeded);
    assert_eq!(slow.time_taken, Some(2.5));
    assert!(slow.last_ran.is_some());
    assert!(slow.last_error.is_none());

    let broken = store.tool("broken").unwrap();
    assert_eq!(broken.outcome, RunOutcome::Failed);
    assert_eq!(broken.last_error.as_deref(), Some("no api key"));
}

#[tokio::test]
async fn test_check_tie_goes_to_first_in_order() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![Tool::new("one", "one-cmd", ""), Tool::new("two", "two-cmd", "")],
        None,
    );
    let runner = FakeRunner::new()
        .script("one-cmd", passing(1.0))
        .script("two-cmd", passing(1.0));

    let outcome = Engine::new(&mut store, &runner)
        .check(&CheckOptions::default(), &mut NullReporter)
        .await
        .unwrap();

    assert_eq!(outcome.best.unwrap().name, "one");
}

#[tokio::test]
async fn test_check_probes_with_fixed_prompt_and_stderr_capture() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, vec![Tool::new("only", "only-cmd", "")], None);
    let runner = FakeRunner::new().script("only-cmd", passing(1.0));

    Engine::new(&mut store, &runner)
        .check(&CheckOptions::default(), &mut NullReporter)
        .await
        .unwrap();

    assert_eq!(
        runner.calls(),
        vec![(
            "only-cmd".to_string(),
            Some(PROBE_PROMPT.to_string()),
            StdioMode::CaptureStderr
        )]
    );
}

#[tokio::test]
async fn test_check_all_failing_leaves_best_untouched() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![Tool::new("aaa", "a-cmd", ""), Tool::new("bbb", "b-cmd", "")],
        Some("aaa"),
    );
    let runner = FakeRunner::new()
        .script("a-cmd", failing(0.2, "down"))
        .script("b-cmd", failing(0.3, "down"));

    let outcome = Engine::new(&mut store, &runner)
        .check(&CheckOptions::default(), &mut NullReporter)
        .await
        .unwrap();

    assert!(outcome.best.is_none());
    assert_eq!(store.best().as_deref(), Some("aaa"));
}

#[tokio::test]
async fn test_check_success_clears_previous_error() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![failed(Tool::new("flaky", "flaky-cmd", ""))],
        None,
    );
    let runner = FakeRunner::new().script("flaky-cmd", passing(0.5));

    Engine::new(&mut store, &runner)
        .check(&CheckOptions::default(), &mut NullReporter)
        .await
        .unwrap();

    let flaky = store.tool("flaky").unwrap();
    assert_eq!(flaky.outcome, RunOutcome::Succeeded);
    assert!(flaky.last_error.is_none());
}

#[tokio::test]
async fn test_check_skips_disabled_without_touching_metrics() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![
            Tool::new("active", "active-cmd", ""),
            Tool::new("parked", "parked-cmd", "").with_disabled(true),
        ],
        None,
    );
    let runner = FakeRunner::new()
        .script("active-cmd", passing(1.0))
        .script("parked-cmd", passing(0.1));

    let mut reporter = RecordingReporter::default();
    let outcome = Engine::new(&mut store, &runner)
        .check(&CheckOptions::default(), &mut reporter)
        .await
        .unwrap();

    assert_eq!(outcome.probed, 1);
    assert_eq!(reporter.probes, ["active"]);
    let parked = store.tool("parked").unwrap();
    assert_eq!(parked.outcome, RunOutcome::NeverRun);
    assert!(parked.time_taken.is_none());
    // The faster disabled tool must not have been elected.
    assert_eq!(store.best().as_deref(), Some("active"));
}

#[tokio::test]
async fn test_check_include_disabled_probes_everything() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![
            Tool::new("active", "active-cmd", ""),
            Tool::new("parked", "parked-cmd", "").with_disabled(true),
        ],
        None,
    );
    let runner = FakeRunner::new()
        .script("active-cmd", passing(1.0))
        .script("parked-cmd", passing(0.1));

    let opts = CheckOptions {
        include_disabled: true,
        ..CheckOptions::default()
    };
    let outcome = Engine::new(&mut store, &runner)
        .check(&opts, &mut NullReporter)
        .await
        .unwrap();

    assert_eq!(outcome.probed, 2);
    assert_eq!(outcome.best.unwrap().name, "parked");
}

#[tokio::test]
async fn test_check_empty_store_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, vec![], None);
    let runner = FakeRunner::new();

    let outcome = Engine::new(&mut store, &runner)
        .check(&CheckOptions::default(), &mut NullReporter)
        .await
        .unwrap();

    assert_eq!(outcome.probed, 0);
    assert!(outcome.best.is_none());
    assert_eq!(runner.call_count(), 0);
}

// ── Adaptive answer ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_answer_best_success_invokes_nothing_else() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![
            succeeded(Tool::new("primary", "primary-cmd", ""), 1.0),
            succeeded(Tool::new("backup", "backup-cmd", ""), 2.0),
        ],
        Some("primary"),
    );
    let runner = FakeRunner::new().script("primary-cmd", answering(1.0, "# Hi"));

    let answer = Engine::new(&mut store, &runner)
        .answer("what is rust", true, &mut NullReporter)
        .await
        .unwrap();

    assert_eq!(answer.tool, "primary");
    assert!(answer.primary);
    assert_eq!(answer.output.as_deref(), Some("# Hi"));
    assert_eq!(runner.call_count(), 1);
    assert_eq!(
        runner.calls()[0],
        (
            "primary-cmd".to_string(),
            Some("what is rust".to_string()),
            StdioMode::CaptureAll
        )
    );
}

#[tokio::test]
async fn test_answer_falls_back_in_latency_order() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![
            succeeded(Tool::new("medium", "medium-cmd", ""), 2.0),
            succeeded(Tool::new("quick", "quick-cmd", ""), 1.0),
            failed(Tool::new("broken", "broken-cmd", "")),
            Tool::new("untested", "untested-cmd", ""),
            succeeded(Tool::new("parked", "parked-cmd", ""), 0.5).with_disabled(true),
            succeeded(Tool::new("best", "best-cmd", ""), 0.9),
        ],
        Some("best"),
    );
    let runner = FakeRunner::new()
        .script("best-cmd", failing(0.5, "quota exceeded"))
        .script("quick-cmd", failing(0.4, "502"))
        .script("medium-cmd", answering(2.1, "fallback answer"));

    let mut reporter = RecordingReporter::default();
    let answer = Engine::new(&mut store, &runner)
        .answer("hi there", true, &mut reporter)
        .await
        .unwrap();

    // best first, then known-good tools by ascending time_taken; the
    // broken, never-run, and disabled tools are never candidates.
    let attempted: Vec<String> = runner.calls().into_iter().map(|(cmd, ..)| cmd).collect();
    assert_eq!(attempted, ["best-cmd", "quick-cmd", "medium-cmd"]);
    assert_eq!(reporter.fallbacks, ["quick", "medium"]);

    assert_eq!(answer.tool, "medium");
    assert!(!answer.primary);
    assert_eq!(store.best().as_deref(), Some("medium"));

    // Both failures were persisted.
    let best = store.tool("best").unwrap();
    assert_eq!(best.outcome, RunOutcome::Failed);
    assert_eq!(best.last_error.as_deref(), Some("quota exceeded"));
    assert_eq!(store.tool("quick").unwrap().outcome, RunOutcome::Failed);
}

#[tokio::test]
async fn test_answer_failure_keeps_recorded_latency() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![
            succeeded(Tool::new("best", "best-cmd", ""), 0.9),
            succeeded(Tool::new("backup", "backup-cmd", ""), 2.0),
        ],
        Some("best"),
    );
    let runner = FakeRunner::new()
        .script("best-cmd", failing(14.0, "crash"))
        .script("backup-cmd", answering(1.0, "ok"));

    Engine::new(&mut store, &runner)
        .answer("hi there", true, &mut NullReporter)
        .await
        .unwrap();

    // The answer path records the failure but not a new latency sample.
    assert_eq!(store.tool("best").unwrap().time_taken, Some(0.9));
}

#[tokio::test]
async fn test_answer_without_autocheck_fails_after_one_invocation() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![
            succeeded(Tool::new("best", "best-cmd", ""), 1.0),
            succeeded(Tool::new("backup", "backup-cmd", ""), 2.0),
        ],
        Some("best"),
    );
    let runner = FakeRunner::new().script("best-cmd", failing(0.5, "down"));

    let err = Engine::new(&mut store, &runner)
        .answer("hi there", false, &mut NullReporter)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AllToolsFailed));
    assert_eq!(runner.call_count(), 1);
    assert_eq!(store.tool("best").unwrap().outcome, RunOutcome::Failed);
    // The backup was never promoted.
    assert_eq!(store.best().as_deref(), Some("best"));
}

#[tokio::test]
async fn test_answer_all_candidates_failing_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![
            succeeded(Tool::new("best", "best-cmd", ""), 1.0),
            succeeded(Tool::new("backup", "backup-cmd", ""), 2.0),
        ],
        Some("best"),
    );
    let runner = FakeRunner::new()
        .script("best-cmd", failing(0.5, "down"))
        .script("backup-cmd", failing(0.6, "also down"));

    let err = Engine::new(&mut store, &runner)
        .answer("hi there", true, &mut NullReporter)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AllToolsFailed));
    assert_eq!(store.tool("backup").unwrap().outcome, RunOutcome::Failed);
}

#[tokio::test]
async fn test_answer_without_best_benchmarks_first() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![Tool::new("fresh", "fresh-cmd", ""), Tool::new("other", "other-cmd", "")],
        None,
    );
    let runner = FakeRunner::new()
        .script("fresh-cmd", passing(0.4))
        .script("other-cmd", passing(1.4))
        .script("fresh-cmd", answering(0.5, "benchmarked answer"));

    let mut reporter = RecordingReporter::default();
    let answer = Engine::new(&mut store, &runner)
        .answer("hi there", true, &mut reporter)
        .await
        .unwrap();

    assert!(reporter.benchmark_triggered);
    assert_eq!(reporter.probes, ["fresh", "other"]);
    assert_eq!(answer.tool, "fresh");
    assert!(answer.primary);
    // Two probes plus the real invocation.
    assert_eq!(runner.call_count(), 3);
}

#[tokio::test]
async fn test_answer_with_no_tools_is_fatal_with_zero_invocations() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, vec![], None);
    let runner = FakeRunner::new();

    let mut reporter = RecordingReporter::default();
    let err = Engine::new(&mut store, &runner)
        .answer("hi there", true, &mut reporter)
        .await
        .unwrap_err();

    assert!(reporter.benchmark_triggered);
    assert!(matches!(err, Error::NoCandidates));
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn test_answer_benchmark_electing_nothing_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, vec![Tool::new("dead", "dead-cmd", "")], None);
    let runner = FakeRunner::new().script("dead-cmd", failing(0.2, "dead"));

    let err = Engine::new(&mut store, &runner)
        .answer("hi there", true, &mut NullReporter)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoCandidates));
    assert_eq!(runner.call_count(), 1);
}

// ── Single-tool invocation ──────────────────────────────────────────────

#[tokio::test]
async fn test_run_tool_unknown_name_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, vec![], None);
    let runner = FakeRunner::new();

    let err = Engine::new(&mut store, &runner)
        .run_tool("ghost", None, false)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(name) if name == "ghost"));
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn test_run_tool_records_success_metrics() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, vec![Tool::new("mytool", "my-cmd", "")], None);
    let runner = FakeRunner::new().script("my-cmd", answering(1.23, "## result"));

    let report = Engine::new(&mut store, &runner)
        .run_tool("mytool", Some("explain this"), false)
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.stdout.as_deref(), Some("## result"));
    let tool = store.tool("mytool").unwrap();
    assert_eq!(tool.outcome, RunOutcome::Succeeded);
    assert_eq!(tool.time_taken, Some(1.23));
    assert!(tool.last_ran.is_some());
}

#[tokio::test]
async fn test_run_tool_records_failure_with_stderr_preference() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, vec![Tool::new("mytool", "my-cmd", "")], None);
    let report = RunReport {
        success: false,
        time_taken: 0.2,
        stdout: None,
        stderr: Some("auth failed".to_string()),
        error: Some("exit status 1".to_string()),
    };
    let runner = FakeRunner::new().script("my-cmd", report);

    let report = Engine::new(&mut store, &runner)
        .run_tool("mytool", None, false)
        .await
        .unwrap();

    assert!(!report.success);
    let tool = store.tool("mytool").unwrap();
    assert_eq!(tool.outcome, RunOutcome::Failed);
    assert_eq!(tool.last_error.as_deref(), Some("auth failed"));
}

#[tokio::test]
async fn test_run_tool_passes_prompt_through() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, vec![Tool::new("mytool", "my-cmd", "")], None);
    let runner = FakeRunner::new().script("my-cmd", passing(0.1));

    Engine::new(&mut store, &runner)
        .run_tool("mytool", Some("a prompt"), false)
        .await
        .unwrap();

    assert_eq!(
        runner.calls()[0],
        (
            "my-cmd".to_string(),
            Some("a prompt".to_string()),
            StdioMode::CaptureAll
        )
    );
}
