// crates/decfuzz-backends/src/process.rs
// ============================================================================
// Module: Calculator Process Adapter
// Description: Candidate calculator subprocess adapter.
// Purpose: Invoke the calculator under test once per trial and classify its
//          streams into an evaluation outcome.
// Dependencies: decfuzz-core, tracing
// ============================================================================

//! ## Overview
//! The candidate under test is an executable invoked once per trial as
//! `calculator <lhs> <rhs> <operator>` with no stdin. Stream handling defines
//! the outcome:
//!
//! - anything on stderr is a `process-error` failure carrying the stderr text,
//! - otherwise trimmed stdout becomes [`EvalOutcome::Value`], regardless of
//!   exit status,
//! - silence on both streams is `empty-output` on a clean exit and
//!   `process-error` when the exit status is nonzero,
//! - exceeding the deadline kills the child and records a `timeout` failure.
//!
//! Both pipes are drained on dedicated threads while the parent polls
//! `try_wait` against the deadline. A child that fills a pipe the parent is
//! not reading would otherwise block forever and turn one stuck trial into a
//! stuck campaign.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::io::Read;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;
use std::time::Instant;

use decfuzz_core::CandidateEngine;
use decfuzz_core::EvalOutcome;
use decfuzz_core::FailureKind;
use decfuzz_core::SetupError;
use decfuzz_core::TrialCase;

use crate::settings::CandidateSettings;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Interval between child exit checks while the deadline runs down.
const POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Candidate engine backed by one subprocess invocation per trial.
#[derive(Debug, Clone)]
pub struct ProcessCandidate {
    /// Command path and invocation deadline.
    settings: CandidateSettings,
}

impl ProcessCandidate {
    /// Builds the adapter around the configured calculator.
    #[must_use]
    pub const fn new(settings: CandidateSettings) -> Self {
        Self { settings }
    }

    /// Runs one calculator invocation for `case`.
    fn invoke(&self, case: &TrialCase) -> EvalOutcome {
        let mut child = match Command::new(&self.settings.command)
            .arg(case.lhs.to_string())
            .arg(case.rhs.to_string())
            .arg(case.operator.symbol())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(error) => {
                return EvalOutcome::failure(FailureKind::Process, format!("spawn failed: {error}"));
            }
        };
        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return EvalOutcome::failure(FailureKind::Process, "stdout pipe missing");
        };
        let Some(stderr) = child.stderr.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return EvalOutcome::failure(FailureKind::Process, "stderr pipe missing");
        };
        let stdout_reader = spawn_reader(stdout);
        let stderr_reader = spawn_reader(stderr);

        let deadline = Instant::now() + self.settings.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        // Reader threads are left behind; they finish on pipe
                        // close without blocking this return.
                        tracing::debug!(
                            expression = %case.expression(),
                            timeout_ms = self.settings.timeout.as_millis(),
                            "candidate timed out"
                        );
                        return EvalOutcome::failure(
                            FailureKind::Timeout,
                            format!(
                                "candidate exceeded {}ms deadline",
                                self.settings.timeout.as_millis()
                            ),
                        );
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(error) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return EvalOutcome::failure(
                        FailureKind::Process,
                        format!("wait failed: {error}"),
                    );
                }
            }
        };

        let stdout_text = match collect_reader(stdout_reader) {
            Ok(text) => text,
            Err(outcome) => return outcome,
        };
        let stderr_text = match collect_reader(stderr_reader) {
            Ok(text) => text,
            Err(outcome) => return outcome,
        };
        classify_streams(status, &stdout_text, &stderr_text)
    }
}

impl CandidateEngine for ProcessCandidate {
    fn name(&self) -> &str {
        "process"
    }

    fn readiness(&mut self) -> Result<(), SetupError> {
        let metadata = fs::metadata(&self.settings.command).map_err(|error| {
            SetupError::Candidate(format!(
                "calculator not accessible at {}: {error}",
                self.settings.command.display()
            ))
        })?;
        if !metadata.is_file() {
            return Err(SetupError::Candidate(format!(
                "calculator path {} is not a regular file",
                self.settings.command.display()
            )));
        }
        Ok(())
    }

    fn evaluate(&mut self, case: &TrialCase) -> EvalOutcome {
        self.invoke(case)
    }
}

// ============================================================================
// SECTION: Stream Handling
// ============================================================================

/// Drains one child stream to a string on its own thread.
fn spawn_reader<R>(mut source: R) -> JoinHandle<io::Result<String>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = String::new();
        source.read_to_string(&mut buffer)?;
        Ok(buffer)
    })
}

/// Joins one reader thread, mapping read and join failures to outcomes.
fn collect_reader(handle: JoinHandle<io::Result<String>>) -> Result<String, EvalOutcome> {
    match handle.join() {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(error)) => Err(EvalOutcome::failure(
            FailureKind::Process,
            format!("stream read failed: {error}"),
        )),
        Err(_panic) => Err(EvalOutcome::failure(
            FailureKind::Process,
            "stream reader thread failed",
        )),
    }
}

/// Classifies drained streams and exit status into an outcome.
fn classify_streams(status: ExitStatus, stdout_text: &str, stderr_text: &str) -> EvalOutcome {
    let stderr_text = stderr_text.trim();
    if !stderr_text.is_empty() {
        return EvalOutcome::failure(FailureKind::Process, stderr_text);
    }
    let stdout_text = stdout_text.trim();
    if stdout_text.is_empty() {
        if status.success() {
            return EvalOutcome::failure(FailureKind::EmptyOutput, "no output on either stream");
        }
        return EvalOutcome::failure(
            FailureKind::Process,
            format!("no output and nonzero exit ({status})"),
        );
    }
    EvalOutcome::Value(stdout_text.to_string())
}
