// crates/decfuzz-backends/tests/process_adapter.rs
// ============================================================================
// Module: Process Adapter Tests
// Description: Subprocess candidate behavior against scripted calculators.
// Purpose: Pin argv order, stream classification, exit status handling,
//          deadline enforcement, and readiness checks.
// ============================================================================

//! Candidate subprocess tests using throwaway shell scripts.

#![cfg(unix)]
#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::time::Duration;
use std::time::Instant;

use decfuzz_backends::CandidateSettings;
use decfuzz_backends::ProcessCandidate;
use decfuzz_core::CandidateEngine;
use decfuzz_core::DecimalOperand;
use decfuzz_core::EvalFailure;
use decfuzz_core::EvalOutcome;
use decfuzz_core::FailureKind;
use decfuzz_core::Operator;
use decfuzz_core::TrialCase;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn case(lhs: &str, rhs: &str, operator: Operator) -> TrialCase {
    TrialCase {
        lhs: DecimalOperand::parse(lhs).expect("lhs operand"),
        rhs: DecimalOperand::parse(rhs).expect("rhs operand"),
        operator,
    }
}

fn script_candidate(body: &str, timeout_ms: u64) -> (TempDir, ProcessCandidate) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("calculator.sh");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut permissions = fs::metadata(&path).expect("stat script").permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).expect("mark script executable");
    let candidate = ProcessCandidate::new(CandidateSettings {
        command: path,
        timeout: Duration::from_millis(timeout_ms),
    });
    (dir, candidate)
}

fn expect_value(outcome: EvalOutcome) -> String {
    match outcome {
        EvalOutcome::Value(text) => text,
        EvalOutcome::Failure(failure) => panic!("unexpected failure: {failure:?}"),
    }
}

fn expect_failure(outcome: EvalOutcome) -> EvalFailure {
    match outcome {
        EvalOutcome::Value(text) => panic!("unexpected value: {text}"),
        EvalOutcome::Failure(failure) => failure,
    }
}

// ============================================================================
// SECTION: Stream Classification
// ============================================================================

#[test]
fn stdout_value_round_trips_trimmed() {
    let (_dir, mut candidate) = script_candidate("printf '  42.5\\n'", 2_000);
    let value = expect_value(candidate.evaluate(&case("40", "2.5", Operator::Add)));
    assert_eq!(value, "42.5");
}

#[test]
fn arguments_arrive_in_operand_operand_operator_order() {
    let (_dir, mut candidate) =
        script_candidate("printf '%s|%s|%s' \"$1\" \"$2\" \"$3\"", 2_000);
    let value = expect_value(candidate.evaluate(&case("1.50", "-2", Operator::Modulo)));
    assert_eq!(value, "1.50|-2|%");
}

#[test]
fn stderr_takes_precedence_over_stdout() {
    let (_dir, mut candidate) =
        script_candidate("echo 'Invalid Decimal string (arg1)' >&2\necho '7'", 2_000);
    let failure = expect_failure(candidate.evaluate(&case("1", "2", Operator::Add)));
    assert_eq!(failure.kind, FailureKind::Process);
    assert_eq!(failure.message, "Invalid Decimal string (arg1)");
}

#[test]
fn silence_on_clean_exit_is_empty_output() {
    let (_dir, mut candidate) = script_candidate("exit 0", 2_000);
    let failure = expect_failure(candidate.evaluate(&case("1", "2", Operator::Add)));
    assert_eq!(failure.kind, FailureKind::EmptyOutput);
}

#[test]
fn silence_with_nonzero_exit_is_a_process_failure() {
    let (_dir, mut candidate) = script_candidate("exit 3", 2_000);
    let failure = expect_failure(candidate.evaluate(&case("1", "2", Operator::Add)));
    assert_eq!(failure.kind, FailureKind::Process);
}

#[test]
fn stdout_wins_even_on_nonzero_exit() {
    let (_dir, mut candidate) = script_candidate("echo '12.5'\nexit 1", 2_000);
    let value = expect_value(candidate.evaluate(&case("25", "2", Operator::Divide)));
    assert_eq!(value, "12.5");
}

// ============================================================================
// SECTION: Deadline Enforcement
// ============================================================================

#[test]
fn slow_calculator_is_killed_at_the_deadline() {
    let (_dir, mut candidate) = script_candidate("exec sleep 5", 150);
    let started = Instant::now();
    let failure = expect_failure(candidate.evaluate(&case("1", "2", Operator::Add)));
    assert_eq!(failure.kind, FailureKind::Timeout);
    assert!(started.elapsed() < Duration::from_secs(2), "kill took too long");
}

// ============================================================================
// SECTION: Readiness and Spawn Failures
// ============================================================================

#[test]
fn readiness_accepts_an_existing_executable() {
    let (_dir, mut candidate) = script_candidate("echo ok", 2_000);
    assert!(candidate.readiness().is_ok());
}

#[test]
fn readiness_rejects_a_missing_path() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut candidate = ProcessCandidate::new(CandidateSettings {
        command: dir.path().join("absent.sh"),
        timeout: Duration::from_millis(500),
    });
    assert!(candidate.readiness().is_err());
}

#[test]
fn readiness_rejects_a_directory() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut candidate = ProcessCandidate::new(CandidateSettings {
        command: dir.path().to_path_buf(),
        timeout: Duration::from_millis(500),
    });
    assert!(candidate.readiness().is_err());
}

#[test]
fn unexecutable_file_reports_a_process_failure() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("calculator.sh");
    fs::write(&path, "#!/bin/sh\necho 1\n").expect("write script");
    let mut candidate = ProcessCandidate::new(CandidateSettings {
        command: path,
        timeout: Duration::from_millis(500),
    });
    let failure = expect_failure(candidate.evaluate(&case("1", "2", Operator::Add)));
    assert_eq!(failure.kind, FailureKind::Process);
    assert!(failure.message.starts_with("spawn failed"));
}
