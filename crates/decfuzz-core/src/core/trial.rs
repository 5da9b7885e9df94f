// crates/decfuzz-core/src/core/trial.rs
// ============================================================================
// Module: Trial Data Model
// Description: Cases, evaluation outcomes, trial records, and campaign stats.
// Purpose: Provide the shared record types flowing between the generator, the
//          engine adapters, the oracle, and report sinks.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A trial pairs two operands with an operator, collects one outcome per
//! engine, and is judged by the oracle. Engine-level problems during a trial
//! are captured as [`EvalFailure`] data rather than propagated as errors, so
//! a campaign keeps running through rejected inputs, aborted children, and
//! failed queries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::operand::DecimalOperand;
use crate::core::operator::Operator;

// ============================================================================
// SECTION: Trial Case
// ============================================================================

/// One generated expression presented to both engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialCase {
    /// Left operand.
    pub lhs: DecimalOperand,
    /// Right operand.
    pub rhs: DecimalOperand,
    /// Operator applied between the operands.
    pub operator: Operator,
}

impl TrialCase {
    /// Renders the expression as `lhs op rhs` for reports.
    #[must_use]
    pub fn expression(&self) -> String {
        format!("{} {} {}", self.lhs, self.operator, self.rhs)
    }
}

// ============================================================================
// SECTION: Evaluation Outcomes
// ============================================================================

/// Failure classes an engine adapter can record for a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The reference statement was rejected or the connection dropped.
    Query,
    /// The reference returned a NULL result cell.
    NullResult,
    /// The candidate process failed to run or reported on stderr.
    Process,
    /// The candidate exited silently with nothing on stdout.
    EmptyOutput,
    /// The engine exceeded its evaluation deadline.
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Query => "query-error",
            Self::NullResult => "null-result",
            Self::Process => "process-error",
            Self::EmptyOutput => "empty-output",
            Self::Timeout => "timeout",
        };
        formatter.write_str(label)
    }
}

/// One recorded engine failure with its diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalFailure {
    /// Failure classification.
    pub kind: FailureKind,
    /// Diagnostic message as reported by the engine.
    pub message: String,
}

impl EvalFailure {
    /// Builds a failure record.
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    /// Returns true when the message names an overflow condition.
    #[must_use]
    pub fn is_overflow_class(&self) -> bool {
        self.message.to_ascii_lowercase().contains("overflow")
    }
}

/// Result of presenting one trial to one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalOutcome {
    /// The engine produced a decimal text.
    Value(String),
    /// The engine failed; the failure is trial data, not a campaign error.
    Failure(EvalFailure),
}

impl EvalOutcome {
    /// Shorthand for a failure outcome.
    #[must_use]
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure(EvalFailure::new(kind, message))
    }

    /// Returns true for a failure outcome.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

impl fmt::Display for EvalOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(text) => write!(formatter, "value {text}"),
            Self::Failure(failure) => {
                write!(formatter, "failure [{}] {}", failure.kind, failure.message)
            }
        }
    }
}

/// Reference outcome together with the statement that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEvaluation {
    /// Outcome recorded for the reference engine.
    pub outcome: EvalOutcome,
    /// Statement text sent to the reference, kept for mismatch reports.
    pub query: String,
}

/// Complete evidence for one finished trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Generated case.
    pub case: TrialCase,
    /// Reference evaluation with its query text.
    pub reference: ReferenceEvaluation,
    /// Candidate outcome.
    pub candidate: EvalOutcome,
}

// ============================================================================
// SECTION: Campaign Statistics
// ============================================================================

/// Running counters owned by the campaign runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStats {
    /// Trials attempted so far.
    pub attempted: u64,
    /// Trials judged equivalent.
    pub passed: u64,
    /// Trials judged mismatched.
    pub failed: u64,
}

impl CampaignStats {
    /// Records one equivalent trial.
    pub const fn record_pass(&mut self) {
        self.attempted += 1;
        self.passed += 1;
    }

    /// Records one mismatched trial.
    pub const fn record_fail(&mut self) {
        self.attempted += 1;
        self.failed += 1;
    }

    /// Returns true when every attempted trial is accounted for.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.passed + self.failed == self.attempted
    }
}
