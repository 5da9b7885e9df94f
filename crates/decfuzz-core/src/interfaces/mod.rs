// crates/decfuzz-core/src/interfaces/mod.rs
// ============================================================================
// Module: Engine and Reporting Interfaces
// Description: Trait seams between the campaign runner and its backends.
// Purpose: Keep the runner independent of concrete database clients, process
//          handling, and output formatting.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The runner drives one [`ReferenceEngine`] and one [`CandidateEngine`] and
//! pushes campaign events into a [`ReportSink`]. Per-trial engine problems
//! are returned as outcome data; only setup-class problems surface as errors
//! and abort the campaign before the first trial.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::trial::CampaignStats;
use crate::core::trial::EvalOutcome;
use crate::core::trial::ReferenceEvaluation;
use crate::core::trial::TrialCase;
use crate::core::trial::TrialRecord;
use crate::runtime::oracle::Verdict;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal pre-trial failures; anything after setup is recorded as trial data.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The reference backend could not be reached or probed.
    #[error("reference backend unavailable: {0}")]
    Reference(String),
    /// The candidate engine is missing or not runnable.
    #[error("candidate engine unavailable: {0}")]
    Candidate(String),
}

// ============================================================================
// SECTION: Engine Interfaces
// ============================================================================

/// Oracle-of-record side of a trial, usually a production SQL engine.
pub trait ReferenceEngine {
    /// Short backend label used in reports.
    fn name(&self) -> &str;

    /// Probes the backend before the first trial.
    ///
    /// # Errors
    /// Returns [`SetupError::Reference`] when the probe fails.
    fn readiness(&mut self) -> Result<(), SetupError>;

    /// Evaluates one case, capturing the statement text alongside the
    /// outcome. Statement failures are outcome data, never errors.
    fn evaluate(&mut self, case: &TrialCase) -> ReferenceEvaluation;
}

/// Engine under test.
pub trait CandidateEngine {
    /// Short engine label used in reports.
    fn name(&self) -> &str;

    /// Probes the engine before the first trial.
    ///
    /// # Errors
    /// Returns [`SetupError::Candidate`] when the engine cannot run.
    fn readiness(&mut self) -> Result<(), SetupError>;

    /// Evaluates one case. Engine failures are outcome data, never errors.
    fn evaluate(&mut self, case: &TrialCase) -> EvalOutcome;
}

// ============================================================================
// SECTION: Reporting Interface
// ============================================================================

/// Receiver for campaign events, implemented by the front end.
pub trait ReportSink {
    /// Called immediately for every mismatched trial with full repro context.
    fn mismatch(&mut self, sequence: u64, record: &TrialRecord, verdict: &Verdict);

    /// Called on the progress cadence with the running counters.
    fn progress(&mut self, completed: u64, total: u64, stats: &CampaignStats);

    /// Called once after the final trial with the closing counters.
    fn summary(&mut self, stats: &CampaignStats);
}
