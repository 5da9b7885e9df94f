// crates/decfuzz-core/src/runtime/campaign.rs
// ============================================================================
// Module: Campaign Runner
// Description: Sequential trial loop driving both engines and the oracle.
// Purpose: Own the campaign counters and phase, regenerate skipped draws,
//          and push mismatch, progress, and summary events to the sink.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A campaign probes both engines, then runs the configured number of trials
//! strictly in sequence: draw a case, evaluate it on the reference and the
//! candidate, judge the pair, update the counters. Mismatches are pushed to
//! the sink the moment they are found, with the full record needed to replay
//! the trial by hand; equivalent trials leave nothing behind but a counter
//! increment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::generator::OperandGenerator;
use crate::core::trial::CampaignStats;
use crate::core::trial::TrialCase;
use crate::core::trial::TrialRecord;
use crate::interfaces::CandidateEngine;
use crate::interfaces::ReferenceEngine;
use crate::interfaces::ReportSink;
use crate::interfaces::SetupError;
use crate::runtime::oracle::compare_outcomes;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Consecutive generator skips tolerated before the campaign aborts.
const MAX_CONSECUTIVE_SKIPS: u32 = 1024;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Runner settings fixed for the lifetime of a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignConfig {
    /// Number of trials to run.
    pub trials: u64,
    /// Progress event cadence in trials; zero disables progress events.
    pub progress_interval: u64,
    /// Candidate total digit capacity, used by the overflow allowance.
    pub candidate_max_precision: usize,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self { trials: 1000, progress_interval: 100, candidate_max_precision: 65 }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Campaign-fatal failures.
#[derive(Debug, Error)]
pub enum CampaignError {
    /// `run` was called while a campaign was already in progress.
    #[error("campaign already in progress")]
    Busy,
    /// The generator produced nothing but skips.
    #[error("operand generation stalled after {skips} consecutive skips")]
    GeneratorStalled {
        /// Consecutive skip count at abort.
        skips: u32,
    },
    /// An engine failed its pre-trial probe.
    #[error(transparent)]
    Setup(#[from] SetupError),
    /// The counters no longer account for every attempted trial.
    #[error("trial accounting drift: {attempted} attempted, {resolved} resolved")]
    CounterDrift {
        /// Trials attempted.
        attempted: u64,
        /// Trials resolved as passed or failed.
        resolved: u64,
    },
}

// ============================================================================
// SECTION: Campaign Runner
// ============================================================================

/// Campaign lifecycle position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignPhase {
    /// No campaign in progress.
    Idle,
    /// Trials are being executed.
    Running,
    /// The closing summary is being emitted.
    Reporting,
}

/// Sequential campaign driver owning the engines and counters.
pub struct CampaignRunner {
    /// Runner settings.
    config: CampaignConfig,
    /// Operand and operator source.
    generator: OperandGenerator,
    /// Oracle-of-record engine.
    reference: Box<dyn ReferenceEngine>,
    /// Engine under test.
    candidate: Box<dyn CandidateEngine>,
    /// Running counters; owned here and nowhere else.
    stats: CampaignStats,
    /// Lifecycle position.
    phase: CampaignPhase,
}

impl CampaignRunner {
    /// Builds an idle runner.
    #[must_use]
    pub fn new(
        config: CampaignConfig,
        generator: OperandGenerator,
        reference: Box<dyn ReferenceEngine>,
        candidate: Box<dyn CandidateEngine>,
    ) -> Self {
        Self {
            config,
            generator,
            reference,
            candidate,
            stats: CampaignStats::default(),
            phase: CampaignPhase::Idle,
        }
    }

    /// Runs one full campaign and returns the closing counters.
    ///
    /// # Errors
    /// Returns [`CampaignError`] when a probe fails, the generator stalls,
    /// or the counters drift; mismatched trials are not errors.
    pub fn run(&mut self, sink: &mut dyn ReportSink) -> Result<CampaignStats, CampaignError> {
        if self.phase != CampaignPhase::Idle {
            return Err(CampaignError::Busy);
        }
        self.phase = CampaignPhase::Running;
        let outcome = self.execute_trials(sink);
        let result = match outcome {
            Ok(()) => {
                self.phase = CampaignPhase::Reporting;
                if self.stats.is_consistent() {
                    sink.summary(&self.stats);
                    Ok(self.stats.clone())
                } else {
                    Err(CampaignError::CounterDrift {
                        attempted: self.stats.attempted,
                        resolved: self.stats.passed + self.stats.failed,
                    })
                }
            }
            Err(error) => Err(error),
        };
        self.phase = CampaignPhase::Idle;
        result
    }

    /// Counters of the most recent run.
    #[must_use]
    pub const fn stats(&self) -> &CampaignStats {
        &self.stats
    }

    /// Current lifecycle position.
    #[must_use]
    pub const fn phase(&self) -> CampaignPhase {
        self.phase
    }

    /// Probes both engines, then drives every trial.
    fn execute_trials(&mut self, sink: &mut dyn ReportSink) -> Result<(), CampaignError> {
        self.reference.readiness()?;
        self.candidate.readiness()?;
        self.stats = CampaignStats::default();
        for sequence in 1..=self.config.trials {
            let case = self.next_case()?;
            let reference = self.reference.evaluate(&case);
            let candidate = self.candidate.evaluate(&case);
            let verdict = compare_outcomes(
                &reference.outcome,
                &candidate,
                self.config.candidate_max_precision,
            );
            if verdict.is_equivalent() {
                self.stats.record_pass();
            } else {
                self.stats.record_fail();
                let record = TrialRecord { case, reference, candidate };
                sink.mismatch(sequence, &record, &verdict);
            }
            if self.config.progress_interval > 0
                && sequence % self.config.progress_interval == 0
            {
                sink.progress(sequence, self.config.trials, &self.stats);
            }
        }
        Ok(())
    }

    /// Draws the next case, regenerating the whole trial on a skip.
    fn next_case(&mut self) -> Result<TrialCase, CampaignError> {
        let mut skips = 0_u32;
        loop {
            let Some(lhs) = self.generator.draw() else {
                skips += 1;
                if skips >= MAX_CONSECUTIVE_SKIPS {
                    return Err(CampaignError::GeneratorStalled { skips });
                }
                continue;
            };
            let Some(rhs) = self.generator.draw() else {
                skips += 1;
                if skips >= MAX_CONSECUTIVE_SKIPS {
                    return Err(CampaignError::GeneratorStalled { skips });
                }
                continue;
            };
            let operator = self.generator.pick_operator();
            return Ok(TrialCase { lhs, rhs, operator });
        }
    }
}
