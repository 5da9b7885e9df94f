// crates/decfuzz-core/src/lib.rs
// ============================================================================
// Module: Decfuzz Core Library
// Description: Public API surface for the decfuzz core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Decfuzz core implements the engine-independent parts of a decimal
//! crosscheck campaign: operand generation, the trial data model, the
//! equivalence oracle, and the sequential runner. Concrete engines plug in
//! through explicit interfaces rather than being baked into the loop.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::CampaignStats;
pub use crate::core::DecimalOperand;
pub use crate::core::EvalFailure;
pub use crate::core::EvalOutcome;
pub use crate::core::FailureKind;
pub use crate::core::GenerationMode;
pub use crate::core::GeneratorConfig;
pub use crate::core::GeneratorError;
pub use crate::core::OperandError;
pub use crate::core::OperandGenerator;
pub use crate::core::Operator;
pub use crate::core::ReferenceEvaluation;
pub use crate::core::TrialCase;
pub use crate::core::TrialRecord;
pub use crate::interfaces::CandidateEngine;
pub use crate::interfaces::ReferenceEngine;
pub use crate::interfaces::ReportSink;
pub use crate::interfaces::SetupError;
pub use crate::runtime::CampaignConfig;
pub use crate::runtime::CampaignError;
pub use crate::runtime::CampaignPhase;
pub use crate::runtime::CampaignRunner;
pub use crate::runtime::EquivalenceRule;
pub use crate::runtime::MismatchReason;
pub use crate::runtime::Verdict;
pub use crate::runtime::compare_outcomes;
pub use crate::runtime::compare_values;
