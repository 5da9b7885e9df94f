// crates/decfuzz-core/src/core/mod.rs
// ============================================================================
// Module: Core Types
// Description: Operand, operator, generator, and trial record types.
// Purpose: Provide the data model shared by the runtime and the backends.
// Dependencies: rand, serde, thiserror
// ============================================================================

//! ## Overview
//! Core types model everything a trial is made of: the generated operands,
//! the operator between them, the outcome captured per engine, and the
//! campaign counters.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod generator;
pub mod operand;
pub mod operator;
pub mod trial;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use generator::GenerationMode;
pub use generator::GeneratorConfig;
pub use generator::GeneratorError;
pub use generator::OperandGenerator;
pub use operand::DecimalOperand;
pub use operand::OperandError;
pub use operator::Operator;
pub use trial::CampaignStats;
pub use trial::EvalFailure;
pub use trial::EvalOutcome;
pub use trial::FailureKind;
pub use trial::ReferenceEvaluation;
pub use trial::TrialCase;
pub use trial::TrialRecord;
