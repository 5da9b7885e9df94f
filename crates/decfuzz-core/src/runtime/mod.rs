// crates/decfuzz-core/src/runtime/mod.rs
// ============================================================================
// Module: Runtime
// Description: Equivalence oracle and sequential campaign runner.
// Purpose: Turn generated cases and engine outcomes into judged, counted
//          trials.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime is the engine-independent half of a campaign: the oracle
//! judges outcome pairs and the runner drives the loop, leaving all engine
//! specifics behind the interface traits.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod campaign;
pub mod oracle;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use campaign::CampaignConfig;
pub use campaign::CampaignError;
pub use campaign::CampaignPhase;
pub use campaign::CampaignRunner;
pub use oracle::EquivalenceRule;
pub use oracle::MismatchReason;
pub use oracle::Verdict;
pub use oracle::compare_outcomes;
pub use oracle::compare_values;
