// crates/decfuzz-config/src/lib.rs
// ============================================================================
// Module: Decfuzz Config Library
// Description: Public API surface for campaign configuration.
// Purpose: Expose config loading, validation, and typed sections.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! TOML-backed configuration for decfuzz campaigns: one config type with
//! campaign, generator, reference, and candidate sections, strict validation
//! limits, and builders that map onto the core runner settings.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::config::BackendKind;
pub use crate::config::CampaignSection;
pub use crate::config::CandidateSection;
pub use crate::config::ConfigError;
pub use crate::config::FuzzConfig;
pub use crate::config::GeneratorSection;
pub use crate::config::ReferenceSection;
pub use crate::config::SummaryFormat;
