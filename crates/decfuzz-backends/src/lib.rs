// crates/decfuzz-backends/src/lib.rs
// ============================================================================
// Module: Decfuzz Backends Library
// Description: Concrete engine adapters for the crosscheck campaign.
// Purpose: Expose SQL reference engines and the subprocess candidate engine.
// Dependencies: decfuzz-core, mysql, postgres, tracing
// ============================================================================

//! ## Overview
//! Implementations of the core engine interfaces: MySQL and PostgreSQL
//! reference adapters sharing one settings shape, the calculator subprocess
//! candidate adapter, and the statement builders both references render
//! trials through.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod mysql_reference;
pub mod postgres_reference;
pub mod process;
pub mod query;
pub mod settings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::mysql_reference::MysqlReference;
pub use crate::postgres_reference::PostgresReference;
pub use crate::process::ProcessCandidate;
pub use crate::query::CAST_PRECISION;
pub use crate::query::mysql_crosscheck_query;
pub use crate::query::postgres_crosscheck_query;
pub use crate::settings::CandidateSettings;
pub use crate::settings::ReferenceKind;
pub use crate::settings::ReferenceSettings;
pub use crate::settings::connect_reference;
