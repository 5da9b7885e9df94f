// crates/decfuzz-backends/src/settings.rs
// ============================================================================
// Module: Backend Connection Settings
// Description: Connection settings and reference engine selection.
// Purpose: Describe how to reach both engines and construct the selected
//          reference behind the core engine interface.
// Dependencies: decfuzz-core
// ============================================================================

//! ## Overview
//! Both SQL references accept the same settings shape. The backend choice is
//! a separate [`ReferenceKind`] value so callers resolve defaults such as the
//! port before this crate ever sees them. [`connect_reference`] is the single
//! construction point for reference engines and returns the boxed trait
//! object the campaign runner drives.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use decfuzz_core::ReferenceEngine;
use decfuzz_core::SetupError;

use crate::mysql_reference::MysqlReference;
use crate::postgres_reference::PostgresReference;

// ============================================================================
// SECTION: Engine Selection
// ============================================================================

/// Which SQL engine serves as the trusted reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// MySQL over its native wire protocol.
    Mysql,
    /// PostgreSQL over its native wire protocol.
    Postgres,
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Connection settings shared by both SQL reference engines.
///
/// Debug is deliberately not derived so the password cannot leak through
/// formatting.
#[derive(Clone)]
pub struct ReferenceSettings {
    /// Server hostname or IP address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Login user.
    pub user: String,
    /// Login password, possibly empty.
    pub password: String,
    /// Database (schema) to attach to.
    pub database: String,
    /// Bound on establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Bound on each cross-check statement.
    pub query_timeout: Duration,
}

/// Settings for the candidate calculator subprocess.
#[derive(Debug, Clone)]
pub struct CandidateSettings {
    /// Path to the calculator executable.
    pub command: PathBuf,
    /// Bound on each calculator invocation.
    pub timeout: Duration,
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Connects the selected reference engine.
///
/// # Errors
/// Returns [`SetupError::Reference`] when the connection cannot be
/// established within the configured timeout.
pub fn connect_reference(
    kind: ReferenceKind,
    settings: &ReferenceSettings,
) -> Result<Box<dyn ReferenceEngine>, SetupError> {
    match kind {
        ReferenceKind::Mysql => Ok(Box::new(MysqlReference::connect(settings)?)),
        ReferenceKind::Postgres => Ok(Box::new(PostgresReference::connect(settings)?)),
    }
}
