// crates/decfuzz-backends/src/mysql_reference.rs
// ============================================================================
// Module: MySQL Reference Adapter
// Description: MySQL-backed reference engine for cross-check trials.
// Purpose: Evaluate trial expressions through a live MySQL connection and
//          map wire results onto trial outcomes.
// Dependencies: decfuzz-core, mysql, tracing
// ============================================================================

//! ## Overview
//! Drives one synchronous MySQL connection as the trusted reference. Each
//! trial runs the statement built by [`crate::query::mysql_crosscheck_query`]
//! and maps the single result cell onto an [`EvalOutcome`]:
//!
//! - a string cell becomes [`EvalOutcome::Value`],
//! - a NULL cell becomes a `null-result` failure (MySQL reports division and
//!   modulo by zero this way instead of raising an error),
//! - a server error or dropped connection becomes a `query-error` failure,
//! - a socket deadline becomes a `timeout` failure.
//!
//! A read or write timeout leaves the wire protocol mid-message, so after any
//! I/O error the adapter drops the connection and dials a fresh one before
//! the next trial.

// ============================================================================
// SECTION: Imports
// ============================================================================

use decfuzz_core::EvalOutcome;
use decfuzz_core::FailureKind;
use decfuzz_core::ReferenceEngine;
use decfuzz_core::ReferenceEvaluation;
use decfuzz_core::SetupError;
use decfuzz_core::TrialCase;
use mysql::Conn;
use mysql::Opts;
use mysql::OptsBuilder;
use mysql::Row;
use mysql::prelude::Queryable;

use crate::query::mysql_crosscheck_query;
use crate::settings::ReferenceSettings;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Reference engine backed by a live MySQL connection.
pub struct MysqlReference {
    /// Active connection.
    conn: Conn,
    /// Connection options kept for redial after I/O errors.
    opts: Opts,
}

impl MysqlReference {
    /// Connects to the server described by `settings`.
    ///
    /// # Errors
    /// Returns [`SetupError::Reference`] when the connection cannot be
    /// established within the configured timeout.
    pub fn connect(settings: &ReferenceSettings) -> Result<Self, SetupError> {
        let builder = OptsBuilder::new()
            .ip_or_hostname(Some(settings.host.clone()))
            .tcp_port(settings.port)
            .user(Some(settings.user.clone()))
            .pass(Some(settings.password.clone()))
            .db_name(Some(settings.database.clone()))
            .tcp_connect_timeout(Some(settings.connect_timeout))
            .read_timeout(Some(settings.query_timeout))
            .write_timeout(Some(settings.query_timeout));
        let opts = Opts::from(builder);
        let conn = Conn::new(opts.clone())
            .map_err(|error| SetupError::Reference(format!("mysql connect failed: {error}")))?;
        tracing::debug!(host = %settings.host, port = settings.port, "mysql reference connected");
        Ok(Self { conn, opts })
    }

    /// Runs one cross-check statement and maps the first cell to an outcome.
    fn run_query(&mut self, query: &str) -> EvalOutcome {
        match self.conn.query_first::<Row, _>(query) {
            Ok(Some(row)) => match row.get_opt::<Option<String>, usize>(0) {
                Some(Ok(Some(text))) => EvalOutcome::Value(text),
                Some(Ok(None)) => {
                    EvalOutcome::failure(FailureKind::NullResult, "NULL result cell")
                }
                Some(Err(error)) => EvalOutcome::failure(
                    FailureKind::Query,
                    format!("result decode failed: {error}"),
                ),
                None => EvalOutcome::failure(FailureKind::Query, "result row has no column"),
            },
            Ok(None) => EvalOutcome::failure(FailureKind::Query, "statement returned no row"),
            Err(error) => {
                let (kind, broken) = classify_failure(&error);
                if broken {
                    self.redial();
                }
                EvalOutcome::failure(kind, error.to_string())
            }
        }
    }

    /// Replaces a connection whose protocol state is no longer trustworthy.
    fn redial(&mut self) {
        match Conn::new(self.opts.clone()) {
            Ok(conn) => {
                self.conn = conn;
                tracing::debug!("mysql reference reconnected");
            }
            Err(error) => {
                tracing::warn!(error = %error, "mysql reconnect failed");
            }
        }
    }
}

impl ReferenceEngine for MysqlReference {
    fn name(&self) -> &str {
        "mysql"
    }

    fn readiness(&mut self) -> Result<(), SetupError> {
        self.conn
            .query_drop("SELECT 1")
            .map_err(|error| SetupError::Reference(format!("mysql probe failed: {error}")))
    }

    fn evaluate(&mut self, case: &TrialCase) -> ReferenceEvaluation {
        let query = mysql_crosscheck_query(case);
        let outcome = self.run_query(&query);
        ReferenceEvaluation { outcome, query }
    }
}

// ============================================================================
// SECTION: Error Classification
// ============================================================================

/// Maps a driver error to a failure kind and whether the connection must be
/// redialed.
fn classify_failure(error: &mysql::Error) -> (FailureKind, bool) {
    match error {
        mysql::Error::IoError(io_error) => {
            let timed_out = matches!(
                io_error.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            );
            (if timed_out { FailureKind::Timeout } else { FailureKind::Query }, true)
        }
        _ => (FailureKind::Query, false),
    }
}
