// crates/decfuzz-backends/src/postgres_reference.rs
// ============================================================================
// Module: PostgreSQL Reference Adapter
// Description: PostgreSQL-backed reference engine for cross-check trials.
// Purpose: Evaluate trial expressions through a live PostgreSQL connection
//          and map wire results onto trial outcomes.
// Dependencies: decfuzz-core, postgres, tracing
// ============================================================================

//! ## Overview
//! Drives one synchronous PostgreSQL connection as the trusted reference.
//! Each trial runs the statement built by
//! [`crate::query::postgres_crosscheck_query`] and maps the single result
//! cell onto an [`EvalOutcome`]. Unlike MySQL, PostgreSQL raises errors for
//! division and modulo by zero, so those trials surface as `query-error`
//! failures rather than NULL cells.
//!
//! Statement runtime is bounded server-side by `statement_timeout`, passed as
//! a startup option so every statement on the connection inherits it. A
//! cancelled statement reports `SqlState::QUERY_CANCELED` and is classified
//! as a `timeout` failure. PostgreSQL recovers per statement, so the
//! connection is redialed only when the driver reports it closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use decfuzz_core::EvalOutcome;
use decfuzz_core::FailureKind;
use decfuzz_core::ReferenceEngine;
use decfuzz_core::ReferenceEvaluation;
use decfuzz_core::SetupError;
use decfuzz_core::TrialCase;
use postgres::Client;
use postgres::Config;
use postgres::NoTls;
use postgres::error::SqlState;

use crate::query::postgres_crosscheck_query;
use crate::settings::ReferenceSettings;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Reference engine backed by a live PostgreSQL connection.
pub struct PostgresReference {
    /// Active client.
    client: Client,
    /// Connection config kept for redial after the connection closes.
    config: Config,
}

impl PostgresReference {
    /// Connects to the server described by `settings`.
    ///
    /// # Errors
    /// Returns [`SetupError::Reference`] when the connection cannot be
    /// established within the configured timeout.
    pub fn connect(settings: &ReferenceSettings) -> Result<Self, SetupError> {
        let mut config = Config::new();
        config
            .host(&settings.host)
            .port(settings.port)
            .user(&settings.user)
            .password(&settings.password)
            .dbname(&settings.database)
            .connect_timeout(settings.connect_timeout)
            .options(&format!("-c statement_timeout={}", settings.query_timeout.as_millis()));
        let client = config
            .connect(NoTls)
            .map_err(|error| SetupError::Reference(format!("postgres connect failed: {error}")))?;
        tracing::debug!(host = %settings.host, port = settings.port, "postgres reference connected");
        Ok(Self { client, config })
    }

    /// Runs one cross-check statement and maps the first cell to an outcome.
    fn run_query(&mut self, query: &str) -> EvalOutcome {
        match self.client.query_opt(query, &[]) {
            Ok(Some(row)) => match row.try_get::<_, Option<String>>(0) {
                Ok(Some(text)) => EvalOutcome::Value(text),
                Ok(None) => EvalOutcome::failure(FailureKind::NullResult, "NULL result cell"),
                Err(error) => EvalOutcome::failure(
                    FailureKind::Query,
                    format!("result decode failed: {error}"),
                ),
            },
            Ok(None) => EvalOutcome::failure(FailureKind::Query, "statement returned no row"),
            Err(error) => {
                let kind = if error.code() == Some(&SqlState::QUERY_CANCELED) {
                    FailureKind::Timeout
                } else {
                    FailureKind::Query
                };
                if self.client.is_closed() {
                    self.redial();
                }
                EvalOutcome::failure(kind, error.to_string())
            }
        }
    }

    /// Replaces a connection the driver has marked closed.
    fn redial(&mut self) {
        match self.config.connect(NoTls) {
            Ok(client) => {
                self.client = client;
                tracing::debug!("postgres reference reconnected");
            }
            Err(error) => {
                tracing::warn!(error = %error, "postgres reconnect failed");
            }
        }
    }
}

impl ReferenceEngine for PostgresReference {
    fn name(&self) -> &str {
        "postgres"
    }

    fn readiness(&mut self) -> Result<(), SetupError> {
        self.client
            .batch_execute("SELECT 1")
            .map_err(|error| SetupError::Reference(format!("postgres probe failed: {error}")))
    }

    fn evaluate(&mut self, case: &TrialCase) -> ReferenceEvaluation {
        let query = postgres_crosscheck_query(case);
        let outcome = self.run_query(&query);
        ReferenceEvaluation { outcome, query }
    }
}
