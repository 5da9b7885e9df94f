// crates/decfuzz-backends/src/query.rs
// ============================================================================
// Module: Cross-Check Statement Builders
// Description: SQL statement rendering for the reference engines.
// Purpose: Render one trial into the exact CAST expression each engine runs.
// Dependencies: decfuzz-core
// ============================================================================

//! ## Overview
//! Reference engines do not interpolate SQL themselves. Every trial is
//! rendered here into a single-row, single-column statement that casts both
//! operand literals to the engine's widest decimal type, applies the trial
//! operator, and casts the result back to text so the wire cell is always a
//! string the oracle can consume.
//!
//! Operand literals come from [`DecimalOperand`]'s display form, which can
//! only contain digits, one optional leading minus, and one optional decimal
//! point. The literals are still single-quoted so the statement stays valid
//! SQL for any operand the generator can produce.
//!
//! Each cast pins the operand's own scale. The scale is the operand's literal
//! fractional digit count, so a trailing-zero literal such as `1.500` casts at
//! scale 3 and the engine sees exactly the precision the text spells out.
//!
//! [`DecimalOperand`]: decfuzz_core::DecimalOperand

// ============================================================================
// SECTION: Imports
// ============================================================================

use decfuzz_core::TrialCase;

// ============================================================================
// SECTION: Cast Parameters
// ============================================================================

/// Digit capacity requested from both engines' decimal types.
pub const CAST_PRECISION: usize = 65;

// ============================================================================
// SECTION: Statement Builders
// ============================================================================

/// Renders the MySQL cross-check statement for one trial.
///
/// MySQL caps `DECIMAL` scale at 30. Operands with a wider scale still render
/// here unchanged and surface as per-trial query failures when the server
/// rejects the cast.
#[must_use]
pub fn mysql_crosscheck_query(case: &TrialCase) -> String {
    format!(
        "SELECT CAST(CAST('{lhs}' AS DECIMAL({precision}, {lhs_scale})) {operator} \
         CAST('{rhs}' AS DECIMAL({precision}, {rhs_scale})) AS CHAR)",
        lhs = case.lhs,
        rhs = case.rhs,
        operator = case.operator.symbol(),
        precision = CAST_PRECISION,
        lhs_scale = case.lhs.scale(),
        rhs_scale = case.rhs.scale(),
    )
}

/// Renders the PostgreSQL cross-check statement for one trial.
#[must_use]
pub fn postgres_crosscheck_query(case: &TrialCase) -> String {
    format!(
        "SELECT CAST(CAST('{lhs}' AS NUMERIC({precision}, {lhs_scale})) {operator} \
         CAST('{rhs}' AS NUMERIC({precision}, {rhs_scale})) AS TEXT)",
        lhs = case.lhs,
        rhs = case.rhs,
        operator = case.operator.symbol(),
        precision = CAST_PRECISION,
        lhs_scale = case.lhs.scale(),
        rhs_scale = case.rhs.scale(),
    )
}
