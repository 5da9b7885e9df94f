// crates/decfuzz-core/src/core/operator.rs
// ============================================================================
// Module: Arithmetic Operator Set
// Description: The five binary operators exercised by a campaign.
// Purpose: Provide the operator enum and its wire symbols for queries and
//          candidate invocations.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Both engines receive the same operator symbol: the reference inside the
//! SQL expression, the candidate as its third process argument.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Operator
// ============================================================================

/// Binary arithmetic operator applied to an operand pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Decimal addition.
    Add,
    /// Decimal subtraction.
    Subtract,
    /// Decimal multiplication.
    Multiply,
    /// Decimal division.
    Divide,
    /// Decimal modulo.
    Modulo,
}

impl Operator {
    /// All operators in draw order.
    pub const ALL: [Self; 5] =
        [Self::Add, Self::Subtract, Self::Multiply, Self::Divide, Self::Modulo];

    /// Wire symbol understood by both engines.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.symbol())
    }
}
