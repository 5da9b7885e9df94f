// crates/decfuzz-core/src/core/operand.rs
// ============================================================================
// Module: Decimal Operand Model
// Description: Sign, significant digits, and scale for generated decimals.
// Purpose: Provide the immutable operand form shared by the generator, the
//          engine adapters, and mismatch reports.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`DecimalOperand`] carries a decimal value exactly as it is presented to
//! both engines: an optional sign, the significant digit sequence, and the
//! number of fractional digits. Rendering and parsing round-trip, so boundary
//! texts such as `9223372036.854775807000` keep their trailing zeros and with
//! them their literal cast scale.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rejection reasons for operand construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    /// A digit value fell outside `0..=9`.
    #[error("operand digit {value} is outside the decimal digit range")]
    DigitRange {
        /// Offending digit value.
        value: u8,
    },
    /// The significant digit sequence started with zero.
    #[error("operand digits carry a leading zero")]
    LeadingZero,
    /// The operand text was empty.
    #[error("operand text is empty")]
    Empty,
    /// The operand text was not a plain signed decimal literal.
    #[error("operand text is not a plain decimal literal: {text}")]
    Malformed {
        /// Rejected input text.
        text: String,
    },
}

// ============================================================================
// SECTION: Decimal Operand
// ============================================================================

/// One generated decimal value, immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalOperand {
    /// Sign flag; zero is always stored non-negative.
    negative: bool,
    /// Significant digits, most significant first. Empty means zero.
    digits: Vec<u8>,
    /// Count of fractional digits in the rendered text.
    scale: usize,
}

impl DecimalOperand {
    /// Builds an operand from raw parts.
    ///
    /// The digit sequence must hold values in `0..=9` and must not begin with
    /// zero; the zero value is the empty sequence. A negative flag on a zero
    /// magnitude is dropped.
    ///
    /// # Errors
    /// Returns [`OperandError`] when a digit is out of range or the sequence
    /// carries a leading zero.
    pub fn new(negative: bool, digits: Vec<u8>, scale: usize) -> Result<Self, OperandError> {
        if let Some(&value) = digits.iter().find(|&&digit| digit > 9) {
            return Err(OperandError::DigitRange { value });
        }
        if digits.first() == Some(&0) {
            return Err(OperandError::LeadingZero);
        }
        Ok(Self { negative: negative && !digits.is_empty(), digits, scale })
    }

    /// Parses a plain decimal literal of the form `-?digits(.digits)?`.
    ///
    /// Leading integer zeros are canonicalized away; fractional digits are
    /// kept verbatim so the text round-trips, trailing zeros included.
    ///
    /// # Errors
    /// Returns [`OperandError`] when the text is empty or not a plain decimal
    /// literal.
    pub fn parse(text: &str) -> Result<Self, OperandError> {
        if text.is_empty() {
            return Err(OperandError::Empty);
        }
        let (negative, magnitude) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (integer, fraction) = match magnitude.split_once('.') {
            Some((integer, fraction)) if !fraction.is_empty() => (integer, fraction),
            Some(_) => return Err(OperandError::Malformed { text: text.to_string() }),
            None => (magnitude, ""),
        };
        if integer.is_empty()
            || !integer.bytes().all(|byte| byte.is_ascii_digit())
            || !fraction.bytes().all(|byte| byte.is_ascii_digit())
        {
            return Err(OperandError::Malformed { text: text.to_string() });
        }
        let mut digits: Vec<u8> =
            integer.bytes().chain(fraction.bytes()).map(|byte| byte - b'0').collect();
        let leading = digits.iter().take_while(|&&digit| digit == 0).count();
        digits.drain(..leading);
        Self::new(negative, digits, fraction.len())
    }

    /// Returns true when the sign flag is set.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns true for the zero value in any scale.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Fractional digit count of the rendered text, used as the cast scale.
    #[must_use]
    pub const fn scale(&self) -> usize {
        self.scale
    }

    /// Count of significant digits; zero for the zero value.
    #[must_use]
    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }

    /// Significant digits, most significant first.
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }
}

impl fmt::Display for DecimalOperand {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            formatter.write_str("-")?;
        }
        if self.scale == 0 {
            if self.digits.is_empty() {
                return formatter.write_str("0");
            }
            return write_digits(formatter, &self.digits);
        }
        if self.scale >= self.digits.len() {
            formatter.write_str("0.")?;
            for _ in 0..self.scale - self.digits.len() {
                formatter.write_char('0')?;
            }
            return write_digits(formatter, &self.digits);
        }
        let (integer, fraction) = self.digits.split_at(self.digits.len() - self.scale);
        write_digits(formatter, integer)?;
        formatter.write_char('.')?;
        write_digits(formatter, fraction)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes a digit slice as ASCII characters.
fn write_digits(formatter: &mut fmt::Formatter<'_>, digits: &[u8]) -> fmt::Result {
    for &digit in digits {
        formatter.write_char(char::from(b'0' + digit))?;
    }
    Ok(())
}
