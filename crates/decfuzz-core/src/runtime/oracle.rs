// crates/decfuzz-core/src/runtime/oracle.rs
// ============================================================================
// Module: Equivalence Oracle
// Description: Judges whether two engine outcomes describe the same decimal.
// Purpose: Reconcile representation differences (zeros, signs of zero,
//          trailing digits, rounding bands) while keeping true divergence
//          loud.
// Dependencies: bigdecimal, serde
// ============================================================================

//! ## Overview
//! The oracle first reconciles failures: agreement in failure is a pass, and
//! a candidate overflow abort is accepted when the reference result is wider
//! than the candidate can represent. For value pairs it walks an ordered list
//! of textual relaxations and stops at the first that applies; the verdict
//! names the accepting rule so every pass is auditable. Integer-part width is
//! never relaxed: once the widths differ the pair is a mismatch, whatever the
//! fractional tails look like. Rounding tolerance is direction-sensitive:
//! which side may round up depends only on which text is longer, except at
//! the exact half-unit boundary where either direction is accepted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use serde::Deserialize;
use serde::Serialize;

use crate::core::trial::EvalOutcome;

// ============================================================================
// SECTION: Verdicts
// ============================================================================

/// Relaxation that accepted an outcome pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquivalenceRule {
    /// Both engines failed the trial.
    BothFailed,
    /// The candidate aborted on overflow where the reference result exceeds
    /// the candidate's integer-digit capacity.
    ExpectedOverflow,
    /// The trimmed texts are identical.
    Exact,
    /// The texts agree after stripping leading integer zeros.
    LeadingZeros,
    /// Both magnitudes are zero in any spelling, signs included.
    ZeroMagnitude,
    /// The texts agree after stripping trailing fractional zeros.
    TrailingZeros,
    /// One text extends the other with extra fractional digits only.
    FractionPrefix,
    /// The shorter text is a correct rounding of the longer one.
    RoundedTail,
}

impl fmt::Display for EquivalenceRule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BothFailed => "both-failed",
            Self::ExpectedOverflow => "expected-overflow",
            Self::Exact => "exact",
            Self::LeadingZeros => "leading-zeros",
            Self::ZeroMagnitude => "zero-magnitude",
            Self::TrailingZeros => "trailing-zeros",
            Self::FractionPrefix => "fraction-prefix",
            Self::RoundedTail => "rounded-tail",
        };
        formatter.write_str(label)
    }
}

/// Reason an outcome pair was flagged as a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    /// The reference failed while the candidate produced a value.
    ReferenceOnlyFailed,
    /// The candidate failed, without an accepted overflow excuse.
    CandidateOnlyFailed,
    /// Exactly one non-zero result carries a negative sign.
    SignDisagreement,
    /// The integer-part digit counts differ.
    IntegerWidth,
    /// The digit sequences diverge beyond any rounding band.
    DigitDivergence,
    /// The reference text is not a plain decimal literal.
    MalformedReference,
    /// The candidate text is not a plain decimal literal.
    MalformedCandidate,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ReferenceOnlyFailed => "reference-only-failure",
            Self::CandidateOnlyFailed => "candidate-only-failure",
            Self::SignDisagreement => "sign-disagreement",
            Self::IntegerWidth => "integer-width",
            Self::DigitDivergence => "digit-divergence",
            Self::MalformedReference => "malformed-reference-output",
            Self::MalformedCandidate => "malformed-candidate-output",
        };
        formatter.write_str(label)
    }
}

/// Oracle judgment for one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The outcomes describe the same decimal result.
    Equivalent(EquivalenceRule),
    /// The outcomes diverge.
    Mismatch(MismatchReason),
}

impl Verdict {
    /// Returns true for an equivalent judgment.
    #[must_use]
    pub const fn is_equivalent(&self) -> bool {
        matches!(self, Self::Equivalent(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equivalent(rule) => write!(formatter, "equivalent ({rule})"),
            Self::Mismatch(reason) => write!(formatter, "mismatch ({reason})"),
        }
    }
}

// ============================================================================
// SECTION: Oracle Entry Points
// ============================================================================

/// Judges a reference/candidate outcome pair.
///
/// `candidate_max_precision` is the candidate's total digit capacity; a
/// candidate overflow abort is accepted only when the reference integer part
/// is wider than that.
#[must_use]
pub fn compare_outcomes(
    reference: &EvalOutcome,
    candidate: &EvalOutcome,
    candidate_max_precision: usize,
) -> Verdict {
    match (reference, candidate) {
        (EvalOutcome::Failure(_), EvalOutcome::Failure(_)) => {
            Verdict::Equivalent(EquivalenceRule::BothFailed)
        }
        (EvalOutcome::Failure(_), EvalOutcome::Value(_)) => {
            Verdict::Mismatch(MismatchReason::ReferenceOnlyFailed)
        }
        (EvalOutcome::Value(value), EvalOutcome::Failure(failure)) => {
            if failure.is_overflow_class() && integer_digit_count(value) > candidate_max_precision
            {
                Verdict::Equivalent(EquivalenceRule::ExpectedOverflow)
            } else {
                Verdict::Mismatch(MismatchReason::CandidateOnlyFailed)
            }
        }
        (EvalOutcome::Value(reference), EvalOutcome::Value(candidate)) => {
            compare_values(reference, candidate)
        }
    }
}

/// Judges two successful decimal texts.
#[must_use]
pub fn compare_values(reference: &str, candidate: &str) -> Verdict {
    let reference = reference.trim();
    let candidate = candidate.trim();
    if reference == candidate {
        return Verdict::Equivalent(EquivalenceRule::Exact);
    }
    let Some(reference) = DecimalText::parse(reference) else {
        return Verdict::Mismatch(MismatchReason::MalformedReference);
    };
    let Some(candidate) = DecimalText::parse(candidate) else {
        return Verdict::Mismatch(MismatchReason::MalformedCandidate);
    };
    if reference.is_zero() && candidate.is_zero() {
        return Verdict::Equivalent(EquivalenceRule::ZeroMagnitude);
    }
    if reference.negative != candidate.negative {
        return Verdict::Mismatch(MismatchReason::SignDisagreement);
    }
    if reference.integer == candidate.integer {
        if reference.fraction == candidate.fraction {
            return Verdict::Equivalent(EquivalenceRule::LeadingZeros);
        }
        if reference.trimmed_fraction() == candidate.trimmed_fraction() {
            return Verdict::Equivalent(EquivalenceRule::TrailingZeros);
        }
    }
    if fraction_prefix(&reference.magnitude(), &candidate.magnitude()) {
        return Verdict::Equivalent(EquivalenceRule::FractionPrefix);
    }
    if reference.integer.len() != candidate.integer.len() {
        return Verdict::Mismatch(MismatchReason::IntegerWidth);
    }
    if rounded_band_equivalent(&reference.flat(), &candidate.flat()) {
        Verdict::Equivalent(EquivalenceRule::RoundedTail)
    } else {
        Verdict::Mismatch(MismatchReason::DigitDivergence)
    }
}

// ============================================================================
// SECTION: Decimal Text
// ============================================================================

/// Parsed decimal text with a canonical integer part.
struct DecimalText {
    /// Sign flag as written.
    negative: bool,
    /// Integer digits with leading zeros stripped, at least `0`.
    integer: String,
    /// Fractional digits verbatim, possibly empty.
    fraction: String,
}

impl DecimalText {
    /// Accepts `-?digits(.digits)?`; anything else is `None`.
    fn parse(text: &str) -> Option<Self> {
        let (negative, magnitude) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (integer, fraction) = match magnitude.split_once('.') {
            Some((integer, fraction)) if !fraction.is_empty() => (integer, fraction),
            Some(_) => return None,
            None => (magnitude, ""),
        };
        if integer.is_empty()
            || !integer.bytes().all(|byte| byte.is_ascii_digit())
            || !fraction.bytes().all(|byte| byte.is_ascii_digit())
        {
            return None;
        }
        let stripped = integer.trim_start_matches('0');
        let integer = if stripped.is_empty() { "0" } else { stripped };
        Some(Self {
            negative,
            integer: integer.to_string(),
            fraction: fraction.to_string(),
        })
    }

    /// True when every digit is zero, whatever the sign or padding.
    fn is_zero(&self) -> bool {
        self.integer == "0" && self.fraction.bytes().all(|byte| byte == b'0')
    }

    /// Fraction with trailing zeros removed.
    fn trimmed_fraction(&self) -> &str {
        self.fraction.trim_end_matches('0')
    }

    /// Unsigned text with the canonical integer part.
    fn magnitude(&self) -> String {
        if self.fraction.is_empty() {
            self.integer.clone()
        } else {
            format!("{}.{}", self.integer, self.fraction)
        }
    }

    /// Integer and fraction digits concatenated, decimal point dropped.
    fn flat(&self) -> String {
        format!("{}{}", self.integer, self.fraction)
    }
}

// ============================================================================
// SECTION: Rule Helpers
// ============================================================================

/// True when one magnitude extends the other with fractional digits only.
///
/// The longer text must contain its decimal point at or before the prefix
/// boundary, so every extra character sits behind the point.
fn fraction_prefix(first: &str, second: &str) -> bool {
    let (short, long) =
        if first.len() < second.len() { (first, second) } else { (second, first) };
    short.len() < long.len()
        && long.starts_with(short)
        && long.find('.').is_some_and(|index| index <= short.len())
}

/// True when the shorter flat digit string is a correct rounding of the
/// longer one at the shorter string's last digit.
///
/// Both flats are aligned at the same integer width, so positional compare
/// over the shared prefix is a value compare. The digit just past the prefix
/// decides the band: above half must round up, below half must round down,
/// and exactly half accepts either direction.
fn rounded_band_equivalent(first: &str, second: &str) -> bool {
    if first.len() == second.len() {
        return first == second;
    }
    let (short, long) =
        if first.len() < second.len() { (first, second) } else { (second, first) };
    let boundary = short.len();
    let Some(prefix) = long.get(..boundary) else {
        return false;
    };
    let Some(&rounding) = long.as_bytes().get(boundary) else {
        return false;
    };
    let (Ok(short_value), Ok(prefix_value)) =
        (BigInt::from_str(short), BigInt::from_str(prefix))
    else {
        return false;
    };
    let bumped = &prefix_value + 1u32;
    match rounding {
        b'6'..=b'9' => bumped == short_value,
        b'5' => short_value == prefix_value || short_value == bumped,
        _ => short_value == prefix_value,
    }
}

/// Width of the canonical integer part; zero for unparsable text.
fn integer_digit_count(text: &str) -> usize {
    DecimalText::parse(text.trim()).map_or(0, |parsed| parsed.integer.len())
}
