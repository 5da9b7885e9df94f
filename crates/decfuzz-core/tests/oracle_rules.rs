// crates/decfuzz-core/tests/oracle_rules.rs
// ============================================================================
// Module: Equivalence Oracle Rule Tests
// Description: Rule-by-rule coverage of the outcome and value comparisons.
// Purpose: Pin the accepting rule and mismatch reason for every relaxation
//          and every refusal the oracle implements.
// ============================================================================

//! Rule-level tests for the equivalence oracle.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use decfuzz_core::EquivalenceRule;
use decfuzz_core::EvalOutcome;
use decfuzz_core::FailureKind;
use decfuzz_core::MismatchReason;
use decfuzz_core::Verdict;
use decfuzz_core::compare_outcomes;
use decfuzz_core::compare_values;

/// Digit capacity of the candidate under test.
const CANDIDATE_CAPACITY: usize = 65;

fn value(text: &str) -> EvalOutcome {
    EvalOutcome::Value(text.to_string())
}

fn judge(reference: &str, candidate: &str) -> Verdict {
    compare_values(reference, candidate)
}

// ============================================================================
// SECTION: Value Rules
// ============================================================================

#[test]
fn exact_texts_are_equivalent() {
    assert_eq!(judge("123.45", "123.45"), Verdict::Equivalent(EquivalenceRule::Exact));
    assert_eq!(judge("-7", "-7"), Verdict::Equivalent(EquivalenceRule::Exact));
}

#[test]
fn surrounding_whitespace_is_trimmed_before_comparison() {
    assert_eq!(judge("42\n", "42"), Verdict::Equivalent(EquivalenceRule::Exact));
    assert_eq!(judge(" -3.5 ", "-3.5"), Verdict::Equivalent(EquivalenceRule::Exact));
}

#[test]
fn leading_integer_zeros_are_reconciled() {
    assert_eq!(judge("007.5", "7.5"), Verdict::Equivalent(EquivalenceRule::LeadingZeros));
    assert_eq!(judge("042", "42"), Verdict::Equivalent(EquivalenceRule::LeadingZeros));
}

#[test]
fn zero_spellings_are_equivalent_regardless_of_sign() {
    assert_eq!(judge("0", "-0.000"), Verdict::Equivalent(EquivalenceRule::ZeroMagnitude));
    assert_eq!(judge("0.0000", "0.0"), Verdict::Equivalent(EquivalenceRule::ZeroMagnitude));
    assert_eq!(judge("-0", "0"), Verdict::Equivalent(EquivalenceRule::ZeroMagnitude));
    assert_eq!(judge("-0.00", "0.0"), Verdict::Equivalent(EquivalenceRule::ZeroMagnitude));
}

#[test]
fn zero_against_nonzero_stays_a_mismatch() {
    assert_eq!(judge("0", "1.000"), Verdict::Mismatch(MismatchReason::DigitDivergence));
}

#[test]
fn sign_disagreement_on_nonzero_magnitudes_is_a_mismatch() {
    assert_eq!(judge("-1.5", "1.5"), Verdict::Mismatch(MismatchReason::SignDisagreement));
    assert_eq!(judge("2", "-2"), Verdict::Mismatch(MismatchReason::SignDisagreement));
}

#[test]
fn agreeing_negative_signs_compare_on_magnitude() {
    assert_eq!(
        judge("-123.4500", "-123.45"),
        Verdict::Equivalent(EquivalenceRule::TrailingZeros)
    );
    assert_eq!(
        judge("-0.6667", "-0.666666"),
        Verdict::Equivalent(EquivalenceRule::RoundedTail)
    );
}

#[test]
fn trailing_fraction_zeros_are_reconciled() {
    assert_eq!(judge("123.4500", "123.45"), Verdict::Equivalent(EquivalenceRule::TrailingZeros));
    assert_eq!(judge("1", "1.0"), Verdict::Equivalent(EquivalenceRule::TrailingZeros));
}

#[test]
fn shorter_fraction_prefix_is_tolerated() {
    assert_eq!(judge("123.456", "123.4"), Verdict::Equivalent(EquivalenceRule::FractionPrefix));
    assert_eq!(judge("123.456", "123"), Verdict::Equivalent(EquivalenceRule::FractionPrefix));
    assert_eq!(judge("0.004", "0"), Verdict::Equivalent(EquivalenceRule::FractionPrefix));
}

#[test]
fn integer_prefix_without_the_point_is_not_tolerated() {
    assert_eq!(judge("1234", "123"), Verdict::Mismatch(MismatchReason::IntegerWidth));
    assert_eq!(judge("1234.5", "123"), Verdict::Mismatch(MismatchReason::IntegerWidth));
}

#[test]
fn integer_width_gate_is_never_relaxed() {
    assert_eq!(judge("999", "1000"), Verdict::Mismatch(MismatchReason::IntegerWidth));
    assert_eq!(judge("99.9", "100.0"), Verdict::Mismatch(MismatchReason::IntegerWidth));
}

#[test]
fn rounding_band_above_half_requires_round_up() {
    assert_eq!(judge("0.6667", "0.666666"), Verdict::Equivalent(EquivalenceRule::RoundedTail));
    assert_eq!(judge("0.666666", "0.6667"), Verdict::Equivalent(EquivalenceRule::RoundedTail));
    assert_eq!(judge("0.6669", "0.666666"), Verdict::Mismatch(MismatchReason::DigitDivergence));
}

#[test]
fn rounding_band_carries_across_the_point() {
    assert_eq!(judge("123.9996", "124.0"), Verdict::Equivalent(EquivalenceRule::RoundedTail));
}

#[test]
fn rounding_band_exact_half_accepts_either_direction() {
    assert_eq!(judge("0.3", "0.25"), Verdict::Equivalent(EquivalenceRule::RoundedTail));
    assert_eq!(judge("0.25", "0.3"), Verdict::Equivalent(EquivalenceRule::RoundedTail));
    assert_eq!(judge("0.4", "0.25"), Verdict::Mismatch(MismatchReason::DigitDivergence));
}

#[test]
fn rounding_band_below_half_requires_round_down() {
    assert_eq!(judge("0.38", "0.382"), Verdict::Equivalent(EquivalenceRule::FractionPrefix));
    assert_eq!(judge("0.39", "0.382"), Verdict::Mismatch(MismatchReason::DigitDivergence));
}

#[test]
fn equal_width_digit_divergence_is_a_mismatch() {
    assert_eq!(judge("1.5", "2.5"), Verdict::Mismatch(MismatchReason::DigitDivergence));
    assert_eq!(judge("0.25", "0.27"), Verdict::Mismatch(MismatchReason::DigitDivergence));
}

#[test]
fn rounding_band_handles_magnitudes_beyond_machine_words() {
    let wide = "9".repeat(65);
    let reference = format!("{wide}.6667");
    let candidate = format!("{wide}.667");
    assert_eq!(
        judge(&reference, &candidate),
        Verdict::Equivalent(EquivalenceRule::RoundedTail)
    );
}

#[test]
fn malformed_reference_text_is_a_mismatch() {
    assert_eq!(judge("12..5", "12.5"), Verdict::Mismatch(MismatchReason::MalformedReference));
    assert_eq!(judge("1e10", "10000000000"), Verdict::Mismatch(MismatchReason::MalformedReference));
}

#[test]
fn malformed_candidate_text_is_a_mismatch() {
    assert_eq!(judge("1", ""), Verdict::Mismatch(MismatchReason::MalformedCandidate));
    assert_eq!(judge("1", "+1"), Verdict::Mismatch(MismatchReason::MalformedCandidate));
    assert_eq!(judge("1", "1."), Verdict::Mismatch(MismatchReason::MalformedCandidate));
}

// ============================================================================
// SECTION: Outcome Rules
// ============================================================================

#[test]
fn agreement_in_failure_is_equivalent() {
    let reference = EvalOutcome::failure(FailureKind::NullResult, "NULL result cell");
    let candidate = EvalOutcome::failure(FailureKind::Process, "Decimal division by zero");
    assert_eq!(
        compare_outcomes(&reference, &candidate, CANDIDATE_CAPACITY),
        Verdict::Equivalent(EquivalenceRule::BothFailed)
    );
}

#[test]
fn reference_only_failure_is_a_mismatch() {
    let reference = EvalOutcome::failure(FailureKind::Query, "statement rejected");
    assert_eq!(
        compare_outcomes(&reference, &value("1.5"), CANDIDATE_CAPACITY),
        Verdict::Mismatch(MismatchReason::ReferenceOnlyFailed)
    );
}

#[test]
fn candidate_failure_without_overflow_is_a_mismatch() {
    let candidate = EvalOutcome::failure(FailureKind::Process, "Invalid Decimal string (arg1)");
    assert_eq!(
        compare_outcomes(&value("5"), &candidate, CANDIDATE_CAPACITY),
        Verdict::Mismatch(MismatchReason::CandidateOnlyFailed)
    );
}

#[test]
fn candidate_overflow_beyond_capacity_is_expected() {
    let wide = "9".repeat(66);
    let candidate = EvalOutcome::failure(FailureKind::Process, "Decimal multiplication overflow");
    assert_eq!(
        compare_outcomes(&value(&wide), &candidate, CANDIDATE_CAPACITY),
        Verdict::Equivalent(EquivalenceRule::ExpectedOverflow)
    );
}

#[test]
fn candidate_overflow_within_capacity_is_a_mismatch() {
    let candidate = EvalOutcome::failure(FailureKind::Process, "Decimal addition overflow");
    assert_eq!(
        compare_outcomes(&value("123.45"), &candidate, CANDIDATE_CAPACITY),
        Verdict::Mismatch(MismatchReason::CandidateOnlyFailed)
    );
}

#[test]
fn overflow_detection_is_case_insensitive() {
    let wide = format!("{}.25", "9".repeat(70));
    let candidate = EvalOutcome::failure(FailureKind::Process, "DECIMAL ADDITION OVERFLOW");
    assert_eq!(
        compare_outcomes(&value(&wide), &candidate, CANDIDATE_CAPACITY),
        Verdict::Equivalent(EquivalenceRule::ExpectedOverflow)
    );
}

#[test]
fn divide_by_zero_value_pair_passes_via_zero_magnitude() {
    assert_eq!(
        compare_outcomes(&value("0.0000"), &value("0.0"), CANDIDATE_CAPACITY),
        Verdict::Equivalent(EquivalenceRule::ZeroMagnitude)
    );
}

#[test]
fn verdict_rendering_names_the_rule() {
    let pass = Verdict::Equivalent(EquivalenceRule::RoundedTail);
    let fail = Verdict::Mismatch(MismatchReason::IntegerWidth);
    assert_eq!(pass.to_string(), "equivalent (rounded-tail)");
    assert_eq!(fail.to_string(), "mismatch (integer-width)");
    assert!(pass.is_equivalent());
    assert!(!fail.is_equivalent());
}
