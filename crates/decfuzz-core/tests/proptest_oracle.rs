// crates/decfuzz-core/tests/proptest_oracle.rs
// ============================================================================
// Module: Equivalence Oracle Property Tests
// Description: Property tests over generated decimal texts.
// Purpose: Detect panics and pin the oracle's invariants across wide input
//          ranges.
// ============================================================================

//! Property-based tests for oracle invariants.

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
use decfuzz_core::MismatchReason;
use decfuzz_core::Verdict;
use decfuzz_core::compare_values;
use proptest::prelude::*;

/// Plain decimal literal with a non-zero leading digit.
fn decimal_text_strategy() -> impl Strategy<Value = String> {
    (any::<bool>(), "[1-9][0-9]{0,20}", proptest::option::of("[0-9]{1,20}")).prop_map(
        |(negative, integer, fraction)| {
            let mut text = String::new();
            if negative {
                text.push('-');
            }
            text.push_str(&integer);
            if let Some(fraction) = fraction {
                text.push('.');
                text.push_str(&fraction);
            }
            text
        },
    )
}

/// Zero literal in an arbitrary spelling.
fn zero_text_strategy() -> impl Strategy<Value = String> {
    (any::<bool>(), "0{1,5}", proptest::option::of("0{1,10}")).prop_map(
        |(negative, integer, fraction)| {
            let mut text = String::new();
            if negative {
                text.push('-');
            }
            text.push_str(&integer);
            if let Some(fraction) = fraction {
                text.push('.');
                text.push_str(&fraction);
            }
            text
        },
    )
}

proptest! {
    #[test]
    fn comparison_is_reflexive(text in decimal_text_strategy()) {
        prop_assert_eq!(
            compare_values(&text, &text),
            Verdict::Equivalent(EquivalenceRule::Exact)
        );
    }

    #[test]
    fn trailing_zero_padding_is_equivalent(text in decimal_text_strategy()) {
        let padded = if text.contains('.') {
            format!("{text}00")
        } else {
            format!("{text}.00")
        };
        prop_assert!(compare_values(&text, &padded).is_equivalent());
        prop_assert!(compare_values(&padded, &text).is_equivalent());
    }

    #[test]
    fn leading_zero_padding_is_equivalent(text in decimal_text_strategy()) {
        let padded = match text.strip_prefix('-') {
            Some(rest) => format!("-00{rest}"),
            None => format!("00{text}"),
        };
        prop_assert!(compare_values(&text, &padded).is_equivalent());
    }

    #[test]
    fn appending_fraction_digits_is_equivalent(
        text in decimal_text_strategy(),
        tail in "[0-9]{1,6}",
    ) {
        let extended = if text.contains('.') {
            format!("{text}{tail}")
        } else {
            format!("{text}.{tail}")
        };
        prop_assert!(compare_values(&text, &extended).is_equivalent());
        prop_assert!(compare_values(&extended, &text).is_equivalent());
    }

    #[test]
    fn sign_flip_on_nonzero_is_a_mismatch(text in decimal_text_strategy()) {
        let positive = text.strip_prefix('-').map_or(text.clone(), str::to_string);
        let negative = format!("-{positive}");
        prop_assert_eq!(
            compare_values(&positive, &negative),
            Verdict::Mismatch(MismatchReason::SignDisagreement)
        );
    }

    #[test]
    fn zero_spellings_always_reconcile(
        first in zero_text_strategy(),
        second in zero_text_strategy(),
    ) {
        prop_assert!(compare_values(&first, &second).is_equivalent());
    }

    #[test]
    fn arbitrary_text_never_panics(first in ".{0,40}", second in ".{0,40}") {
        let _ = compare_values(&first, &second);
    }
}
