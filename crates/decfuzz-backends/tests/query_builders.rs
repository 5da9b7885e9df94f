// crates/decfuzz-backends/tests/query_builders.rs
// ============================================================================
// Module: Query Builder Tests
// Description: Exact statement rendering for both reference dialects.
// Purpose: Pin the cast shapes, per-operand scales, and operator symbols the
//          reference engines send over the wire.
// ============================================================================

//! Statement builder tests.

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

use decfuzz_backends::mysql_crosscheck_query;
use decfuzz_backends::postgres_crosscheck_query;
use decfuzz_core::DecimalOperand;
use decfuzz_core::Operator;
use decfuzz_core::TrialCase;

fn case(lhs: &str, rhs: &str, operator: Operator) -> TrialCase {
    TrialCase {
        lhs: DecimalOperand::parse(lhs).expect("lhs operand"),
        rhs: DecimalOperand::parse(rhs).expect("rhs operand"),
        operator,
    }
}

#[test]
fn mysql_statement_pins_the_cast_shape() {
    let rendered = mysql_crosscheck_query(&case("12.34", "-7", Operator::Add));
    assert_eq!(
        rendered,
        "SELECT CAST(CAST('12.34' AS DECIMAL(65, 2)) + \
         CAST('-7' AS DECIMAL(65, 0)) AS CHAR)"
    );
}

#[test]
fn postgres_statement_pins_the_cast_shape() {
    let rendered = postgres_crosscheck_query(&case("12.34", "-7", Operator::Add));
    assert_eq!(
        rendered,
        "SELECT CAST(CAST('12.34' AS NUMERIC(65, 2)) + \
         CAST('-7' AS NUMERIC(65, 0)) AS TEXT)"
    );
}

#[test]
fn scale_tracks_each_operand_literal() {
    let rendered = mysql_crosscheck_query(&case("0.500", "3.14159", Operator::Multiply));
    assert!(rendered.contains("DECIMAL(65, 3)"));
    assert!(rendered.contains("DECIMAL(65, 5)"));
    assert!(rendered.contains("'0.500'"));
}

#[test]
fn trailing_zero_literals_render_verbatim() {
    let rendered = postgres_crosscheck_query(&case("1.50", "2.0", Operator::Subtract));
    assert!(rendered.contains("'1.50'"));
    assert!(rendered.contains("'2.0'"));
    assert!(rendered.contains("NUMERIC(65, 2)"));
    assert!(rendered.contains("NUMERIC(65, 1)"));
}

#[test]
fn every_operator_symbol_renders() {
    for operator in Operator::ALL {
        let rendered = mysql_crosscheck_query(&case("8", "3", operator));
        let expected = format!("DECIMAL(65, 0)) {} CAST(", operator.symbol());
        assert!(rendered.contains(&expected), "missing symbol in {rendered}");
    }
}

#[test]
fn integer_operands_cast_at_scale_zero() {
    let rendered = postgres_crosscheck_query(&case("100", "0", Operator::Divide));
    assert_eq!(
        rendered,
        "SELECT CAST(CAST('100' AS NUMERIC(65, 0)) / \
         CAST('0' AS NUMERIC(65, 0)) AS TEXT)"
    );
}
