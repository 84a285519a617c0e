// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use std::str::FromStr;

fn scaled(amount: &str, decimals: u32) -> BigInt {
    parse_scaled_amount(amount, decimals).unwrap()
}

fn scaled_with(amount: &str, decimals: u32, tolerance: u32, rounding: Rounding) -> BigInt {
    let options = ScaleOptions {
        tolerance: Tolerance::from_percent(tolerance),
        rounding,
    };
    parse_scaled_amount_with(amount, decimals, &options).unwrap()
}

#[test]
fn test_pads_fraction_to_decimals() {
    assert_eq!(scaled("1.5", 2), BigInt::from(150));
    assert_eq!(scaled("0.05", 4), BigInt::from(500));
    assert_eq!(scaled("7", 3), BigInt::from(7000));
    assert_eq!(scaled("1.", 2), BigInt::from(100));
    assert_eq!(scaled(".5", 2), BigInt::from(50));
    assert_eq!(scaled("+1.5", 2), BigInt::from(150));
}

#[test]
fn test_whole_amount_to_18_decimals() {
    let expected = BigInt::from(100) * BigInt::from(10).pow(18);
    assert_eq!(scaled("100", 18), expected);
}

#[test]
fn test_long_digit_strings_are_exact() {
    let amount = "123456789012345678901234567890.123456789";
    let expected =
        BigInt::from_str("123456789012345678901234567890123456789000000000").unwrap();
    assert_eq!(scaled(amount, 18), expected);
}

#[test]
fn test_exact_fraction_length() {
    assert_eq!(scaled("1.25", 2), BigInt::from(125));
    assert_eq!(scaled("0.000000000000000001", 18), BigInt::from(1));
}

/// Truncation within the band keeps the digit-string result rather than rounding.
#[test]
fn test_truncation_within_band() {
    assert_eq!(scaled("1.2345", 2), BigInt::from(123));
    assert_eq!(scaled("1.239", 2), BigInt::from(123));
    assert_eq!(scaled("9.99", 0), BigInt::from(9));
}

/// Truncation that loses more than the band falls back to the rounded exact value.
#[test]
fn test_fallback_rounds_to_nearest() {
    assert_eq!(scaled("1.5", 0), BigInt::from(2));
    assert_eq!(scaled("2.5", 0), BigInt::from(2));
    assert_eq!(scaled("0.99", 0), BigInt::from(1));
    assert_eq!(scaled("0.6", 0), BigInt::from(1));
    assert_eq!(scaled("0.5", 0), BigInt::from(0));
    assert_eq!(scaled("0.04", 1), BigInt::from(0));
    assert_eq!(scaled(".5", 0), BigInt::from(0));
}

#[test]
fn test_fallback_rounding_modes() {
    assert_eq!(scaled_with("2.5", 0, 10, Rounding::HalfUp), BigInt::from(3));
    assert_eq!(scaled_with("2.5", 0, 10, Rounding::HalfEven), BigInt::from(2));
    assert_eq!(scaled_with("2.5", 0, 10, Rounding::Down), BigInt::from(2));
    assert_eq!(scaled_with("1.5", 0, 10, Rounding::Down), BigInt::from(1));
    assert_eq!(scaled_with("0.5", 0, 10, Rounding::HalfUp), BigInt::from(1));
}

#[test]
fn test_zero_tolerance_always_rounds_when_truncating() {
    assert_eq!(scaled_with("1.2345", 2, 0, Rounding::HalfEven), BigInt::from(123));
    assert_eq!(scaled_with("1.239", 2, 0, Rounding::HalfEven), BigInt::from(124));
    assert_eq!(scaled_with("1.5", 2, 0, Rounding::HalfEven), BigInt::from(150));
}

/// "3.75" truncates to 3, exactly 80% of the scaled value.
#[test]
fn test_band_bounds_are_inclusive() {
    assert_eq!(scaled_with("3.75", 0, 20, Rounding::HalfEven), BigInt::from(3));
    assert_eq!(scaled_with("3.75", 0, 19, Rounding::HalfEven), BigInt::from(4));
}

#[test]
fn test_zero_amounts() {
    assert_eq!(scaled("0", 18), BigInt::from(0));
    assert_eq!(scaled("0.000", 1), BigInt::from(0));
    assert_eq!(scaled("-0", 2), BigInt::from(0));
    assert_eq!(scaled("-0.00", 2), BigInt::from(0));
}

#[test]
fn test_invalid_amounts() {
    let inputs = [
        "", ".", "-", "+", "abc", "-1.0", "-0.1", "1.2.3", " 1", "1 ", "1e5", "0x10", "Inf",
        "NaN", "1,5", "--1", "1.-5", "١",
    ];
    for input in inputs {
        assert_eq!(
            parse_scaled_amount(input, 2),
            Err(AmountError::InvalidAmount(input.to_string())),
            "input {:?} should be rejected",
            input
        );
    }
}

#[test]
fn test_error_message_names_input() {
    let err = parse_scaled_amount("abc", 2).unwrap_err();
    assert_eq!(err.to_string(), "failed to parse amount: abc");
}

#[test]
fn test_format_scaled_amount() {
    assert_eq!(format_scaled_amount(&BigInt::from(150), 2), "1.5");
    assert_eq!(format_scaled_amount(&BigInt::from(5), 3), "0.005");
    assert_eq!(format_scaled_amount(&BigInt::from(0), 18), "0");
    assert_eq!(format_scaled_amount(&BigInt::from(100), 0), "100");
    assert_eq!(format_scaled_amount(&BigInt::from(1000), 3), "1");
    assert_eq!(format_scaled_amount(&BigInt::from(-150), 2), "-1.5");
}

/// Scaling with enough decimals and formatting back returns the original amount.
#[test]
fn test_scale_and_format_round_trip() {
    for amount in ["1.5", "0.000000000000000001", "42", "1234.5678", "0.1"] {
        let value = scaled(amount, 18);
        assert_eq!(format_scaled_amount(&value, 18), amount);
    }
}
