// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::error::AmountError;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use std::cmp::Ordering;

/// Width of the band around the exact scaled value inside which the digit-string
/// result is accepted, in whole percent.
///
/// The band is a safety margin against silently dropping most of an amount when
/// the requested scale is much smaller than the number of fractional digits
/// given. It is not derived from any precision bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tolerance(u32);

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance(10);

    pub const fn from_percent(percent: u32) -> Self {
        Tolerance(percent)
    }

    pub const fn percent(self) -> u32 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rounding applied when the exact scaled value has to be converted to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Round to nearest, ties to the even neighbour.
    #[default]
    HalfEven,
    /// Round to nearest, ties away from zero.
    HalfUp,
    /// Truncate toward zero.
    Down,
}

impl Rounding {
    /// Rounds `num / den` to an integer. `den` must be non-zero.
    fn divide(self, num: &BigUint, den: &BigUint) -> BigUint {
        let quotient = num / den;
        let remainder = num % den;
        if remainder.is_zero() {
            return quotient;
        }
        let twice = remainder * 2u32;
        let round_up = match self {
            Rounding::Down => false,
            Rounding::HalfUp => twice >= *den,
            Rounding::HalfEven => match twice.cmp(den) {
                Ordering::Less => false,
                Ordering::Greater => true,
                Ordering::Equal => !(&quotient % 2u32).is_zero(),
            },
        };
        if round_up { quotient + 1u32 } else { quotient }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaleOptions {
    pub tolerance: Tolerance,
    pub rounding: Rounding,
}

/// Sign, integer digits and fractional digits of a plain decimal numeral.
struct Numeral<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
}

impl<'a> Numeral<'a> {
    fn parse(input: &'a str) -> Option<Self> {
        let (negative, body) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };
        let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(integer) || !is_digits(fraction) {
            return None;
        }
        Some(Numeral {
            negative,
            integer,
            fraction,
        })
    }
}

fn pow10(exp: usize) -> BigUint {
    num_traits::pow(BigUint::from(10u32), exp)
}

/// Parses a string of ASCII digits. The empty string is zero.
fn parse_digits(digits: &str) -> Option<BigUint> {
    if digits.is_empty() {
        return Some(BigUint::zero());
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
}

/// Converts a decimal `amount` into an integer scaled by `10^decimals`, using the
/// default [`ScaleOptions`].
///
/// ```
/// use filecoin_client_utils::{BigInt, parse_scaled_amount};
///
/// assert_eq!(parse_scaled_amount("1.5", 2).unwrap(), BigInt::from(150));
/// ```
pub fn parse_scaled_amount(amount: &str, decimals: u32) -> Result<BigInt, AmountError> {
    parse_scaled_amount_with(amount, decimals, &ScaleOptions::default())
}

/// Converts a decimal `amount` into an integer scaled by `10^decimals`.
///
/// The result is normally the digits of `amount` with the decimal point removed,
/// right-padded with zeros or truncated to exactly `decimals` fractional digits.
/// When truncation moves that result outside the tolerance band around the exact
/// scaled value, the exact value rounded with `options.rounding` is returned
/// instead.
///
/// # Errors
///
/// Returns [`AmountError::InvalidAmount`] if `amount` is not a non-negative
/// decimal numeral. Exponents, whitespace and non-ASCII digits are rejected.
pub fn parse_scaled_amount_with(
    amount: &str,
    decimals: u32,
    options: &ScaleOptions,
) -> Result<BigInt, AmountError> {
    let invalid = || AmountError::InvalidAmount(amount.to_string());
    let numeral = Numeral::parse(amount).ok_or_else(invalid)?;

    let mut digits = [numeral.integer, numeral.fraction].concat();
    let mantissa = parse_digits(&digits).ok_or_else(invalid)?;
    if numeral.negative && !mantissa.is_zero() {
        return Err(invalid());
    }

    let decimals = decimals as usize;
    let decimals_len = numeral.fraction.len();
    if decimals > decimals_len {
        digits.extend(std::iter::repeat_n('0', decimals - decimals_len));
    } else {
        digits.truncate(digits.len() - (decimals_len - decimals));
    }
    let res = parse_digits(&digits).ok_or_else(invalid)?;

    // exact scaled value as num / den
    let (num, den) = if decimals >= decimals_len {
        (mantissa * pow10(decimals - decimals_len), BigUint::one())
    } else {
        (mantissa, pow10(decimals_len - decimals))
    };

    let percent = options.tolerance.percent();
    let scaled_res = &res * &den * 100u32;
    let min = &num * 100u32.saturating_sub(percent);
    let max = &num * (100u64 + u64::from(percent));
    if scaled_res >= min && scaled_res <= max {
        return Ok(BigInt::from_biguint(Sign::Plus, res));
    }

    let rounded = options.rounding.divide(&num, &den);
    log::debug!(
        "amount {amount} truncated to {res} at {decimals} decimals is outside the {percent}% band, using {rounded}"
    );
    Ok(BigInt::from_biguint(Sign::Plus, rounded))
}

/// Renders an integer scaled by `10^decimals` as a decimal string, dropping
/// trailing fractional zeros.
pub fn format_scaled_amount(value: &BigInt, decimals: u32) -> String {
    let sign = if value.sign() == Sign::Minus { "-" } else { "" };
    let digits = value.magnitude().to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return format!("{sign}{digits}");
    }

    let padded = if digits.len() <= decimals {
        format!("{}{digits}", "0".repeat(decimals + 1 - digits.len()))
    } else {
        digits
    };
    let (integer, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    }
}
