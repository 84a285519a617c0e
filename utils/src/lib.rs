// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Helpers shared by the Filecoin client crates.
//!
//! The main entry point is [`parse_scaled_amount`], which turns a human-entered
//! decimal amount such as `"1.2345"` into an integer expressed in the smallest
//! unit of a token with the given number of decimals.

mod amount;
mod error;
#[cfg(test)]
mod tests;

pub use amount::{
    Rounding, ScaleOptions, Tolerance, format_scaled_amount, parse_scaled_amount,
    parse_scaled_amount_with,
};
pub use error::AmountError;

// re-exports
pub use num_bigint::BigInt;
