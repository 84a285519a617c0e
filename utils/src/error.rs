// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input is not a non-negative decimal numeral.
    #[error("failed to parse amount: {0}")]
    InvalidAmount(String),
}
