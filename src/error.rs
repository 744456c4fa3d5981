// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinboardError {
    #[error("Invalid date '{value}', expected RFC 3339 or YYYY-MM-DD")]
    MalformedDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Unknown transaction type '{0}', expected income or expense")]
    UnknownType(String),

    #[error("Invalid amount '{value}'")]
    InvalidAmount {
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("Amount {0} is above the maximum of 1000000000000000")]
    AmountTooLarge(Decimal),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Transaction '{0}' not found")]
    NotFound(String),
}

pub type FinboardResult<T> = std::result::Result<T, FinboardError>;
