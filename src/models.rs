// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{FinboardError, FinboardResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(FinboardError::UnknownType(other.to_string())),
        }
    }
}

/// Largest amount a single transaction may carry (10^15). Monthly sums of
/// bounded amounts stay far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Accepts amounts in `0..=MAX_AMOUNT`.
pub fn check_amount(amount: Decimal) -> FinboardResult<Decimal> {
    if amount < Decimal::ZERO {
        return Err(FinboardError::NegativeAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(FinboardError::AmountTooLarge(amount));
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: String,
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub date: DateTime<FixedOffset>,
    pub category: String,
    pub description: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        r#type: TransactionType,
        amount: Decimal,
        date: DateTime<FixedOffset>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> FinboardResult<Self> {
        Ok(Self {
            id: id.into(),
            r#type,
            amount: check_amount(amount)?,
            date,
            category: category.into(),
            description: description.into(),
        })
    }

    pub fn from_new(id: impl Into<String>, data: &NewTransaction) -> FinboardResult<Self> {
        Self::new(
            id,
            data.r#type,
            data.amount,
            data.date,
            data.category.clone(),
            data.description.clone(),
        )
    }
}

/// User-editable fields of a transaction, used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub r#type: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<FixedOffset>,
}

/// A calendar month. `month` is 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> FinboardResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(FinboardError::InvalidMonth(format!("{}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// Month of `dt` as seen in its own timezone.
    pub fn of<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| FinboardError::InvalidMonth(s.to_string()))?;
        Ok(Self {
            year: d.year(),
            month: d.month(),
        })
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
