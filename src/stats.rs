// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly aggregation over a transaction list.
//!
//! Everything here is a pure function of its arguments. The reference instant
//! `now` is always passed in; its timezone decides which calendar month a
//! transaction falls into.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{MonthKey, Transaction, TransactionType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub month: MonthKey,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub savings_rate: Decimal,
    pub previous_income: Decimal,
    pub previous_expenses: Decimal,
    pub income_trend: Decimal,
    pub expense_trend: Decimal,
    pub transaction_count: usize,
}

impl Stats {
    /// Builds the derived fields from raw monthly sums.
    pub fn from_sums(month: MonthKey, current: MonthTotals, previous: MonthTotals) -> Self {
        let balance = current.income.saturating_sub(current.expenses);
        Stats {
            month,
            total_income: current.income,
            total_expenses: current.expenses,
            balance,
            savings_rate: savings_rate(current.income, current.expenses),
            previous_income: previous.income,
            previous_expenses: previous.expenses,
            income_trend: percent_change(current.income, previous.income),
            expense_trend: percent_change(current.expenses, previous.expenses),
            transaction_count: current.count,
        }
    }
}

/// Income and expense sums for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub count: usize,
}

impl MonthTotals {
    pub fn add(&mut self, kind: TransactionType, amount: Decimal) {
        match kind {
            TransactionType::Income => self.income = self.income.saturating_add(amount),
            TransactionType::Expense => self.expenses = self.expenses.saturating_add(amount),
        }
        self.count += 1;
    }

    pub fn subtract(&mut self, kind: TransactionType, amount: Decimal) {
        match kind {
            TransactionType::Income => self.income = self.income.saturating_sub(amount),
            TransactionType::Expense => self.expenses = self.expenses.saturating_sub(amount),
        }
        self.count = self.count.saturating_sub(1);
    }
}

/// Signed percentage change from `previous` to `current`; 0 when there is no
/// previous amount to compare against.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous > Decimal::ZERO {
        percent_of(current.saturating_sub(previous), previous)
    } else {
        Decimal::ZERO
    }
}

/// Balance as a percentage of income; 0 without income.
pub fn savings_rate(income: Decimal, expenses: Decimal) -> Decimal {
    if income > Decimal::ZERO {
        percent_of(income.saturating_sub(expenses), income)
    } else {
        Decimal::ZERO
    }
}

// `base` is positive. Results beyond the Decimal range clamp to MAX / MIN.
fn percent_of(part: Decimal, base: Decimal) -> Decimal {
    match part.checked_div(base) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

/// Computes the dashboard statistics for the calendar month containing `now`
/// and the month before it.
pub fn compute_stats<Tz: TimeZone>(transactions: &[Transaction], now: &DateTime<Tz>) -> Stats {
    let tz = now.timezone();
    let current_month = MonthKey::of(now);
    let previous_month = current_month.previous();

    let mut current = MonthTotals::default();
    let mut previous = MonthTotals::default();
    for t in transactions {
        let month = MonthKey::of(&t.date.with_timezone(&tz));
        if month == current_month {
            current.add(t.r#type, t.amount);
        } else if month == previous_month {
            previous.add(t.r#type, t.amount);
        }
    }

    Stats::from_sums(current_month, current, previous)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub count: usize,
}

/// Expense totals per category for `month`, largest first.
pub fn spending_by_category<Tz: TimeZone>(
    transactions: &[Transaction],
    month: MonthKey,
    tz: &Tz,
) -> Vec<CategoryTotal> {
    let mut agg: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense)
        .filter(|t| MonthKey::of(&t.date.with_timezone(tz)) == month)
    {
        let entry = agg.entry(t.category.as_str()).or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(t.amount);
        entry.1 += 1;
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, (amount, count))| CategoryTotal {
            category: category.to_string(),
            amount,
            count,
        })
        .collect();
    items.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn tx(id: &str, kind: TransactionType, amount: i64, date: &str) -> Transaction {
        Transaction::new(
            id,
            kind,
            Decimal::new(amount, 0),
            DateTime::parse_from_rfc3339(date).unwrap(),
            "General",
            "",
        )
        .unwrap()
    }

    #[test]
    fn trend_from_zero_is_reported_as_zero() {
        assert_eq!(
            percent_change(Decimal::new(1_000_000, 0), Decimal::ZERO),
            Decimal::ZERO
        );
        assert_eq!(
            percent_change(Decimal::new(50, 0), Decimal::new(100, 0)),
            Decimal::new(-50, 0)
        );
    }

    #[test]
    fn savings_rate_can_go_negative_but_not_without_income() {
        assert_eq!(
            savings_rate(Decimal::new(100, 0), Decimal::new(150, 0)),
            Decimal::new(-50, 0)
        );
        assert_eq!(savings_rate(Decimal::ZERO, Decimal::new(20, 0)), Decimal::ZERO);
    }

    #[test]
    fn huge_sums_and_tiny_baselines_clamp_instead_of_overflowing() {
        let tiny = Decimal::new(1, 2);
        assert_eq!(percent_change(Decimal::MAX, tiny), Decimal::MAX);
        assert_eq!(percent_change(Decimal::ZERO, tiny), Decimal::new(-100, 0));
        assert_eq!(savings_rate(tiny, Decimal::MAX), Decimal::MIN);

        // Rows built directly, as an out-of-range store row would be.
        let huge: Decimal = "50000000000000000000000000000".parse().unwrap();
        let mut big = tx("a", TransactionType::Income, 0, "2024-03-02T10:00:00Z");
        big.amount = huge;
        let mut big2 = big.clone();
        big2.id = "b".into();
        let mut prev = tx("c", TransactionType::Income, 0, "2024-02-02T10:00:00Z");
        prev.amount = tiny;

        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let stats = compute_stats(&[big, big2, prev], &now);
        assert_eq!(stats.total_income, Decimal::MAX);
        assert_eq!(stats.balance, Decimal::MAX);
        assert_eq!(stats.savings_rate, Decimal::ONE_HUNDRED);
        assert_eq!(stats.income_trend, Decimal::MAX);
        assert_eq!(stats.transaction_count, 2);
    }

    #[test]
    fn month_is_taken_in_the_timezone_of_now() {
        // 23:30 UTC on Jan 31 is already February in UTC+02:00.
        let txs = vec![tx("a", TransactionType::Expense, 10, "2024-01-31T23:30:00Z")];

        let utc_now = Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap();
        let in_utc = compute_stats(&txs, &utc_now);
        assert_eq!(in_utc.total_expenses, Decimal::ZERO);
        assert_eq!(in_utc.previous_expenses, Decimal::new(10, 0));

        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        let east_now = utc_now.with_timezone(&east);
        let in_east = compute_stats(&txs, &east_now);
        assert_eq!(in_east.total_expenses, Decimal::new(10, 0));
        assert_eq!(in_east.transaction_count, 1);
    }

    #[test]
    fn category_breakdown_only_counts_expenses_of_the_month() {
        let mut food = tx("f1", TransactionType::Expense, 30, "2024-03-02T10:00:00Z");
        food.category = "Food".into();
        let mut food2 = tx("f2", TransactionType::Expense, 20, "2024-03-05T10:00:00Z");
        food2.category = "Food".into();
        let mut fuel = tx("t1", TransactionType::Expense, 40, "2024-03-06T10:00:00Z");
        fuel.category = "Transport".into();
        let mut old = tx("o1", TransactionType::Expense, 999, "2024-02-06T10:00:00Z");
        old.category = "Transport".into();
        let salary = tx("s1", TransactionType::Income, 5000, "2024-03-01T10:00:00Z");

        let out = spending_by_category(
            &[food, food2, fuel, old, salary],
            MonthKey::new(2024, 3).unwrap(),
            &Utc,
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].category, "Food");
        assert_eq!(out[0].amount, Decimal::new(50, 0));
        assert_eq!(out[0].count, 2);
        assert_eq!(out[1].category, "Transport");
        assert_eq!(out[1].amount, Decimal::new(40, 0));
    }
}
