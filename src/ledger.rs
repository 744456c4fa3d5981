// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Running monthly sums maintained incrementally as transactions are
//! inserted, edited and removed.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;

use crate::models::{MonthKey, Transaction, TransactionType};
use crate::stats::{MonthTotals, Stats};

#[derive(Debug, Clone)]
struct Entry {
    month: MonthKey,
    kind: TransactionType,
    amount: Decimal,
}

/// Per-month income/expense sums keyed by calendar month in a fixed timezone.
#[derive(Debug, Clone)]
pub struct MonthlyLedger<Tz: TimeZone> {
    tz: Tz,
    months: BTreeMap<MonthKey, MonthTotals>,
    seen: HashMap<String, Entry>,
}

impl<Tz: TimeZone> MonthlyLedger<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            months: BTreeMap::new(),
            seen: HashMap::new(),
        }
    }

    pub fn from_transactions(tz: Tz, transactions: &[Transaction]) -> Self {
        let mut ledger = Self::new(tz);
        for t in transactions {
            ledger.upsert(t);
        }
        ledger
    }

    /// Records `t`, replacing the contribution of an earlier transaction with
    /// the same id.
    pub fn upsert(&mut self, t: &Transaction) {
        self.remove(&t.id);
        let entry = Entry {
            month: MonthKey::of(&t.date.with_timezone(&self.tz)),
            kind: t.r#type,
            amount: t.amount,
        };
        self.months
            .entry(entry.month)
            .or_default()
            .add(entry.kind, entry.amount);
        self.seen.insert(t.id.clone(), entry);
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let Some(old) = self.seen.remove(id) else {
            return false;
        };
        if let Some(totals) = self.months.get_mut(&old.month) {
            totals.subtract(old.kind, old.amount);
            if totals.count == 0 {
                self.months.remove(&old.month);
            }
        }
        true
    }

    pub fn totals(&self, month: MonthKey) -> MonthTotals {
        self.months.get(&month).copied().unwrap_or_default()
    }

    /// Months holding at least one transaction, oldest first.
    pub fn months(&self) -> impl DoubleEndedIterator<Item = (&MonthKey, &MonthTotals)> {
        self.months.iter()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn stats_at<Tz2: TimeZone>(&self, now: &DateTime<Tz2>) -> Stats {
        let month = MonthKey::of(&now.with_timezone(&self.tz));
        Stats::from_sums(month, self.totals(month), self.totals(month.previous()))
    }
}
