// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::insert_transaction;
use crate::models::{NewTransaction, Transaction, TransactionType};
use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local};
use rusqlite::Connection;
use rust_decimal::Decimal;

/// A month's worth of starter data, all dated `now`.
pub fn sample_transactions(now: DateTime<FixedOffset>) -> Vec<NewTransaction> {
    [
        (TransactionType::Income, "Salary", 50000, "Monthly salary"),
        (TransactionType::Expense, "Food", 1200, "Groceries"),
        (TransactionType::Expense, "Transport", 800, "Fuel"),
        (TransactionType::Expense, "Entertainment", 1500, "Movie tickets"),
    ]
    .into_iter()
    .map(|(kind, category, amount, description)| NewTransaction {
        r#type: kind,
        category: category.to_string(),
        amount: Decimal::from(amount),
        description: description.to_string(),
        date: now,
    })
    .collect()
}

pub fn load_samples(conn: &Connection, now: DateTime<FixedOffset>) -> Result<Vec<Transaction>> {
    let tx = conn.unchecked_transaction()?;
    let mut out = Vec::new();
    for data in sample_transactions(now) {
        out.push(insert_transaction(&tx, &data)?);
    }
    tx.commit()?;
    Ok(out)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let added = load_samples(conn, Local::now().fixed_offset())?;
    println!("Loaded {} sample transactions", added.len());
    Ok(())
}
