// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::load_transactions;
use crate::ledger::MonthlyLedger;
use crate::models::{MonthKey, Transaction};
use crate::stats::{savings_rate, spending_by_category, CategoryTotal};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::{Local, TimeZone};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(conn, sub)?,
        Some(("by-category", sub)) => by_category(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowRow {
    pub month: MonthKey,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub savings_rate: Decimal,
    pub count: usize,
}

/// Monthly income/expense history, newest month first.
pub fn cashflow_rows<Tz: TimeZone>(
    transactions: &[Transaction],
    tz: Tz,
    months: usize,
) -> Vec<CashflowRow> {
    let ledger = MonthlyLedger::from_transactions(tz, transactions);
    ledger
        .months()
        .rev()
        .take(months)
        .map(|(month, totals)| CashflowRow {
            month: *month,
            income: totals.income,
            expenses: totals.expenses,
            net: totals.income.saturating_sub(totals.expenses),
            savings_rate: savings_rate(totals.income, totals.expenses),
            count: totals.count,
        })
        .collect()
}

fn cashflow(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let transactions = load_transactions(conn)?;
    let data = cashflow_rows(&transactions, Local, months);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.month.to_string(),
                    format!("{:.2}", r.income),
                    format!("{:.2}", r.expenses),
                    format!("{:.2}", r.net),
                    format!("{:.1}%", r.savings_rate),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net", "Savings"], rows)
        );
    }
    Ok(())
}

fn by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(s) => s.parse::<MonthKey>()?,
        None => MonthKey::of(&Local::now()),
    };
    let transactions = load_transactions(conn)?;
    let data: Vec<CategoryTotal> = spending_by_category(&transactions, month, &Local);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    format!("{:.2}", c.amount),
                    c.count.to_string(),
                ]
            })
            .collect();
        println!("Spending for {}", month);
        println!("{}", pretty_table(&["Category", "Spent", "Count"], rows));
    }
    Ok(())
}
