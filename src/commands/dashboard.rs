// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt::Display;

use crate::commands::transactions::{load_transactions, TransactionRow};
use crate::models::Transaction;
use crate::recent::recent;
use crate::stats::{compute_stats, Stats};
use crate::utils::{fmt_money, get_currency, get_recent_limit, parse_instant, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBadge {
    pub label: String,
    pub is_positive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub trend: Option<TrendBadge>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub period: String,
    pub stats: Stats,
    pub cards: Vec<StatCard>,
    pub recent: Vec<Transaction>,
}

/// Cards shown above the recent list. Expense polarity is inverted here: a
/// drop in spending is shown as favorable.
pub fn stat_cards(stats: &Stats, currency: &str) -> Vec<StatCard> {
    let pct = |d: Decimal| format!("{:.1}%", d.abs());
    vec![
        StatCard {
            title: "Current Balance".into(),
            value: fmt_money(&stats.balance, currency),
            trend: Some(TrendBadge {
                label: pct(stats.savings_rate),
                is_positive: stats.balance >= Decimal::ZERO,
            }),
        },
        StatCard {
            title: "Monthly Income".into(),
            value: fmt_money(&stats.total_income, currency),
            trend: Some(TrendBadge {
                label: pct(stats.income_trend),
                is_positive: stats.income_trend >= Decimal::ZERO,
            }),
        },
        StatCard {
            title: "Monthly Expenses".into(),
            value: fmt_money(&stats.total_expenses, currency),
            trend: Some(TrendBadge {
                label: pct(stats.expense_trend),
                is_positive: stats.expense_trend <= Decimal::ZERO,
            }),
        },
        StatCard {
            title: "Transactions".into(),
            value: stats.transaction_count.to_string(),
            trend: (stats.transaction_count > 0).then(|| TrendBadge {
                label: format!("{} this month", stats.transaction_count),
                is_positive: true,
            }),
        },
    ]
}

pub fn build<Tz>(
    transactions: &[Transaction],
    now: &DateTime<Tz>,
    recent_limit: usize,
    currency: &str,
) -> Dashboard
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let stats = compute_stats(transactions, now);
    let cards = stat_cards(&stats, currency);
    Dashboard {
        period: now.format("%B %Y").to_string(),
        stats,
        cards,
        recent: recent(transactions, recent_limit).to_vec(),
    }
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let now = match sub.get_one::<String>("as-of") {
        Some(s) => parse_instant(s)?.with_timezone(&Local),
        None => Local::now(),
    };
    let transactions = load_transactions(conn)?;
    let limit = get_recent_limit(conn)?;
    let currency = get_currency(conn)?;
    let dash = build(&transactions, &now, limit, &currency);
    log::debug!(
        "{} transactions total, {} in {}",
        transactions.len(),
        dash.stats.transaction_count,
        dash.stats.month
    );
    log::debug!("stats: {:?}", dash.stats);

    if sub.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&dash)?);
        return Ok(());
    }
    render(&dash);
    Ok(())
}

fn render(dash: &Dashboard) {
    println!("Dashboard");
    println!("Your financial overview for {}", dash.period);

    let rows: Vec<Vec<String>> = dash
        .cards
        .iter()
        .map(|c| {
            let trend = match &c.trend {
                Some(t) if t.is_positive => format!("▲ {}", t.label),
                Some(t) => format!("▼ {}", t.label),
                None => String::new(),
            };
            vec![c.title.clone(), c.value.clone(), trend]
        })
        .collect();
    println!("{}", pretty_table(&["", "Value", "Trend"], rows));

    println!("Recent Transactions");
    if dash.recent.is_empty() {
        println!("No transactions yet");
        println!(
            "Get started with `finboard tx add` or load sample data with `finboard sample`."
        );
        return;
    }
    let rows: Vec<Vec<String>> = dash
        .recent
        .iter()
        .map(TransactionRow::from)
        .map(|r| vec![r.date, r.r#type, r.category, r.amount, r.description])
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Type", "Category", "Amount", "Description"], rows)
    );
}
