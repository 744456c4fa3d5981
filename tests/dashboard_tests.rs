// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use finboard::commands::{dashboard, reports, sample, transactions};
use finboard::stats::Stats;
use finboard::{compute_stats, db, utils, MonthKey, Transaction, TransactionType};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn tx(id: &str, kind: TransactionType, amount: i64, date: &str) -> Transaction {
    Transaction::new(
        id,
        kind,
        Decimal::from(amount),
        DateTime::parse_from_rfc3339(date).unwrap(),
        "General",
        "",
    )
    .unwrap()
}

fn stats_with(balance: i64, income_trend: i64, expense_trend: i64, count: usize) -> Stats {
    Stats {
        month: MonthKey::new(2024, 3).unwrap(),
        total_income: Decimal::from(1000),
        total_expenses: Decimal::from(1000 - balance),
        balance: Decimal::from(balance),
        savings_rate: Decimal::from(balance) / Decimal::from(10),
        previous_income: Decimal::from(1000),
        previous_expenses: Decimal::from(500),
        income_trend: Decimal::from(income_trend),
        expense_trend: Decimal::from(expense_trend),
        transaction_count: count,
    }
}

#[test]
fn expense_increase_is_shown_as_unfavorable() {
    let cards = dashboard::stat_cards(&stats_with(200, 12, 50, 3), "INR");
    let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Current Balance", "Monthly Income", "Monthly Expenses", "Transactions"]
    );

    let expense = cards[2].trend.as_ref().unwrap();
    assert_eq!(expense.label, "50.0%");
    assert!(!expense.is_positive);

    let income = cards[1].trend.as_ref().unwrap();
    assert_eq!(income.label, "12.0%");
    assert!(income.is_positive);

    assert_eq!(cards[0].value, "INR 200.00");
    assert_eq!(cards[0].trend.as_ref().unwrap().label, "20.0%");
    assert_eq!(
        cards[3].trend.as_ref().unwrap().label,
        "3 this month"
    );
}

#[test]
fn falling_expenses_and_negative_balance_flip_the_badges() {
    let cards = dashboard::stat_cards(&stats_with(-300, -10, -25, 0), "USD");
    let balance = cards[0].trend.as_ref().unwrap();
    assert_eq!(balance.label, "30.0%");
    assert!(!balance.is_positive);
    assert!(!cards[1].trend.as_ref().unwrap().is_positive);

    let expense = cards[2].trend.as_ref().unwrap();
    assert_eq!(expense.label, "25.0%");
    assert!(expense.is_positive);

    assert!(cards[3].trend.is_none());
}

#[test]
fn flat_trends_count_as_favorable() {
    let cards = dashboard::stat_cards(&stats_with(0, 0, 0, 1), "INR");
    assert!(cards.iter().all(|c| c.trend.as_ref().unwrap().is_positive));
}

#[test]
fn build_keeps_store_order_for_recent_and_labels_the_period() {
    let txs: Vec<Transaction> = (1..=7)
        .rev()
        .map(|d| {
            tx(
                &format!("t{}", d),
                TransactionType::Expense,
                d,
                &format!("2024-03-0{}T12:00:00Z", d),
            )
        })
        .collect();
    let now = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
    let dash = dashboard::build(&txs, &now, 5, "INR");
    assert_eq!(dash.period, "March 2024");
    assert_eq!(dash.stats, compute_stats(&txs, &now));
    let ids: Vec<&str> = dash.recent.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t7", "t6", "t5", "t4", "t3"]);
}

#[test]
fn sample_data_matches_the_starter_month() {
    let conn = setup();
    let now = DateTime::parse_from_rfc3339("2024-03-20T10:00:00+05:30").unwrap();
    let added = sample::load_samples(&conn, now).unwrap();
    assert_eq!(added.len(), 4);

    let all = transactions::load_transactions(&conn).unwrap();
    let s = compute_stats(&all, &now);
    assert_eq!(s.total_income, Decimal::from(50000));
    assert_eq!(s.total_expenses, Decimal::from(3500));
    assert_eq!(s.balance, Decimal::from(46500));
    assert_eq!(s.savings_rate, Decimal::from(93));
    assert_eq!(s.transaction_count, 4);
}

#[test]
fn settings_fall_back_to_defaults() {
    let conn = setup();
    assert_eq!(utils::get_currency(&conn).unwrap(), "INR");
    assert_eq!(utils::get_recent_limit(&conn).unwrap(), 5);
    utils::set_setting(&conn, "currency", "EUR").unwrap();
    utils::set_setting(&conn, "recent_limit", "8").unwrap();
    assert_eq!(utils::get_currency(&conn).unwrap(), "EUR");
    assert_eq!(utils::get_recent_limit(&conn).unwrap(), 8);
}

#[test]
fn cashflow_lists_newest_month_first() {
    let txs = vec![
        tx("1", TransactionType::Income, 100, "2024-01-10T12:00:00Z"),
        tx("2", TransactionType::Expense, 40, "2024-01-11T12:00:00Z"),
        tx("3", TransactionType::Income, 200, "2024-03-10T12:00:00Z"),
        tx("4", TransactionType::Expense, 250, "2024-02-10T12:00:00Z"),
    ];
    let rows = reports::cashflow_rows(&txs, Utc, 2);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].month, MonthKey::new(2024, 3).unwrap());
    assert_eq!(rows[0].savings_rate, Decimal::from(100));
    assert_eq!(rows[1].month, MonthKey::new(2024, 2).unwrap());
    assert_eq!(rows[1].net, Decimal::from(-250));
    assert_eq!(rows[1].savings_rate, Decimal::ZERO);
}
