// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FinboardError, FinboardResult};
use crate::models::{MonthKey, NewTransaction, Transaction, TransactionType};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_amount, parse_instant, parse_stored_date,
    pretty_table,
};
use anyhow::{bail, Context, Result};
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use uuid::Uuid;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_instant(s)?,
        None => Local::now().fixed_offset(),
    };

    let t = insert_transaction(
        conn,
        &NewTransaction {
            r#type: kind,
            category,
            amount,
            description,
            date,
        },
    )?;
    println!(
        "Recorded {} {} on {} ({}) id={}",
        t.r#type,
        fmt_money(&t.amount, &get_currency(conn)?),
        t.date.with_timezone(&Local).format("%Y-%m-%d"),
        t.category,
        t.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let current = get_transaction(conn, id)?.ok_or_else(|| FinboardError::NotFound(id.into()))?;

    let mut data = NewTransaction {
        r#type: current.r#type,
        category: current.category,
        amount: current.amount,
        description: current.description,
        date: current.date,
    };
    if let Some(s) = sub.get_one::<String>("type") {
        data.r#type = s.parse()?;
    }
    if let Some(s) = sub.get_one::<String>("amount") {
        data.amount = parse_amount(s)?;
    }
    if let Some(s) = sub.get_one::<String>("category") {
        data.category = s.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("description") {
        data.description = s.trim().to_string();
    }
    if let Some(s) = sub.get_one::<String>("date") {
        data.date = parse_instant(s)?;
    }

    let t = update_transaction(conn, id, &data)?;
    println!("Updated transaction {}", t.id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    if !sub.get_flag("yes") {
        bail!("Refusing to delete {} without --yes", id);
    }
    delete_transaction(conn, id)?;
    println!("Deleted transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let filter = ListFilter::from_matches(sub)?;
    let data = query_rows(conn, &filter)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Category", "Amount", "Description", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub month: Option<MonthKey>,
    pub r#type: Option<TransactionType>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl ListFilter {
    pub fn from_matches(sub: &clap::ArgMatches) -> Result<Self> {
        Ok(Self {
            month: sub
                .get_one::<String>("month")
                .map(|s| s.parse::<MonthKey>())
                .transpose()?,
            r#type: sub
                .get_one::<String>("type")
                .map(|s| s.parse::<TransactionType>())
                .transpose()?,
            category: sub.get_one::<String>("category").map(|s| s.trim().to_string()),
            limit: sub.get_one::<usize>("limit").copied(),
        })
    }
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            date: t.date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            r#type: t.r#type.to_string(),
            category: t.category.clone(),
            amount: format!("{:.2}", t.amount),
            description: t.description.clone(),
        }
    }
}

/// Newest-first listing. Month buckets are taken in the local timezone.
pub fn query_rows(conn: &Connection, filter: &ListFilter) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT id, type, category, amount, description, date FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(kind) = filter.r#type {
        sql.push_str(" AND type=?");
        params_vec.push(kind.as_str().into());
    }
    if let Some(cat) = &filter.category {
        sql.push_str(" AND category=?");
        params_vec.push(cat.clone());
    }
    sql.push_str(ORDER_NEWEST_FIRST);

    let raw = fetch_raw(conn, &sql, &params_vec)?;
    let mut data = Vec::new();
    for r in raw {
        if filter.limit.is_some_and(|l| data.len() >= l) {
            break;
        }
        let t = r.parse()?;
        if let Some(month) = filter.month {
            if MonthKey::of(&t.date.with_timezone(&Local)) != month {
                continue;
            }
        }
        data.push(TransactionRow::from(&t));
    }
    Ok(data)
}

const ORDER_NEWEST_FIRST: &str = " ORDER BY ts DESC, rowid DESC";

/// A transaction row exactly as stored, before any field is parsed.
#[derive(Debug, Clone)]
pub struct RawTransaction {
    pub id: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub date: String,
}

impl RawTransaction {
    pub fn parse(&self) -> FinboardResult<Transaction> {
        let kind: TransactionType = self.r#type.parse()?;
        let amount = parse_amount(&self.amount)?;
        let date = parse_stored_date(&self.date)?;
        Transaction::new(
            self.id.clone(),
            kind,
            amount,
            date,
            self.category.clone(),
            self.description.clone(),
        )
    }
}

fn fetch_raw(conn: &Connection, sql: &str, params_vec: &[String]) -> Result<Vec<RawTransaction>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), |r| {
        Ok(RawTransaction {
            id: r.get(0)?,
            r#type: r.get(1)?,
            category: r.get(2)?,
            amount: r.get(3)?,
            description: r.get(4)?,
            date: r.get(5)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn load_raw(conn: &Connection) -> Result<Vec<RawTransaction>> {
    let sql = format!(
        "SELECT id, type, category, amount, description, date FROM transactions{}",
        ORDER_NEWEST_FIRST
    );
    fetch_raw(conn, &sql, &[])
}

/// Every stored transaction, most recent first. Fails on the first row that
/// cannot be parsed.
pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut out = Vec::new();
    for raw in load_raw(conn)? {
        let t = raw
            .parse()
            .with_context(|| format!("Transaction '{}' is malformed", raw.id))?;
        out.push(t);
    }
    log::debug!("loaded {} transactions", out.len());
    Ok(out)
}

pub fn get_transaction(conn: &Connection, id: &str) -> Result<Option<Transaction>> {
    let raw = conn
        .query_row(
            "SELECT id, type, category, amount, description, date FROM transactions WHERE id=?1",
            params![id],
            |r| {
                Ok(RawTransaction {
                    id: r.get(0)?,
                    r#type: r.get(1)?,
                    category: r.get(2)?,
                    amount: r.get(3)?,
                    description: r.get(4)?,
                    date: r.get(5)?,
                })
            },
        )
        .optional()?;
    match raw {
        Some(r) => Ok(Some(r.parse()?)),
        None => Ok(None),
    }
}

pub fn insert_transaction(conn: &Connection, data: &NewTransaction) -> Result<Transaction> {
    let t = Transaction::from_new(Uuid::new_v4().to_string(), data)?;
    conn.execute(
        "INSERT INTO transactions(id, type, category, amount, description, date, ts)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            t.id,
            t.r#type.as_str(),
            t.category,
            t.amount.to_string(),
            t.description,
            t.date.to_rfc3339(),
            t.date.timestamp_millis()
        ],
    )?;
    log::info!("inserted {} transaction {}", t.r#type, t.id);
    Ok(t)
}

pub fn update_transaction(
    conn: &Connection,
    id: &str,
    data: &NewTransaction,
) -> Result<Transaction> {
    let t = Transaction::from_new(id, data)?;
    let changed = conn.execute(
        "UPDATE transactions SET type=?2, category=?3, amount=?4, description=?5, date=?6, ts=?7
         WHERE id=?1",
        params![
            t.id,
            t.r#type.as_str(),
            t.category,
            t.amount.to_string(),
            t.description,
            t.date.to_rfc3339(),
            t.date.timestamp_millis()
        ],
    )?;
    if changed == 0 {
        return Err(FinboardError::NotFound(id.to_string()).into());
    }
    log::info!("updated transaction {}", t.id);
    Ok(t)
}

pub fn delete_transaction(conn: &Connection, id: &str) -> Result<()> {
    let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(FinboardError::NotFound(id.to_string()).into());
    }
    log::info!("deleted transaction {}", id);
    Ok(())
}
