// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::error::{FinboardError, FinboardResult};
use crate::models::check_amount;
use crate::recent::DEFAULT_RECENT_LIMIT;

pub const DEFAULT_CURRENCY: &str = "INR";

/// Parses a stored instant. Only RFC 3339 is accepted here.
pub fn parse_stored_date(s: &str) -> FinboardResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).map_err(|source| FinboardError::MalformedDate {
        value: s.to_string(),
        source,
    })
}

/// Parses user input: RFC 3339, or `YYYY-MM-DD` taken as local midnight.
pub fn parse_instant(s: &str) -> FinboardResult<DateTime<FixedOffset>> {
    let s = s.trim();
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt),
        Err(rfc_err) => {
            let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                FinboardError::MalformedDate {
                    value: s.to_string(),
                    source: rfc_err,
                }
            })?;
            let midnight = day.and_time(chrono::NaiveTime::MIN);
            match Local.from_local_datetime(&midnight).earliest() {
                Some(dt) => Ok(dt.fixed_offset()),
                // Local midnight skipped by a DST jump; fall back to UTC.
                None => Ok(chrono::Utc.from_utc_datetime(&midnight).fixed_offset()),
            }
        }
    }
}

pub fn parse_amount(s: &str) -> FinboardResult<Decimal> {
    let s = s.trim();
    let d = s
        .parse::<Decimal>()
        .map_err(|source| FinboardError::InvalidAmount {
            value: s.to_string(),
            source,
        })?;
    check_amount(d)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()
        .with_context(|| format!("Read setting '{}'", key))?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "currency")?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn get_recent_limit(conn: &Connection) -> Result<usize> {
    match get_setting(conn, "recent_limit")? {
        Some(v) => v
            .parse::<usize>()
            .with_context(|| format!("Invalid recent_limit setting '{}'", v)),
        None => Ok(DEFAULT_RECENT_LIMIT),
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_dates_must_be_rfc3339() {
        assert!(parse_stored_date("2024-03-10T08:00:00+05:30").is_ok());
        assert!(matches!(
            parse_stored_date("10/03/2024"),
            Err(FinboardError::MalformedDate { .. })
        ));
    }

    #[test]
    fn date_only_input_is_accepted() {
        let dt = parse_instant(" 2024-03-10 ").unwrap();
        assert_eq!(dt.with_timezone(&Local).date_naive().to_string(), "2024-03-10");
        assert!(parse_instant("March 10").is_err());
    }

    #[test]
    fn amounts_are_non_negative_decimals() {
        assert_eq!(parse_amount("12.50").unwrap(), Decimal::new(1250, 2));
        assert!(matches!(
            parse_amount("-1"),
            Err(FinboardError::NegativeAmount(_))
        ));
        assert!(matches!(
            parse_amount("abc"),
            Err(FinboardError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_amount("50000000000000000000000000000"),
            Err(FinboardError::AmountTooLarge(_))
        ));
        assert!(parse_amount("1000000000000000").is_ok());
    }

    #[test]
    fn money_is_rounded_to_cents() {
        assert_eq!(fmt_money(&Decimal::new(488005, 1), "INR"), "INR 48800.50");
    }
}
