// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::load_raw;
use crate::models::TransactionType;
use crate::utils::{parse_amount, parse_stored_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

/// Finds stored rows that would make `load_transactions` fail.
/// Each entry is `[issue, transaction id, detail]`.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    for raw in load_raw(conn)? {
        if let Err(e) = parse_stored_date(&raw.date) {
            rows.push(vec!["malformed_date".into(), raw.id.clone(), e.to_string()]);
        }
        if let Err(e) = raw.r#type.parse::<TransactionType>() {
            rows.push(vec!["unknown_type".into(), raw.id.clone(), e.to_string()]);
        }
        if let Err(e) = parse_amount(&raw.amount) {
            rows.push(vec!["bad_amount".into(), raw.id.clone(), e.to_string()]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        log::warn!("doctor found {} issue(s)", rows.len());
        println!("{}", pretty_table(&["Issue", "Transaction", "Detail"], rows));
    }
    Ok(())
}
