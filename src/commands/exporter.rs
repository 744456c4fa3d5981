// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::load_transactions;
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let mut items = load_transactions(conn)?;
    // Oldest first reads naturally in a spreadsheet.
    items.reverse();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "type", "category", "amount", "description"])?;
            for t in &items {
                wtr.write_record([
                    t.id.as_str(),
                    &t.date.to_rfc3339(),
                    t.r#type.as_str(),
                    &t.category,
                    &t.amount.to_string(),
                    &t.description,
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    log::info!("exported {} transactions as {}", items.len(), fmt);
    println!("Exported {} transactions to {}", items.len(), out);
    Ok(())
}
