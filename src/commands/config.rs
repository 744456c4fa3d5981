// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, get_recent_limit, pretty_table, set_setting};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["currency".to_string(), get_currency(conn)?],
                vec!["recent_limit".to_string(), get_recent_limit(conn)?.to_string()],
            ];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("set-currency", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().trim().to_uppercase();
            if ccy.is_empty() {
                bail!("Currency must not be empty");
            }
            set_setting(conn, "currency", &ccy)?;
            println!("Currency set to {}", ccy);
        }
        Some(("set-recent-limit", sub)) => {
            let n = *sub.get_one::<usize>("limit").unwrap();
            set_setting(conn, "recent_limit", &n.to_string())?;
            println!("Dashboard will show {} recent transactions", n);
        }
        _ => {}
    }
    Ok(())
}
