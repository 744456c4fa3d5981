// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{arg, crate_version, value_parser, Arg, ArgAction, Command};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(arg!(--jsonl "Print one JSON object per line").action(ArgAction::SetTrue))
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .about("Personal income/expense tracker with a monthly dashboard")
        .version(crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("PATH")
                .env("FINBOARD_DB")
                .global(true)
                .help("SQLite database file (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(arg!(--type <TYPE> "income or expense").required(true))
                        .arg(arg!(--amount <AMOUNT> "Non-negative amount").required(true))
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--description <TEXT>).required(false))
                        .arg(
                            arg!(--date <DATE> "YYYY-MM-DD or RFC 3339; defaults to now")
                                .required(false),
                        ),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(arg!(--month <MONTH> "YYYY-MM").required(false))
                        .arg(arg!(--type <TYPE> "income or expense").required(false))
                        .arg(arg!(--category <CATEGORY>).required(false))
                        .arg(
                            arg!(--limit <N>)
                                .required(false)
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Change fields of a transaction")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(arg!(--type <TYPE>).required(false))
                        .arg(arg!(--amount <AMOUNT>).required(false))
                        .arg(arg!(--category <CATEGORY>).required(false))
                        .arg(arg!(--description <TEXT>).required(false))
                        .arg(arg!(--date <DATE>).required(false)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(arg!(--yes "Confirm deletion").action(ArgAction::SetTrue)),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Show this month's stats and recent transactions")
                .arg(
                    Arg::new("as-of")
                        .long("as-of")
                        .value_name("DATE")
                        .help("Reference instant instead of now (YYYY-MM-DD or RFC 3339)"),
                )
                .arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly reports")
                .subcommand(output_flags(
                    Command::new("cashflow").about("Income and expenses per month").arg(
                        arg!(--months <N>)
                            .required(false)
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(output_flags(
                    Command::new("by-category")
                        .about("Expenses per category for a month")
                        .arg(arg!(--month <MONTH> "YYYY-MM; defaults to this month").required(false)),
                )),
        )
        .subcommand(Command::new("sample").about("Load sample transactions dated now"))
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export all transactions")
                    .arg(arg!(--format <FMT> "csv or json").required(true))
                    .arg(arg!(--out <PATH>).required(true)),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency").arg(arg!(<currency> "Currency code, e.g. INR")),
                )
                .subcommand(
                    Command::new("set-recent-limit").arg(
                        arg!(<limit> "Number of recent transactions on the dashboard")
                            .value_parser(value_parser!(usize)),
                    ),
                ),
        )
        .subcommand(Command::new("doctor").about("Find stored rows that cannot be read"))
}
