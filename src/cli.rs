// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn yes_flag() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Manage accounts")
        .subcommand(
            Command::new("add")
                .about("Add an account")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("balance")
                        .long("balance")
                        .help("Initial balance (defaults to 0)"),
                ),
        )
        .subcommand(json_flags(Command::new("list").about("List accounts")))
        .subcommand(
            Command::new("set-balance")
                .about("Override an account balance (manual correction)")
                .arg(id_arg())
                .arg(Arg::new("balance").long("balance").required(true)),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an account")
                .arg(id_arg())
                .arg(yes_flag()),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse ledger entries")
        .subcommand(
            Command::new("add")
                .about("Record an income or expense")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(
                    Arg::new("account")
                        .long("account")
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .help("Account id"),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("sub").long("sub").help("Secondary category"))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS (defaults to now)"),
                )
                .arg(Arg::new("remark").long("remark"))
                .arg(yes_flag()),
        )
        .subcommand(
            json_flags(
                Command::new("list")
                    .about("List ledger entries, most recent first")
                    .arg(Arg::new("search").long("search").help("Match remark text"))
                    .arg(Arg::new("category").long("category"))
                    .arg(Arg::new("sub").long("sub"))
                    .arg(
                        Arg::new("year")
                            .long("year")
                            .value_parser(value_parser!(i32)),
                    )
                    .arg(
                        Arg::new("month")
                            .long("month")
                            .value_parser(value_parser!(u32).range(1..=12)),
                    )
                    .arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
            ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a ledger entry, reversing its balance effect")
                .arg(id_arg())
                .arg(yes_flag()),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Edit the category taxonomy")
        .subcommand(
            Command::new("add")
                .about("Add a primary category")
                .arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(
            Command::new("add-sub")
                .about("Add a subcategory")
                .arg(id_arg())
                .arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(json_flags(Command::new("list").about("List categories")))
        .subcommand(
            Command::new("rm")
                .about("Delete a category (ledger entries keep their labels)")
                .arg(id_arg())
                .arg(yes_flag()),
        )
        .subcommand(
            Command::new("rm-sub")
                .about("Remove a subcategory")
                .arg(id_arg())
                .arg(Arg::new("name").long("name").required(true)),
        )
}

fn deposit_cmd() -> Command {
    Command::new("deposit")
        .about("Manage fixed-term deposits")
        .subcommand(
            Command::new("add")
                .about("Add a fixed deposit")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("principal").long("principal").required(true))
                .arg(
                    Arg::new("apr")
                        .long("apr")
                        .required(true)
                        .help("Annual rate as a percent number, e.g. 3.5"),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help("YYYY-MM-DD (defaults to today)"),
                )
                .arg(Arg::new("end").long("end").required(true).help("YYYY-MM-DD")),
        )
        .subcommand(json_flags(Command::new("list").about("List deposits with accrued interest")))
        .subcommand(
            Command::new("settle")
                .about("Close a deposit, crediting principal + interest to an account")
                .arg(id_arg())
                .arg(
                    Arg::new("account")
                        .long("account")
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .help("Target account id"),
                ),
        )
}

fn stock_cmd() -> Command {
    Command::new("stock")
        .about("Record stock trade round-trips")
        .subcommand(
            Command::new("add")
                .about("Add a completed round-trip")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("code").long("code"))
                .arg(
                    Arg::new("buy")
                        .long("buy")
                        .required(true)
                        .help("Total cost basis before fee"),
                )
                .arg(
                    Arg::new("sell")
                        .long("sell")
                        .required(true)
                        .help("Total proceeds"),
                )
                .arg(Arg::new("fee").long("fee").help("Defaults to 0")),
        )
        .subcommand(json_flags(Command::new("list").about("List records with profit and ROI")))
        .subcommand(
            Command::new("rm")
                .about("Delete a record")
                .arg(id_arg())
                .arg(yes_flag()),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Summary statistics")
        .subcommand(Command::new("overview").about("Net worth breakdown and account balances"))
        .subcommand(json_flags(
            Command::new("spend-by-category").about("Expense totals by primary category"),
        ))
        .subcommand(
            json_flags(
                Command::new("trend")
                    .about("Per-day income/expense over recent days")
                    .arg(
                        Arg::new("days")
                            .long("days")
                            .value_parser(value_parser!(usize))
                            .default_value("7"),
                    ),
            ),
        )
}

fn export_cmd() -> Command {
    Command::new("export").about("Export data").subcommand(
        Command::new("ledger")
            .about("Export the full ledger")
            .arg(
                Arg::new("format")
                    .long("format")
                    .value_parser(["csv", "json"])
                    .default_value("csv"),
            )
            .arg(Arg::new("out").long("out").required(true)),
    )
}

fn sync_cmd() -> Command {
    Command::new("sync")
        .about("Configure and drive the remote mirror")
        .subcommand(
            Command::new("set-remote")
                .about("Set the remote mirror base URL")
                .arg(Arg::new("url").long("url").required(true)),
        )
        .subcommand(Command::new("show").about("Show the mirror configuration"))
        .subcommand(Command::new("push").about("Push the current ledger now"))
}

pub fn build_cli() -> Command {
    Command::new("wealthtrack")
        .about("Personal finance tracker: accounts, ledger, fixed deposits, stock round-trips")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(account_cmd())
        .subcommand(tx_cmd())
        .subcommand(category_cmd())
        .subcommand(deposit_cmd())
        .subcommand(stock_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(sync_cmd())
}
