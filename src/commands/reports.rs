// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::session::Session;
use crate::stats;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};

pub fn handle(sess: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("overview", _)) => overview(sess),
        Some(("spend-by-category", sub)) => spend_by_category(sess, sub),
        Some(("trend", sub)) => trend(sess, sub),
        _ => Ok(()),
    }
}

fn overview(sess: &Session) -> Result<()> {
    let store = &sess.store;
    let balances = stats::total_account_balance(&store.accounts);
    let deposits = stats::total_deposits(&store.deposits);
    let stock_profit = stats::total_stock_profit(&store.stocks);
    let net = stats::net_worth(store);
    let rows = vec![
        vec!["Account balance".into(), fmt_amount(&balances)],
        vec!["Fixed deposits".into(), fmt_amount(&deposits)],
        vec!["Stock profit".into(), fmt_amount(&stock_profit)],
        vec!["Net worth".into(), fmt_amount(&net)],
    ];
    println!("{}", pretty_table(&["", "Total"], rows));

    let accounts = store
        .accounts
        .iter()
        .map(|a| vec![a.name.clone(), fmt_amount(&a.balance)])
        .collect();
    println!("{}", pretty_table(&["Account", "Balance"], accounts));
    Ok(())
}

fn spend_by_category(sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let buckets = stats::spending_by_category(&sess.store.ledger);
    let data: Vec<Vec<String>> = buckets
        .iter()
        .map(|(name, total)| vec![name.clone(), fmt_amount(total)])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

#[derive(Serialize)]
struct TrendRow {
    date: String,
    income: String,
    expense: String,
}

fn trend(sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let days = *sub.get_one::<usize>("days").unwrap();
    let flows = stats::daily_trend(&sess.store.ledger, days);
    let data: Vec<TrendRow> = flows
        .iter()
        .map(|f| TrendRow {
            date: f.date.to_string(),
            income: fmt_amount(&f.income),
            expense: fmt_amount(&f.expense),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|f| vec![f.date.clone(), f.income.clone(), f.expense.clone()])
            .collect();
        println!("{}", pretty_table(&["Date", "Income", "Expense"], rows));
    }
    Ok(())
}
