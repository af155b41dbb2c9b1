// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::models::EntryKind;
use crate::session::Session;
use crate::store::Store;
use crate::utils::fmt_amount;

pub fn handle(sess: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ledger", sub)) => export_ledger(&sess.store, sub),
        _ => Ok(()),
    }
}

pub fn export_ledger(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let rows: Vec<(String, &str, String, String, &str, &str, String)> = store
        .ledger
        .iter()
        .map(|e| {
            (
                e.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
                match e.kind {
                    EntryKind::Income => "INCOME",
                    EntryKind::Expense => "EXPENSE",
                },
                fmt_amount(&e.amount),
                store
                    .account(e.account_id)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| "(unknown account)".into()),
                e.primary_category.as_str(),
                e.secondary_category.as_str(),
                e.remark.clone().unwrap_or_default(),
            )
        })
        .collect();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date", "kind", "amount", "account", "category", "subcategory", "remark",
            ])?;
            for (date, kind, amount, account, cat, sub, remark) in rows {
                wtr.write_record([date.as_str(), kind, &amount, &account, cat, sub, &remark])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|(date, kind, amount, account, cat, sub, remark)| {
                    json!({
                        "date": date, "kind": kind, "amount": amount, "account": account,
                        "category": cat, "subcategory": sub, "remark": remark
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported ledger to {}", out);
    Ok(())
}
