// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::EntryKind;
use crate::session::Session;
use crate::store::{EntryDraft, LedgerFilter, Store};
use crate::utils::{confirm, fmt_amount, maybe_print_json, parse_datetime, parse_decimal, pretty_table};

pub fn handle(sess: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(sess, sub)?,
        Some(("list", sub)) => list(sess, sub)?,
        Some(("rm", sub)) => rm(sess, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(sess: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let amount = match parse_decimal(sub.get_one::<String>("amount").unwrap()) {
        Ok(a) => a,
        Err(err) => {
            eprintln!("{:#}", err);
            return Ok(());
        }
    };
    let kind = match sub.get_one::<String>("kind").unwrap().as_str() {
        "income" => EntryKind::Income,
        _ => EntryKind::Expense,
    };
    let account_id = *sub.get_one::<i64>("account").unwrap();
    let primary = sub.get_one::<String>("category").unwrap().clone();
    let date = match sub.get_one::<String>("date") {
        Some(s) => match parse_datetime(s) {
            Ok(d) => d,
            Err(err) => {
                eprintln!("{:#}", err);
                return Ok(());
            }
        },
        None => Utc::now().naive_utc(),
    };
    // Fall back to the category's first subcategory, matching the entry form.
    let secondary = sub.get_one::<String>("sub").cloned().unwrap_or_else(|| {
        sess.store
            .categories
            .iter()
            .find(|c| c.name == primary)
            .and_then(|c| c.sub_categories.first().cloned())
            .unwrap_or_default()
    });
    let remark = sub.get_one::<String>("remark").cloned();

    // Soft warning only: accounts are allowed to go negative.
    if kind == EntryKind::Expense {
        if let Some(account) = sess.store.account(account_id) {
            let prompt = if account.balance <= Decimal::ZERO {
                Some(format!(
                    "Account '{}' balance is {}. Record this expense anyway?",
                    account.name,
                    fmt_amount(&account.balance)
                ))
            } else if amount > account.balance {
                Some(format!(
                    "Account '{}' holds {} but this expense is {}. Continue?",
                    account.name,
                    fmt_amount(&account.balance),
                    fmt_amount(&amount)
                ))
            } else {
                None
            };
            if let Some(prompt) = prompt {
                if !confirm(&prompt, sub.get_flag("yes"))? {
                    println!("Aborted.");
                    return Ok(());
                }
            }
        }
    }

    let draft = EntryDraft {
        amount,
        kind,
        account_id,
        primary_category: primary,
        secondary_category: secondary,
        date,
        remark,
    };
    match sess.store.add_entry(draft) {
        Ok(id) => {
            println!("Recorded entry {} ({})", id, fmt_amount(&amount));
            sess.commit();
        }
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}

#[derive(Serialize)]
pub struct EntryRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub account: String,
    pub primary_category: String,
    pub secondary_category: String,
    pub remark: String,
}

pub fn filter_from_matches(sub: &clap::ArgMatches) -> LedgerFilter {
    LedgerFilter {
        search: sub.get_one::<String>("search").cloned(),
        primary: sub.get_one::<String>("category").cloned(),
        secondary: sub.get_one::<String>("sub").cloned(),
        year: sub.get_one::<i32>("year").copied(),
        month: sub.get_one::<u32>("month").copied(),
    }
}

pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Vec<EntryRow> {
    let filter = filter_from_matches(sub);
    let mut entries = store.filtered_entries(&filter);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        entries.truncate(*limit);
    }
    entries
        .into_iter()
        .map(|e| EntryRow {
            id: e.id,
            date: e.date.format("%Y-%m-%d %H:%M").to_string(),
            kind: match e.kind {
                EntryKind::Income => "income".into(),
                EntryKind::Expense => "expense".into(),
            },
            amount: match e.kind {
                EntryKind::Income => format!("+{}", fmt_amount(&e.amount)),
                EntryKind::Expense => format!("-{}", fmt_amount(&e.amount)),
            },
            // Dangling references render, they never fail.
            account: store
                .account(e.account_id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| "(unknown account)".into()),
            primary_category: e.primary_category.clone(),
            secondary_category: e.secondary_category.clone(),
            remark: e.remark.clone().unwrap_or_default(),
        })
        .collect()
}

fn list(sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(&sess.store, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.primary_category.clone(),
                    r.secondary_category.clone(),
                    r.account.clone(),
                    r.amount.clone(),
                    r.remark.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Category", "Sub", "Account", "Amount", "Remark"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(sess: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let prompt = "Delete this entry? The account balance will be rolled back.";
    if !confirm(prompt, sub.get_flag("yes"))? {
        println!("Aborted.");
        return Ok(());
    }
    match sess.store.delete_entry(id) {
        Ok(entry) => {
            println!("Deleted entry {} ({})", entry.id, fmt_amount(&entry.amount));
            sess.commit();
        }
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}
