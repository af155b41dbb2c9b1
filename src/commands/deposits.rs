// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use crate::models::DepositStatus;
use crate::session::Session;
use crate::stats;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(sess: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(sess, sub)?,
        Some(("list", sub)) => list(sess, sub)?,
        Some(("settle", sub)) => settle(sess, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(sess: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let parsed = (|| {
        let principal = parse_decimal(sub.get_one::<String>("principal").unwrap())?;
        let apr = parse_decimal(sub.get_one::<String>("apr").unwrap())?;
        let start = match sub.get_one::<String>("start") {
            Some(s) => parse_date(s)?,
            None => Utc::now().date_naive(),
        };
        let end = parse_date(sub.get_one::<String>("end").unwrap())?;
        anyhow::Ok((principal, apr, start, end))
    })();
    let (principal, apr, start, end) = match parsed {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{:#}", err);
            return Ok(());
        }
    };
    match sess.store.add_deposit(name, principal, apr, start, end) {
        Ok(id) => {
            let interest = stats::deposit_interest(principal, apr, start, end);
            println!(
                "Added deposit '{}' (id {}), projected interest {}",
                name.trim(),
                id,
                fmt_amount(&interest)
            );
            sess.commit();
        }
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}

#[derive(Serialize)]
struct DepositRow {
    id: i64,
    name: String,
    principal: String,
    apr: String,
    start_date: String,
    end_date: String,
    interest: String,
    status: String,
    settled_to: String,
}

fn list(sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<DepositRow> = sess
        .store
        .deposits
        .iter()
        .map(|d| {
            let interest =
                stats::deposit_interest(d.principal, d.apr, d.start_date, d.end_date);
            DepositRow {
                id: d.id,
                name: d.name.clone(),
                principal: fmt_amount(&d.principal),
                apr: format!("{}%", d.apr),
                start_date: d.start_date.to_string(),
                end_date: d.end_date.to_string(),
                interest: fmt_amount(&interest),
                status: match d.status {
                    DepositStatus::Ongoing => "ongoing".into(),
                    DepositStatus::Expired => "expired".into(),
                },
                settled_to: match d.settled_to_account_id {
                    Some(id) => sess
                        .store
                        .account(id)
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| "(unknown account)".into()),
                    None => "-".into(),
                },
            }
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|d| {
                vec![
                    d.id.to_string(),
                    d.name.clone(),
                    d.principal.clone(),
                    d.apr.clone(),
                    d.start_date.clone(),
                    d.end_date.clone(),
                    d.interest.clone(),
                    d.status.clone(),
                    d.settled_to.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Name", "Principal", "APR", "Start", "End", "Interest", "Status",
                    "Settled to",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn settle(sess: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let account_id = *sub.get_one::<i64>("account").unwrap();
    match sess.store.settle_deposit(id, account_id) {
        Ok(interest) => {
            let account = sess
                .store
                .account(account_id)
                .map(|a| a.name.clone())
                .unwrap_or_default();
            println!(
                "Settled deposit {} into '{}' (interest {})",
                id,
                account,
                fmt_amount(&interest)
            );
            sess.commit();
        }
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}
