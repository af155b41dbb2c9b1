// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::session::Session;
use crate::stats;
use crate::utils::{confirm, fmt_amount, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(sess: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let code = sub.get_one::<String>("code").map(|s| s.as_str());
            let parsed = (|| {
                let buy = parse_decimal(sub.get_one::<String>("buy").unwrap())?;
                let sell = parse_decimal(sub.get_one::<String>("sell").unwrap())?;
                let fee = match sub.get_one::<String>("fee") {
                    Some(f) => parse_decimal(f)?,
                    None => Decimal::ZERO,
                };
                anyhow::Ok((buy, sell, fee))
            })();
            let (buy, sell, fee) = match parsed {
                Ok(v) => v,
                Err(err) => {
                    eprintln!("{:#}", err);
                    return Ok(());
                }
            };
            match sess.store.add_stock(name, code, buy, sell, fee) {
                Ok(id) => {
                    println!("Added stock record '{}' (id {})", name.trim(), id);
                    sess.commit();
                }
                Err(err) => eprintln!("{}", err),
            }
        }
        Some(("list", sub)) => list(sess, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if !confirm("Delete this trade record?", sub.get_flag("yes"))? {
                println!("Aborted.");
                return Ok(());
            }
            match sess.store.delete_stock(id) {
                Ok(record) => {
                    println!("Removed stock record '{}'", record.name);
                    sess.commit();
                }
                Err(err) => eprintln!("{}", err),
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct StockRow {
    id: i64,
    name: String,
    code: String,
    buy_price: String,
    sell_price: String,
    fee: String,
    profit: String,
    roi_pct: String,
}

fn list(sess: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<StockRow> = sess
        .store
        .stocks
        .iter()
        .map(|s| {
            let profit = stats::stock_profit(s);
            let roi = stats::stock_roi(s) * Decimal::from(100);
            StockRow {
                id: s.id,
                name: s.name.clone(),
                code: s.code.clone().unwrap_or_default(),
                buy_price: fmt_amount(&s.buy_price),
                sell_price: fmt_amount(&s.sell_price),
                fee: fmt_amount(&s.fee),
                profit: fmt_amount(&profit),
                roi_pct: format!("{:.2}%", roi.round_dp(2)),
            }
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.name.clone(),
                    s.code.clone(),
                    s.buy_price.clone(),
                    s.sell_price.clone(),
                    s.fee.clone(),
                    s.profit.clone(),
                    s.roi_pct.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Code", "Buy", "Sell", "Fee", "Profit", "ROI"],
                rows,
            )
        );
    }
    Ok(())
}
