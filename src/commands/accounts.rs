// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::session::Session;
use crate::utils::{confirm, fmt_amount, maybe_print_json, pretty_table};

pub fn handle(sess: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            // An unparsable balance falls back to zero rather than failing.
            let balance = sub
                .get_one::<String>("balance")
                .and_then(|s| s.parse::<Decimal>().ok());
            match sess.store.add_account(name, balance) {
                Ok(id) => {
                    println!("Added account '{}' (id {})", name.trim(), id);
                    sess.commit();
                }
                Err(err) => eprintln!("{}", err),
            }
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            if !maybe_print_json(json_flag, jsonl_flag, &sess.store.accounts)? {
                let rows = sess
                    .store
                    .accounts
                    .iter()
                    .map(|a| vec![a.id.to_string(), a.name.clone(), fmt_amount(&a.balance)])
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Balance"], rows));
            }
        }
        Some(("set-balance", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let balance = match sub.get_one::<String>("balance").unwrap().parse::<Decimal>() {
                Ok(b) => b,
                Err(_) => {
                    eprintln!("invalid balance value");
                    return Ok(());
                }
            };
            match sess.store.set_account_balance(id, balance) {
                Ok(()) => {
                    println!("Account {} balance set to {}", id, fmt_amount(&balance));
                    sess.commit();
                }
                Err(err) => eprintln!("{}", err),
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let Some(name) = sess.store.account(id).map(|a| a.name.clone()) else {
                eprintln!("no account with id {}", id);
                return Ok(());
            };
            let prompt = format!(
                "Delete account '{}'? Ledger entries keep referencing it as unknown.",
                name
            );
            if !confirm(&prompt, sub.get_flag("yes"))? {
                println!("Aborted.");
                return Ok(());
            }
            match sess.store.delete_account(id) {
                Ok(account) => {
                    println!("Removed account '{}'", account.name);
                    sess.commit();
                }
                Err(err) => eprintln!("{}", err),
            }
        }
        _ => {}
    }
    Ok(())
}
