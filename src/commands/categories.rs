// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::session::Session;
use crate::utils::{confirm, maybe_print_json, pretty_table};

pub fn handle(sess: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            match sess.store.add_category(name) {
                Ok(id) => {
                    println!("Added category '{}' (id {})", name.trim(), id);
                    sess.commit();
                }
                // Duplicates are a warning, not a failure.
                Err(err) => eprintln!("{}", err),
            }
        }
        Some(("add-sub", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            match sess.store.add_subcategory(id, name) {
                Ok(()) => {
                    println!("Added subcategory '{}'", name.trim());
                    sess.commit();
                }
                Err(err) => eprintln!("{}", err),
            }
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            if !maybe_print_json(json_flag, jsonl_flag, &sess.store.categories)? {
                let rows = sess
                    .store
                    .categories
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.sub_categories.join(", "),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Subcategories"], rows));
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let prompt = "Delete this category? Existing entries keep its label.";
            if !confirm(prompt, sub.get_flag("yes"))? {
                println!("Aborted.");
                return Ok(());
            }
            match sess.store.delete_category(id) {
                Ok(category) => {
                    println!("Removed category '{}'", category.name);
                    sess.commit();
                }
                Err(err) => eprintln!("{}", err),
            }
        }
        Some(("rm-sub", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            match sess.store.delete_subcategory(id, name) {
                Ok(()) => {
                    println!("Removed subcategory '{}'", name);
                    sess.commit();
                }
                Err(err) => eprintln!("{}", err),
            }
        }
        _ => {}
    }
    Ok(())
}
