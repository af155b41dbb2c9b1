// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::db;
use crate::session::Session;

pub fn handle(sess: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-remote", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            db::set_remote_url(&sess.conn, url)?;
            println!("Remote mirror set to {}", url);
        }
        Some(("show", _)) => match db::remote_url(&sess.conn)? {
            Some(url) => println!("Remote mirror: {}", url),
            None => println!("No remote mirror configured."),
        },
        Some(("push", _)) => match sess.mirror() {
            Some(mirror) => match mirror.push(&sess.store.ledger) {
                Ok(()) => println!("Pushed {} ledger entries.", sess.store.ledger.len()),
                Err(err) => eprintln!("Push failed: {:#}", err),
            },
            None => eprintln!("No remote mirror configured."),
        },
        _ => {}
    }
    Ok(())
}
