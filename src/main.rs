// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use wealthtrack::{cli, commands, db, session::Session, sync::Mirror, utils};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let store = db::load_store(&conn)?;
    let mirror = match db::remote_url(&conn)? {
        Some(url) => Some(Mirror::new(&url)?),
        None => None,
    };
    let mut sess = Session::new(conn, store, mirror);
    sess.init_remote();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&mut sess, sub)?,
        Some(("tx", sub)) => commands::ledger::handle(&mut sess, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut sess, sub)?,
        Some(("deposit", sub)) => commands::deposits::handle(&mut sess, sub)?,
        Some(("stock", sub)) => commands::stocks::handle(&mut sess, sub)?,
        Some(("report", sub)) => commands::reports::handle(&sess, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&sess, sub)?,
        Some(("sync", sub)) => commands::sync::handle(&mut sess, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
