// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

use crate::models::{default_accounts, default_categories};
use crate::store::Store;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.wealthtrack", "WealthTrack", "wealthtrack"));

// Fixed snapshot keys; one JSON document per collection.
pub const KEY_ACCOUNTS: &str = "wt_accounts";
pub const KEY_LEDGER: &str = "wt_ledger";
pub const KEY_CATEGORIES: &str = "wt_categories";
pub const KEY_DEPOSITS: &str = "wt_deposits";
pub const KEY_STOCKS: &str = "wt_stocks";
pub const KEY_NEXT_ID: &str = "wt_next_id";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("wealthtrack.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS snapshots(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

/// Read one snapshot slot. A missing or unparsable slot falls back to the
/// supplied default; corrupt data must never prevent startup.
fn load_slot<T: DeserializeOwned>(
    conn: &Connection,
    key: &str,
    default: impl FnOnce() -> T,
) -> Result<T> {
    let raw: Option<String> = conn
        .query_row("SELECT value FROM snapshots WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    match raw {
        Some(text) => match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(key, %err, "corrupt snapshot slot, using defaults");
                Ok(default())
            }
        },
        None => Ok(default()),
    }
}

pub fn load_store(conn: &Connection) -> Result<Store> {
    let accounts = load_slot(conn, KEY_ACCOUNTS, default_accounts)?;
    let ledger = load_slot(conn, KEY_LEDGER, Vec::new)?;
    let categories = load_slot(conn, KEY_CATEGORIES, default_categories)?;
    let deposits = load_slot(conn, KEY_DEPOSITS, Vec::new)?;
    let stocks = load_slot(conn, KEY_STOCKS, Vec::new)?;
    let next_id: i64 = load_slot(conn, KEY_NEXT_ID, || 0)?;
    Ok(Store::new(
        accounts, ledger, categories, deposits, stocks, next_id,
    ))
}

fn save_slot<T: Serialize>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    conn.execute(
        "INSERT INTO snapshots(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, serde_json::to_string(value)?],
    )?;
    Ok(())
}

/// Rewrite the full snapshot. Called after every committed state change.
pub fn save_store(conn: &mut Connection, store: &Store) -> Result<()> {
    let tx = conn.transaction()?;
    save_slot(&tx, KEY_ACCOUNTS, &store.accounts)?;
    save_slot(&tx, KEY_LEDGER, &store.ledger)?;
    save_slot(&tx, KEY_CATEGORIES, &store.categories)?;
    save_slot(&tx, KEY_DEPOSITS, &store.deposits)?;
    save_slot(&tx, KEY_STOCKS, &store.stocks)?;
    save_slot(&tx, KEY_NEXT_ID, &store.next_id_hint())?;
    tx.commit()?;
    Ok(())
}

// Remote mirror settings

pub fn remote_url(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='remote_url'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_remote_url(conn: &Connection, url: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('remote_url', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![url],
    )?;
    Ok(())
}
