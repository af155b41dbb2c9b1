// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use wealthtrack::db;
use wealthtrack::models::EntryKind;
use wealthtrack::store::EntryDraft;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE snapshots(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        "#,
    )
    .unwrap();
    conn
}

fn draft(amount: &str, account_id: i64) -> EntryDraft {
    EntryDraft {
        amount: dec(amount),
        kind: EntryKind::Expense,
        account_id,
        primary_category: "Dining".into(),
        secondary_category: "Lunch".into(),
        date: chrono::NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
        remark: Some("coffee".into()),
    }
}

#[test]
fn fresh_db_seeds_defaults() {
    let conn = setup();
    let store = db::load_store(&conn).unwrap();
    assert_eq!(store.accounts.len(), 2);
    assert_eq!(store.categories.len(), 7);
    assert!(store.ledger.is_empty());
    assert!(store.deposits.is_empty());
    assert!(store.stocks.is_empty());
}

#[test]
fn snapshot_round_trip_preserves_state() {
    let mut conn = setup();
    let mut store = db::load_store(&conn).unwrap();
    let a = store.accounts[0].id;
    store.add_entry(draft("42.50", a)).unwrap();
    store
        .add_deposit(
            "CD",
            dec("1000"),
            dec("3.5"),
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .unwrap();
    store
        .add_stock("Acme", Some("ACME"), dec("100"), dec("150"), dec("10"))
        .unwrap();
    db::save_store(&mut conn, &store).unwrap();

    let loaded = db::load_store(&conn).unwrap();
    assert_eq!(loaded.ledger.len(), 1);
    assert_eq!(loaded.ledger[0].amount, dec("42.50"));
    assert_eq!(loaded.ledger[0].remark.as_deref(), Some("coffee"));
    assert_eq!(loaded.accounts[0].balance, dec("-42.50"));
    assert_eq!(loaded.deposits.len(), 1);
    assert_eq!(loaded.deposits[0].apr, dec("3.5"));
    assert_eq!(loaded.stocks.len(), 1);
}

#[test]
fn corrupt_slot_falls_back_to_defaults() {
    let mut conn = setup();
    let mut store = db::load_store(&conn).unwrap();
    let a = store.accounts[0].id;
    store.add_entry(draft("10", a)).unwrap();
    db::save_store(&mut conn, &store).unwrap();

    // Clobber one slot; the others must still load.
    conn.execute(
        "UPDATE snapshots SET value='not json {' WHERE key=?1",
        params![db::KEY_ACCOUNTS],
    )
    .unwrap();

    let loaded = db::load_store(&conn).unwrap();
    assert_eq!(loaded.accounts.len(), 2);
    assert_eq!(loaded.accounts[0].balance, Decimal::ZERO);
    assert_eq!(loaded.ledger.len(), 1);
}

#[test]
fn id_counter_resumes_after_reload() {
    let mut conn = setup();
    let mut store = db::load_store(&conn).unwrap();
    let a = store.accounts[0].id;
    let last = store.add_entry(draft("10", a)).unwrap();
    db::save_store(&mut conn, &store).unwrap();

    let mut loaded = db::load_store(&conn).unwrap();
    let next = loaded.add_entry(draft("11", a)).unwrap();
    assert!(next > last);
}

#[test]
fn remote_url_setting_round_trip() {
    let conn = setup();
    assert!(db::remote_url(&conn).unwrap().is_none());
    db::set_remote_url(&conn, "https://mirror.example/api").unwrap();
    assert_eq!(
        db::remote_url(&conn).unwrap().as_deref(),
        Some("https://mirror.example/api")
    );
    db::set_remote_url(&conn, "https://other.example").unwrap();
    assert_eq!(
        db::remote_url(&conn).unwrap().as_deref(),
        Some("https://other.example")
    );
}
