// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use rusqlite::Connection;
use rust_decimal::Decimal;

use wealthtrack::db;
use wealthtrack::models::EntryKind;
use wealthtrack::session::Session;
use wealthtrack::store::EntryDraft;
use wealthtrack::sync::Mirror;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Minimal loopback mirror stub: answers GET /records/latest with 404 (no
/// record yet) and counts every POST. One request per connection.
fn spawn_mirror_stub() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let pushes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pushes);
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut head = Vec::new();
            let mut byte = [0u8; 1];
            while !head.ends_with(b"\r\n\r\n") {
                match stream.read(&mut byte) {
                    Ok(1) => head.push(byte[0]),
                    _ => break,
                }
            }
            let head = String::from_utf8_lossy(&head).to_string();
            let body_len = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            let mut body = vec![0u8; body_len];
            let _ = stream.read_exact(&mut body);
            let status = if head.starts_with("POST") {
                counter.fetch_add(1, Ordering::SeqCst);
                "200 OK"
            } else {
                "404 Not Found"
            };
            let _ = stream.write_all(
                format!(
                    "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    status
                )
                .as_bytes(),
            );
        }
    });
    (format!("http://127.0.0.1:{}", port), pushes)
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

#[test]
fn session_starts_gated() {
    let conn = setup();
    let store = db::load_store(&conn).unwrap();
    let sess = Session::new(conn, store, None);
    assert!(!sess.is_ready());
    assert!(sess.mirror().is_none());
}

#[test]
fn init_remote_without_mirror_opens_gate() {
    let conn = setup();
    let store = db::load_store(&conn).unwrap();
    let mut sess = Session::new(conn, store, None);
    sess.init_remote();
    assert!(sess.is_ready());
}

#[test]
fn commit_persists_snapshot_locally() {
    let conn = setup();
    let store = db::load_store(&conn).unwrap();
    let mut sess = Session::new(conn, store, None);
    sess.init_remote();

    let a = sess.store.accounts[0].id;
    sess.store
        .add_entry(EntryDraft {
            amount: dec("12.30"),
            kind: EntryKind::Expense,
            account_id: a,
            primary_category: "Dining".into(),
            secondary_category: "Lunch".into(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 5, 1)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap(),
            remark: None,
        })
        .unwrap();
    sess.commit();

    let slots: i64 = sess
        .conn
        .query_row("SELECT COUNT(*) FROM snapshots", [], |r| r.get(0))
        .unwrap();
    assert_eq!(slots, 6);

    let loaded = db::load_store(&sess.conn).unwrap();
    assert_eq!(loaded.ledger.len(), 1);
    assert_eq!(loaded.accounts[0].balance, dec("-12.30"));
}

#[test]
fn commit_pushes_only_after_initial_load() {
    let (base, pushes) = spawn_mirror_stub();
    let conn = setup();
    let mut store = db::load_store(&conn).unwrap();
    let a = store.accounts[0].id;
    store
        .add_entry(EntryDraft {
            amount: dec("8"),
            kind: EntryKind::Expense,
            account_id: a,
            primary_category: "Dining".into(),
            secondary_category: "Lunch".into(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 5, 2)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            remark: None,
        })
        .unwrap();
    let mirror = Mirror::new(&base).unwrap();
    let mut sess = Session::new(conn, store, Some(mirror));

    // Before the initial load finishes, a commit must stay local.
    sess.commit();
    assert_eq!(pushes.load(Ordering::SeqCst), 0);

    sess.init_remote();
    sess.commit();
    assert_eq!(pushes.load(Ordering::SeqCst), 1);
}

#[test]
fn mirror_base_url_trimmed() {
    let mirror = Mirror::new("https://mirror.example/api/").unwrap();
    assert_eq!(mirror.base_url(), "https://mirror.example/api");
}
