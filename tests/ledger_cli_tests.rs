// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use wealthtrack::commands::{exporter, ledger};
use wealthtrack::models::EntryKind;
use wealthtrack::store::{EntryDraft, Store};
use wealthtrack::{cli, stats};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn seeded_store() -> Store {
    let mut store = Store::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new(), 0);
    let a = store.add_account("Cash", None).unwrap();
    let entries = [
        ("2024-12-31", "5", "Dining", "year-end dinner"),
        ("2025-01-01", "10", "Dining", "breakfast"),
        ("2025-01-02", "20", "Transport", "taxi ride"),
        ("2025-01-03", "30", "Dining", "team lunch"),
        ("2025-02-01", "40", "Housing", "broadband"),
    ];
    for (day, amount, category, remark) in entries {
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        store
            .add_entry(EntryDraft {
                amount: dec(amount),
                kind: EntryKind::Expense,
                account_id: a,
                primary_category: category.into(),
                secondary_category: String::new(),
                date,
                remark: Some(remark.into()),
            })
            .unwrap();
    }
    store
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["wealthtrack", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected_most_recent_first() {
    let store = seeded_store();
    let rows = ledger::query_rows(&store, &list_matches(&["--limit", "2"]));
    assert_eq!(rows.len(), 2);
    assert!(rows[0].date.starts_with("2025-02-01"));
    assert!(rows[1].date.starts_with("2025-01-03"));
}

#[test]
fn year_and_month_filters_combine() {
    let store = seeded_store();
    let rows = ledger::query_rows(&store, &list_matches(&["--year", "2025", "--month", "1"]));
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.date.starts_with("2025-01")));
}

#[test]
fn category_filter_is_exact() {
    let store = seeded_store();
    let rows = ledger::query_rows(&store, &list_matches(&["--category", "Dining"]));
    assert_eq!(rows.len(), 3);
}

#[test]
fn search_matches_remark_case_insensitive() {
    let store = seeded_store();
    let rows = ledger::query_rows(&store, &list_matches(&["--search", "TAXI"]));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].primary_category, "Transport");
}

#[test]
fn dangling_account_renders_unknown() {
    let mut store = seeded_store();
    store.add_account("Backup", None).unwrap();
    let cash = store.accounts[0].id;
    store.delete_account(cash).unwrap();

    let rows = ledger::query_rows(&store, &list_matches(&[]));
    assert!(rows.iter().all(|r| r.account == "(unknown account)"));
}

#[test]
fn spending_report_matches_ledger() {
    let store = seeded_store();
    let buckets = stats::spending_by_category(&store.ledger);
    assert_eq!(buckets[0], ("Dining".to_string(), dec("45")));
}

#[test]
fn csv_export_writes_all_entries() {
    let store = seeded_store();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ledger.csv");
    let out_str = out.to_str().unwrap().to_string();

    let matches = cli::build_cli().get_matches_from([
        "wealthtrack", "export", "ledger", "--format", "csv", "--out", &out_str,
    ]);
    let Some(("export", export_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    let Some(("ledger", ledger_m)) = export_m.subcommand() else {
        panic!("no ledger subcommand");
    };
    exporter::export_ledger(&store, ledger_m).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,kind,amount,account,category,subcategory,remark"
    );
    assert_eq!(lines.count(), store.ledger.len());
    assert!(text.contains("team lunch"));
}
