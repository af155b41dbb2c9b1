// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub balance: Decimal,
}

/// One recorded income or expense affecting exactly one account.
/// Immutable once created, except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub amount: Decimal,
    pub kind: EntryKind,
    /// Weak reference; may dangle after the account is deleted.
    pub account_id: i64,
    pub primary_category: String,
    pub secondary_category: String,
    pub date: NaiveDateTime,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub sub_categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DepositStatus {
    Ongoing,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedDeposit {
    pub id: i64,
    pub name: String,
    pub principal: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Annual percentage rate as a plain percent number (3.5 means 3.5%).
    pub apr: Decimal,
    pub status: DepositStatus,
    /// Set exactly once, on settlement. Weak reference afterwards.
    pub settled_to_account_id: Option<i64>,
}

/// A completed buy/sell round-trip. Prices are totals, not per-share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub fee: Decimal,
}

pub fn default_accounts() -> Vec<Account> {
    vec![
        Account {
            id: 1,
            name: "Cash".into(),
            balance: Decimal::ZERO,
        },
        Account {
            id: 2,
            name: "Bank Card".into(),
            balance: Decimal::ZERO,
        },
    ]
}

pub fn default_categories() -> Vec<Category> {
    let seed: [(&str, &[&str]); 7] = [
        (
            "Dining",
            &["Breakfast", "Lunch", "Dinner", "Snacks", "Groceries"],
        ),
        ("Transport", &["Metro", "Bus", "Taxi", "Fuel", "Bike Share"]),
        ("Shopping", &["Essentials", "Clothing", "Electronics", "Home"]),
        ("Entertainment", &["Movies", "Games", "Sports", "Travel"]),
        ("Housing", &["Rent", "Property Fees", "Utilities", "Broadband"]),
        ("Gifts", &["Red Packets", "Presents", "Treating"]),
        ("Income", &["Salary", "Bonus", "Side Job", "Investment"]),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (name, subs))| Category {
            id: i as i64 + 1,
            name: (*name).into(),
            sub_categories: subs.iter().map(|s| (*s).into()).collect(),
        })
        .collect()
}
