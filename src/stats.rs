// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure derivations over the domain state. Nothing here mutates anything.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Account, EntryKind, FixedDeposit, LedgerEntry, StockRecord};
use crate::store::Store;

pub fn total_account_balance(accounts: &[Account]) -> Decimal {
    accounts.iter().map(|a| a.balance).sum()
}

/// Principal across all deposits regardless of status; accrued interest is
/// intentionally not part of this aggregate.
pub fn total_deposits(deposits: &[FixedDeposit]) -> Decimal {
    deposits.iter().map(|d| d.principal).sum()
}

pub fn total_stock_profit(stocks: &[StockRecord]) -> Decimal {
    stocks.iter().map(stock_profit).sum()
}

pub fn net_worth(store: &Store) -> Decimal {
    total_account_balance(&store.accounts)
        + total_deposits(&store.deposits)
        + total_stock_profit(&store.stocks)
}

/// Simple (non-compounding) interest over the literal calendar-day count:
/// `principal * apr/100 * days / 365`. The dates are already day-truncated,
/// so the day count is whole; a reversed range counts the same days.
pub fn deposit_interest(
    principal: Decimal,
    apr_percent: Decimal,
    start: NaiveDate,
    end: NaiveDate,
) -> Decimal {
    let days = (end - start).num_days().abs();
    if days == 0 {
        return Decimal::ZERO;
    }
    principal * apr_percent / Decimal::from(100) * Decimal::from(days) / Decimal::from(365)
}

pub fn stock_profit(record: &StockRecord) -> Decimal {
    record.sell_price - record.buy_price - record.fee
}

/// Profit over cost basis, as a fraction. Zero cost basis yields zero, not
/// an error.
pub fn stock_roi(record: &StockRecord) -> Decimal {
    if record.buy_price.is_zero() {
        return Decimal::ZERO;
    }
    stock_profit(record) / record.buy_price
}

/// Expense totals grouped by primary category, largest first. Ties keep
/// first-seen order (stable sort).
pub fn spending_by_category(ledger: &[LedgerEntry]) -> Vec<(String, Decimal)> {
    let mut buckets: Vec<(String, Decimal)> = Vec::new();
    for entry in ledger.iter().filter(|e| e.kind == EntryKind::Expense) {
        match buckets.iter_mut().find(|(name, _)| name == &entry.primary_category) {
            Some((_, total)) => *total += entry.amount,
            None => buckets.push((entry.primary_category.clone(), entry.amount)),
        }
    }
    buckets.sort_by(|a, b| b.1.cmp(&a.1));
    buckets
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DayFlow {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Per-day income/expense sums for the most recent `window_days` distinct
/// calendar dates present in the ledger, ascending. Returns everything when
/// fewer distinct dates exist.
pub fn daily_trend(ledger: &[LedgerEntry], window_days: usize) -> Vec<DayFlow> {
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for entry in ledger {
        let slot = days.entry(entry.date.date()).or_default();
        match entry.kind {
            EntryKind::Income => slot.0 += entry.amount,
            EntryKind::Expense => slot.1 += entry.amount,
        }
    }
    let mut flows: Vec<DayFlow> = days
        .into_iter()
        .rev()
        .take(window_days)
        .map(|(date, (income, expense))| DayFlow { date, income, expense })
        .collect();
    flows.reverse();
    flows
}
