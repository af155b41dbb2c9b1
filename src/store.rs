// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    Account, Category, DepositStatus, EntryKind, FixedDeposit, LedgerEntry, StockRecord,
    default_accounts, default_categories,
};
use crate::stats;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("cannot delete the last remaining account")]
    LastAccount,
    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: i64 },
    #[error("category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("subcategory '{0}' already exists in that category")]
    DuplicateSubcategory(String),
    #[error("deposit '{0}' is already settled")]
    AlreadySettled(String),
}

fn invalid(msg: impl Into<String>) -> StoreError {
    StoreError::Validation(msg.into())
}

/// Everything needed to record a ledger entry, minus the id the store assigns.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub amount: Decimal,
    pub kind: EntryKind,
    pub account_id: i64,
    pub primary_category: String,
    pub secondary_category: String,
    pub date: NaiveDateTime,
    pub remark: Option<String>,
}

/// Browse filters for the ledger view. `None` means "don't restrict".
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    pub search: Option<String>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl LedgerFilter {
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if let Some(term) = &self.search {
            let hit = entry
                .remark
                .as_deref()
                .is_some_and(|r| r.to_lowercase().contains(&term.to_lowercase()));
            if !hit {
                return false;
            }
        }
        if let Some(primary) = &self.primary {
            if &entry.primary_category != primary {
                return false;
            }
        }
        if let Some(secondary) = &self.secondary {
            if &entry.secondary_category != secondary {
                return false;
            }
        }
        if let Some(year) = self.year {
            if entry.date.year() != year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if entry.date.month() != month {
                return false;
            }
        }
        true
    }
}

/// The single owner of all domain state. Every sanctioned mutation goes
/// through a method here, and each one keeps the account-balance invariant
/// consistent with ledger history.
#[derive(Debug, Clone)]
pub struct Store {
    pub accounts: Vec<Account>,
    pub ledger: Vec<LedgerEntry>,
    pub categories: Vec<Category>,
    pub deposits: Vec<FixedDeposit>,
    pub stocks: Vec<StockRecord>,
    next_id: i64,
}

impl Store {
    pub fn new(
        accounts: Vec<Account>,
        ledger: Vec<LedgerEntry>,
        categories: Vec<Category>,
        deposits: Vec<FixedDeposit>,
        stocks: Vec<StockRecord>,
        next_id: i64,
    ) -> Self {
        let mut store = Self {
            accounts,
            ledger,
            categories,
            deposits,
            stocks,
            next_id,
        };
        store.next_id = store.next_id.max(store.max_seen_id());
        store
    }

    /// Fresh store with the default seed accounts and category taxonomy.
    pub fn seeded() -> Self {
        let accounts = default_accounts();
        let categories = default_categories();
        let next_id = accounts
            .iter()
            .map(|a| a.id)
            .chain(categories.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);
        Self {
            accounts,
            ledger: Vec::new(),
            categories,
            deposits: Vec::new(),
            stocks: Vec::new(),
            next_id,
        }
    }

    pub fn next_id_hint(&self) -> i64 {
        self.next_id
    }

    fn max_seen_id(&self) -> i64 {
        self.accounts
            .iter()
            .map(|a| a.id)
            .chain(self.ledger.iter().map(|e| e.id))
            .chain(self.categories.iter().map(|c| c.id))
            .chain(self.deposits.iter().map(|d| d.id))
            .chain(self.stocks.iter().map(|s| s.id))
            .max()
            .unwrap_or(0)
    }

    // Monotonic counter instead of the wall-clock ids the original app used;
    // rapid successive inserts must never collide.
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn account(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    fn account_mut(&mut self, id: i64) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    // ----- accounts -----

    pub fn add_account(
        &mut self,
        name: &str,
        initial_balance: Option<Decimal>,
    ) -> Result<i64, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("account name must not be blank"));
        }
        let id = self.alloc_id();
        self.accounts.push(Account {
            id,
            name: name.to_string(),
            balance: initial_balance.unwrap_or(Decimal::ZERO),
        });
        Ok(id)
    }

    pub fn delete_account(&mut self, id: i64) -> Result<Account, StoreError> {
        // Resolve the id first so an unknown id reports NotFound, not the
        // last-account guard.
        let idx = self
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or(StoreError::NotFound { kind: "account", id })?;
        if self.accounts.len() <= 1 {
            return Err(StoreError::LastAccount);
        }
        Ok(self.accounts.remove(idx))
    }

    /// Manual correction. Deliberately does not touch ledger history.
    pub fn set_account_balance(
        &mut self,
        id: i64,
        new_balance: Decimal,
    ) -> Result<(), StoreError> {
        let account = self
            .account_mut(id)
            .ok_or(StoreError::NotFound { kind: "account", id })?;
        account.balance = new_balance;
        Ok(())
    }

    // ----- ledger -----

    pub fn add_entry(&mut self, draft: EntryDraft) -> Result<i64, StoreError> {
        if draft.amount <= Decimal::ZERO {
            return Err(invalid("amount must be greater than zero"));
        }
        let id = self.alloc_id();
        // A dangling account id is tolerated: the entry is still recorded
        // and the balance adjustment is skipped.
        if let Some(account) = self.account_mut(draft.account_id) {
            match draft.kind {
                EntryKind::Income => account.balance += draft.amount,
                EntryKind::Expense => account.balance -= draft.amount,
            }
        }
        self.ledger.insert(
            0,
            LedgerEntry {
                id,
                amount: draft.amount,
                kind: draft.kind,
                account_id: draft.account_id,
                primary_category: draft.primary_category,
                secondary_category: draft.secondary_category,
                date: draft.date,
                remark: draft.remark.filter(|r| !r.trim().is_empty()),
            },
        );
        Ok(id)
    }

    /// Symmetric inverse of `add_entry`: reverses the exact balance delta the
    /// entry applied, then removes it. The reversal is skipped when the
    /// account has since been deleted.
    pub fn delete_entry(&mut self, id: i64) -> Result<LedgerEntry, StoreError> {
        let idx = self
            .ledger
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound { kind: "ledger entry", id })?;
        let entry = self.ledger.remove(idx);
        if let Some(account) = self.account_mut(entry.account_id) {
            match entry.kind {
                EntryKind::Income => account.balance -= entry.amount,
                EntryKind::Expense => account.balance += entry.amount,
            }
        }
        Ok(entry)
    }

    /// Most-recent-first view of the ledger under the given filters.
    pub fn filtered_entries(&self, filter: &LedgerFilter) -> Vec<&LedgerEntry> {
        let mut entries: Vec<&LedgerEntry> =
            self.ledger.iter().filter(|e| filter.matches(e)).collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Wholesale replacement from the remote mirror (last-writer-wins).
    pub fn replace_ledger(&mut self, entries: Vec<LedgerEntry>) {
        self.ledger = entries;
        self.next_id = self.next_id.max(self.max_seen_id());
    }

    // ----- categories -----

    pub fn add_category(&mut self, name: &str) -> Result<i64, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("category name must not be blank"));
        }
        if self.categories.iter().any(|c| c.name == name) {
            return Err(StoreError::DuplicateCategory(name.to_string()));
        }
        let id = self.alloc_id();
        self.categories.push(Category {
            id,
            name: name.to_string(),
            sub_categories: Vec::new(),
        });
        Ok(id)
    }

    pub fn add_subcategory(&mut self, category_id: i64, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("subcategory name must not be blank"));
        }
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or(StoreError::NotFound { kind: "category", id: category_id })?;
        if category.sub_categories.iter().any(|s| s == name) {
            return Err(StoreError::DuplicateSubcategory(name.to_string()));
        }
        category.sub_categories.push(name.to_string());
        Ok(())
    }

    /// Unconditional removal. Entries that reference the category keep their
    /// stored label strings; orphaned labels are valid.
    pub fn delete_category(&mut self, id: i64) -> Result<Category, StoreError> {
        let idx = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound { kind: "category", id })?;
        Ok(self.categories.remove(idx))
    }

    pub fn delete_subcategory(&mut self, category_id: i64, name: &str) -> Result<(), StoreError> {
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or(StoreError::NotFound { kind: "category", id: category_id })?;
        let idx = category
            .sub_categories
            .iter()
            .position(|s| s == name)
            .ok_or_else(|| invalid(format!("no subcategory named '{}'", name)))?;
        category.sub_categories.remove(idx);
        Ok(())
    }

    // ----- fixed deposits -----

    pub fn add_deposit(
        &mut self,
        name: &str,
        principal: Decimal,
        apr: Decimal,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
    ) -> Result<i64, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("deposit name must not be blank"));
        }
        if principal <= Decimal::ZERO {
            return Err(invalid("principal must be greater than zero"));
        }
        if apr < Decimal::ZERO {
            return Err(invalid("APR must not be negative"));
        }
        let id = self.alloc_id();
        self.deposits.push(FixedDeposit {
            id,
            name: name.to_string(),
            principal,
            start_date,
            end_date,
            apr,
            status: DepositStatus::Ongoing,
            settled_to_account_id: None,
        });
        Ok(id)
    }

    /// One-shot transition Ongoing -> Expired: credits principal + interest
    /// to the target account and stamps the settlement in a single step.
    /// Returns the accrued interest.
    pub fn settle_deposit(
        &mut self,
        deposit_id: i64,
        account_id: i64,
    ) -> Result<Decimal, StoreError> {
        let deposit = self
            .deposits
            .iter()
            .find(|d| d.id == deposit_id)
            .ok_or(StoreError::NotFound { kind: "deposit", id: deposit_id })?;
        if deposit.status == DepositStatus::Expired {
            return Err(StoreError::AlreadySettled(deposit.name.clone()));
        }
        if self.account(account_id).is_none() {
            return Err(StoreError::NotFound { kind: "account", id: account_id });
        }
        let interest =
            stats::deposit_interest(deposit.principal, deposit.apr, deposit.start_date, deposit.end_date);
        let total = deposit.principal + interest;

        // Both sides checked above; apply as one transition.
        if let Some(account) = self.account_mut(account_id) {
            account.balance += total;
        }
        if let Some(deposit) = self.deposits.iter_mut().find(|d| d.id == deposit_id) {
            deposit.status = DepositStatus::Expired;
            deposit.settled_to_account_id = Some(account_id);
        }
        Ok(interest)
    }

    // ----- stock records -----

    pub fn add_stock(
        &mut self,
        name: &str,
        code: Option<&str>,
        buy_price: Decimal,
        sell_price: Decimal,
        fee: Decimal,
    ) -> Result<i64, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("stock name must not be blank"));
        }
        if fee < Decimal::ZERO {
            return Err(invalid("fee must not be negative"));
        }
        let id = self.alloc_id();
        self.stocks.push(StockRecord {
            id,
            name: name.to_string(),
            code: code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            buy_price,
            sell_price,
            fee,
        });
        Ok(id)
    }

    pub fn delete_stock(&mut self, id: i64) -> Result<StockRecord, StoreError> {
        let idx = self
            .stocks
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound { kind: "stock record", id })?;
        Ok(self.stocks.remove(idx))
    }
}
