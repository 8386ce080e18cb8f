//! # Budget Book
//!
//! A library for keeping monthly budget periods and computing remaining
//! balances from income and expense records.
//!
//! ## Core Concepts
//!
//! - **Period**: a calendar month, keyed `"YYYY-MM"`, holding income entries,
//!   an optional budget cap, and expenses
//! - **Baseline**: the spending reference — the budget cap when one is set,
//!   otherwise total income
//! - **Normalization**: stored periods may carry legacy income shapes (a bare
//!   amount, or a list of bare amounts); reads upgrade them to the canonical
//!   entry shape and writes are always canonical
//!
//! All state lives in a single JSON file, one object mapping period keys to
//! records. Invalid user input (blank description, non-positive amount) is
//! reported as a rejected mutation and leaves state unchanged; only actual
//! persistence failures surface as errors.
//!
//! ## Example
//!
//! ```rust,ignore
//! use budget_book::{BudgetBook, period_key};
//! use chrono::NaiveDate;
//!
//! let book = BudgetBook::new("budget.json");
//! let key = period_key(NaiveDate::from_ymd_opt(2026, 4, 10).unwrap());
//!
//! book.create_period(&key)?;
//! book.add_income(&key, "Salary", 2400.0)?;
//! book.set_budget(&key, 1800.0)?;
//! book.add_expense(&key, "Rent", 950.0)?;
//!
//! let record = book.open_period(&key);
//! assert_eq!(record.remaining_balance(), 850.0);
//! ```

pub mod aggregate;
pub mod error;
pub mod schema;
pub mod store;
pub mod utils;

pub use error::{BudgetBookError, Result};
pub use schema::{Expense, IncomeEntry, PeriodKey, PeriodRecord, DEFAULT_INCOME_SOURCE};
pub use store::{PeriodStore, PeriodStoreBlob};
pub use utils::*;

use log::{debug, info};
use std::path::PathBuf;

/// Dashboard line for one period: the key plus its derived totals.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub key: PeriodKey,
    pub total_income: f64,
    pub total_spent: f64,
}

/// The interface the UI layer talks to. Owns the store; every mutation loads
/// the period, applies the change, and persists back only when the change
/// was accepted, so a rejected input never touches the file.
pub struct BudgetBook {
    store: PeriodStore,
}

impl BudgetBook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: PeriodStore::new(path),
        }
    }

    pub fn store(&self) -> &PeriodStore {
        &self.store
    }

    /// All periods in ascending key order with their income/spent totals,
    /// for dashboard rendering. Legacy shapes are normalized before summing.
    pub fn list_periods(&self) -> Vec<PeriodSummary> {
        self.store
            .load_all()
            .into_iter()
            .map(|(key, record)| PeriodSummary {
                total_income: record.total_income(),
                total_spent: record.total_spent(),
                key,
            })
            .collect()
    }

    /// The normalized record for `key`; a period that does not exist yet
    /// reads as a fresh empty record.
    pub fn open_period(&self, key: &str) -> PeriodRecord {
        self.store.get(key)
    }

    /// Inserts an empty record under `key`. A period that already exists is
    /// left untouched.
    pub fn create_period(&self, key: &str) -> Result<()> {
        let mut blob = self.store.load_all();
        if blob.contains_key(key) {
            debug!("Period {} already exists, leaving it as is", key);
            return Ok(());
        }

        info!("Creating period {}", key);
        blob.insert(key.to_string(), PeriodRecord::default());
        self.store.save_all(&blob)
    }

    pub fn delete_period(&self, key: &str) -> Result<()> {
        info!("Deleting period {}", key);
        self.store.delete(key)
    }

    /// Records an income entry. Returns whether the entry was accepted.
    pub fn add_income(&self, key: &str, source: &str, amount: f64) -> Result<bool> {
        self.apply(key, |record| record.add_income(source, amount))
    }

    /// Records an expense. Returns whether the expense was accepted.
    pub fn add_expense(&self, key: &str, desc: &str, amount: f64) -> Result<bool> {
        self.apply(key, |record| record.add_expense(desc, amount))
    }

    pub fn remove_income_at(&self, key: &str, index: usize) -> Result<bool> {
        self.apply(key, |record| record.remove_income_at(index))
    }

    pub fn remove_expense_at(&self, key: &str, index: usize) -> Result<bool> {
        self.apply(key, |record| record.remove_expense_at(index))
    }

    pub fn clear_expenses(&self, key: &str) -> Result<()> {
        self.apply(key, |record| {
            record.clear_expenses();
            true
        })
        .map(|_| ())
    }

    pub fn set_budget(&self, key: &str, amount: f64) -> Result<()> {
        self.apply(key, |record| {
            record.set_budget(amount);
            true
        })
        .map(|_| ())
    }

    fn apply(&self, key: &str, mutate: impl FnOnce(&mut PeriodRecord) -> bool) -> Result<bool> {
        let mut record = self.store.get(key);
        if !mutate(&mut record) {
            debug!("Rejected mutation on period {}, state unchanged", key);
            return Ok(false);
        }
        self.store.put(key, &record)?;
        Ok(true)
    }
}
