//! Normalization of stored period shapes and the derived-total and mutation
//! operations over a [`PeriodRecord`].
//!
//! Every operation here is total: invalid input is reported by returning
//! `false` and leaving the record untouched, never by an error. The caller
//! (the UI layer) decides how to surface a rejection.

use crate::schema::{
    IncomeEntry, PeriodRecord, RawIncome, RawPeriodRecord, DEFAULT_INCOME_SOURCE,
};

impl RawPeriodRecord {
    /// Upgrades a stored record into the canonical shape.
    ///
    /// Income is taken from `incomeEntries` when present, falling back to the
    /// legacy `income` field; bare amounts become entries sourced
    /// [`DEFAULT_INCOME_SOURCE`]. A budget that is not a non-negative number
    /// collapses to `0`, and an unrecognized expense list collapses to empty.
    ///
    /// Normalizing an already-canonical record is a no-op, so re-reading data
    /// this library wrote always yields an equal record.
    pub fn normalize(self) -> PeriodRecord {
        let income_entries = match self.income_entries.or(self.income) {
            Some(RawIncome::Entries(entries)) => entries,
            Some(RawIncome::Amounts(amounts)) => amounts
                .into_iter()
                .map(|amount| IncomeEntry {
                    source: DEFAULT_INCOME_SOURCE.to_string(),
                    amount,
                })
                .collect(),
            Some(RawIncome::Single(amount)) => vec![IncomeEntry {
                source: DEFAULT_INCOME_SOURCE.to_string(),
                amount,
            }],
            Some(RawIncome::Unrecognized(_)) | None => Vec::new(),
        };

        let budget = match self.budget.as_f64() {
            Some(b) if b >= 0.0 => b,
            _ => 0.0,
        };

        let expenses = serde_json::from_value(self.expenses).unwrap_or_default();

        PeriodRecord {
            income_entries,
            budget,
            expenses,
        }
    }
}

impl PeriodRecord {
    pub fn total_income(&self) -> f64 {
        self.income_entries.iter().map(|entry| entry.amount).sum()
    }

    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    /// Remaining balance against the spending baseline: an explicit positive
    /// budget cap overrides income, otherwise total income is the baseline.
    /// A negative result means the period is overspent and is a valid value.
    pub fn remaining_balance(&self) -> f64 {
        let base = if self.budget > 0.0 {
            self.budget
        } else {
            self.total_income()
        };
        base - self.total_spent()
    }

    /// Appends an income entry. Rejects non-positive amounts; a blank source
    /// defaults to [`DEFAULT_INCOME_SOURCE`].
    pub fn add_income(&mut self, source: &str, amount: f64) -> bool {
        if !(amount > 0.0) {
            return false;
        }
        let source = if source.trim().is_empty() {
            DEFAULT_INCOME_SOURCE.to_string()
        } else {
            source.to_string()
        };
        self.income_entries.push(IncomeEntry { source, amount });
        true
    }

    /// Appends an expense. Rejects a blank description or a non-positive
    /// amount; the stored description is the trimmed text.
    pub fn add_expense(&mut self, desc: &str, amount: f64) -> bool {
        let desc = desc.trim();
        if desc.is_empty() || !(amount > 0.0) {
            return false;
        }
        self.expenses.push(crate::schema::Expense {
            desc: desc.to_string(),
            amount,
        });
        true
    }

    /// Removes the income entry at `index`; rejects out-of-bounds indices.
    pub fn remove_income_at(&mut self, index: usize) -> bool {
        if index >= self.income_entries.len() {
            return false;
        }
        self.income_entries.remove(index);
        true
    }

    /// Removes the expense at `index`; rejects out-of-bounds indices.
    pub fn remove_expense_at(&mut self, index: usize) -> bool {
        if index >= self.expenses.len() {
            return false;
        }
        self.expenses.remove(index);
        true
    }

    /// Empties the expense list; income and budget are untouched.
    pub fn clear_expenses(&mut self) {
        self.expenses.clear();
    }

    /// Sets the budget cap to `max(amount, 0)`; a NaN amount is treated as 0.
    pub fn set_budget(&mut self, amount: f64) {
        self.budget = if amount > 0.0 { amount } else { 0.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Expense;

    fn raw(json: &str) -> RawPeriodRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_legacy_single_amount() {
        let record = raw(r#"{"income": 500, "budget": 0, "expenses": []}"#).normalize();
        assert_eq!(
            record.income_entries,
            vec![IncomeEntry {
                source: "Income".to_string(),
                amount: 500.0
            }]
        );
    }

    #[test]
    fn test_normalize_legacy_amount_list() {
        let record = raw(r#"{"income": [100, 200]}"#).normalize();
        assert_eq!(record.income_entries.len(), 2);
        assert!(record.income_entries.iter().all(|e| e.source == "Income"));
        assert_eq!(record.income_entries[0].amount, 100.0);
        assert_eq!(record.income_entries[1].amount, 200.0);
        assert_eq!(record.budget, 0.0);
        assert!(record.expenses.is_empty());
    }

    #[test]
    fn test_normalize_prefers_canonical_income_field() {
        let record = raw(
            r#"{"incomeEntries": [{"source": "Salary", "amount": 900}], "income": 500}"#,
        )
        .normalize();
        assert_eq!(record.income_entries.len(), 1);
        assert_eq!(record.income_entries[0].source, "Salary");
        assert_eq!(record.income_entries[0].amount, 900.0);
    }

    #[test]
    fn test_normalize_coerces_bad_budget_and_expenses() {
        let record = raw(r#"{"budget": -40}"#).normalize();
        assert_eq!(record.budget, 0.0);

        let record = raw(r#"{"budget": "high", "expenses": 12}"#).normalize();
        assert_eq!(record.budget, 0.0);
        assert!(record.expenses.is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = raw(r#"{"income": [150, 75.5], "budget": 300, "expenses": [{"desc": "Fuel", "amount": 60}]}"#)
            .normalize();

        let reread: RawPeriodRecord =
            serde_json::from_value(serde_json::to_value(&once).unwrap()).unwrap();
        let twice = reread.normalize();

        assert_eq!(twice, once);
    }

    #[test]
    fn test_totals_sum_amounts() {
        let mut record = PeriodRecord::default();
        assert_eq!(record.total_income(), 0.0);
        assert_eq!(record.total_spent(), 0.0);

        assert!(record.add_income("Salary", 100.0));
        assert!(record.add_income("Side gig", 250.5));
        assert_eq!(record.total_income(), 350.5);

        assert!(record.add_expense("Groceries", 100.0));
        assert!(record.add_expense("Transit", 250.5));
        assert_eq!(record.total_spent(), 350.5);
    }

    #[test]
    fn test_remaining_balance_income_baseline() {
        let mut record = PeriodRecord::default();
        record.add_income("Salary", 1000.0);
        record.add_expense("Rent", 300.0);
        assert_eq!(record.remaining_balance(), 700.0);
    }

    #[test]
    fn test_remaining_balance_budget_overrides_income() {
        let mut record = PeriodRecord::default();
        record.add_income("Salary", 1000.0);
        record.add_expense("Rent", 300.0);
        record.set_budget(500.0);
        assert_eq!(record.remaining_balance(), 200.0);
    }

    #[test]
    fn test_remaining_balance_can_go_negative() {
        let mut record = PeriodRecord::default();
        record.add_expense("Coffee", 50.0);
        assert_eq!(record.remaining_balance(), -50.0);
    }

    #[test]
    fn test_add_income_defaults_blank_source() {
        let mut record = PeriodRecord::default();
        assert!(record.add_income("", 80.0));
        assert!(record.add_income("   ", 20.0));
        assert!(record
            .income_entries
            .iter()
            .all(|e| e.source == "Income"));
    }

    #[test]
    fn test_add_income_rejects_non_positive() {
        let mut record = PeriodRecord::default();
        assert!(!record.add_income("Salary", 0.0));
        assert!(!record.add_income("Salary", -5.0));
        assert!(!record.add_income("Salary", f64::NAN));
        assert!(record.income_entries.is_empty());
    }

    #[test]
    fn test_add_expense_rejects_invalid_input() {
        let mut record = PeriodRecord::default();
        assert!(!record.add_expense("", 10.0));
        assert!(!record.add_expense("   ", 10.0));
        assert!(!record.add_expense("coffee", 0.0));
        assert!(!record.add_expense("coffee", -1.0));
        assert!(record.expenses.is_empty());
    }

    #[test]
    fn test_add_expense_stores_trimmed_desc() {
        let mut record = PeriodRecord::default();
        assert!(record.add_expense("  coffee  ", 4.5));
        assert_eq!(record.expenses[0].desc, "coffee");
    }

    #[test]
    fn test_remove_at_out_of_bounds_is_noop() {
        let mut record = PeriodRecord::default();
        record.add_expense("a", 1.0);
        record.add_expense("b", 2.0);
        assert!(!record.remove_expense_at(99));
        assert_eq!(record.expenses.len(), 2);

        record.add_income("Salary", 10.0);
        assert!(!record.remove_income_at(1));
        assert_eq!(record.income_entries.len(), 1);
    }

    #[test]
    fn test_remove_at_is_positional() {
        let mut record = PeriodRecord::default();
        record.add_expense("first", 1.0);
        record.add_expense("second", 2.0);
        record.add_expense("third", 3.0);

        assert!(record.remove_expense_at(1));
        assert_eq!(
            record.expenses,
            vec![
                Expense {
                    desc: "first".to_string(),
                    amount: 1.0
                },
                Expense {
                    desc: "third".to_string(),
                    amount: 3.0
                },
            ]
        );
    }

    #[test]
    fn test_clear_expenses_keeps_income_and_budget() {
        let mut record = PeriodRecord::default();
        record.add_income("Salary", 100.0);
        record.set_budget(80.0);
        record.add_expense("a", 1.0);
        record.clear_expenses();

        assert!(record.expenses.is_empty());
        assert_eq!(record.income_entries.len(), 1);
        assert_eq!(record.budget, 80.0);
    }

    #[test]
    fn test_set_budget_clamps_to_zero() {
        let mut record = PeriodRecord::default();
        record.set_budget(-10.0);
        assert_eq!(record.budget, 0.0);
        record.set_budget(f64::NAN);
        assert_eq!(record.budget, 0.0);
        record.set_budget(250.0);
        assert_eq!(record.budget, 250.0);
    }
}
