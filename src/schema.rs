use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical identifier of a calendar month, `"YYYY-MM"` with a zero-padded
/// month so that lexicographic order equals chronological order.
pub type PeriodKey = String;

/// Source label applied to income recorded without one.
pub const DEFAULT_INCOME_SOURCE: &str = "Income";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub source: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub desc: String,
    pub amount: f64,
}

/// One month of budgeting data in canonical form. This is the shape that is
/// always written back to storage; `income_entries` serializes as
/// `incomeEntries` to match the persisted format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub income_entries: Vec<IncomeEntry>,
    pub budget: f64,
    pub expenses: Vec<Expense>,
}

/// Read-side shape of a stored period. Older data wrote income under the
/// `income` key, as a list of entries, a list of bare amounts, or a single
/// bare amount; `budget` and `expenses` are decoded leniently so one odd
/// field never discards the rest of the record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPeriodRecord {
    #[serde(default, rename = "incomeEntries")]
    pub income_entries: Option<RawIncome>,

    /// Legacy field name, superseded by `incomeEntries`.
    #[serde(default)]
    pub income: Option<RawIncome>,

    #[serde(default)]
    pub budget: Value,

    #[serde(default)]
    pub expenses: Value,
}

/// The recognized income encodings, one variant per stored shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawIncome {
    /// Canonical: a list of `{source, amount}` entries.
    Entries(Vec<IncomeEntry>),
    /// Legacy: a list of bare amounts.
    Amounts(Vec<f64>),
    /// Legacy: a single bare amount.
    Single(f64),
    /// Anything else is dropped during normalization.
    Unrecognized(Value),
}
