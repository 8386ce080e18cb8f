use crate::schema::PeriodKey;
use chrono::{Datelike, NaiveDate};

/// Derives the period key for the calendar month containing `date`, in the
/// zero-padded `"YYYY-MM"` form. Every date within one month maps to the
/// same key, and keys sort lexicographically in chronological order.
pub fn period_key(date: NaiveDate) -> PeriodKey {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Parses a monetary amount out of free text: every character that is not a
/// digit or a decimal point is stripped, and anything that still fails to
/// parse as a finite number is read as `0`. This rule applies to every
/// monetary text input in the system.
pub fn parse_money(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Formats an amount for display as US dollars, e.g. `-$1,234.50`.
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

fn group_thousands(dollars: u64) -> String {
    let digits = dollars.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
