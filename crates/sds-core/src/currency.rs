//! Sheet currency evaluation.
//!
//! A Safety Data Sheet counts as current for three years from its issue
//! date. The threshold is a fixed `3 * 365` days; leap-year drift is
//! intentionally ignored.

use chrono::NaiveDate;

/// Maximum accepted sheet age in whole days.
pub const MAX_SHEET_AGE_DAYS: i64 = 3 * 365;

/// Currency of one sheet, judged solely by its recorded date.
///
/// The three states are distinct contracts: a record with no usable date is
/// `Missing`, never silently `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyStatus {
    /// No date on file, or the recorded text is not a valid `YYYY-MM-DD`.
    Missing,
    /// Sheet age is within [`MAX_SHEET_AGE_DAYS`].
    Current,
    /// Sheet is older than [`MAX_SHEET_AGE_DAYS`].
    Expired,
}

/// Evaluate the currency of a sheet dated `sds_date` as of `today`.
///
/// The date text must parse as strict ISO 8601 extended format
/// (`YYYY-MM-DD`); anything else is `Missing`. A future-dated sheet has
/// negative elapsed age and is `Current`.
pub fn currency_status(sds_date: Option<&str>, today: NaiveDate) -> CurrencyStatus {
    let Some(text) = sds_date else {
        return CurrencyStatus::Missing;
    };
    let Ok(date) = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") else {
        return CurrencyStatus::Missing;
    };
    let elapsed_days = today.signed_duration_since(date).num_days();
    if elapsed_days <= MAX_SHEET_AGE_DAYS {
        CurrencyStatus::Current
    } else {
        CurrencyStatus::Expired
    }
}
