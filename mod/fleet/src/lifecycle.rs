//! Contract lifecycle derivation.
//!
//! Status is a pure function of `end_date - reference date` in whole days.
//! Day 0 (expires today) and day 30 both count as Expiring Soon; the window
//! boundary is a product decision pinned by the tests below.

use chrono::NaiveDate;
use medfleet_core::{days_until, today_utc};

use crate::model::ContractStatus;

/// Contracts within this many days of their end date are Expiring Soon.
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

/// Derive a contract's lifecycle status from its end date.
///
/// - `end < today` → Expired
/// - `today <= end <= today + 30d` → Expiring Soon
/// - otherwise → Active
pub fn contract_status(end: NaiveDate, today: NaiveDate) -> ContractStatus {
    let days = days_until(end, today);
    if days < 0 {
        ContractStatus::Expired
    } else if days <= EXPIRING_WINDOW_DAYS {
        ContractStatus::ExpiringSoon
    } else {
        ContractStatus::Active
    }
}

/// [`contract_status`] against the current UTC date.
pub fn current_contract_status(end: NaiveDate) -> ContractStatus {
    contract_status(end, today_utc())
}
