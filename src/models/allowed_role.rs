//! Allowed (subsidiary, role) assignments and their hourly rates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A permitted (employee, subsidiary, role) triple with its hourly rate.
///
/// An employee may hold several of these; the same rate can appear on
/// more than one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedRole {
    /// The employee this assignment belongs to.
    pub employee_id: String,
    /// The subsidiary company the work is done for.
    pub subsidiary: String,
    /// The role performed.
    pub role: String,
    /// The hourly rate paid for this subsidiary/role.
    pub hourly_rate: Decimal,
}

impl AllowedRole {
    /// Returns true if this row covers the given subsidiary and role.
    pub fn matches(&self, subsidiary: &str, role: &str) -> bool {
        self.subsidiary == subsidiary && self.role == role
    }
}
