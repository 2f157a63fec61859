//! Hourly rate selection.
//!
//! Each (subsidiary, role) pair worked during the day is looked up in the
//! employee's allowed roles. The day is paid at the highest rate found (the
//! max-rate rule), not at a per-shift weighted rate. A pair with no
//! configured rate still counts towards hours but takes no part in the
//! selection.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{AllowedRole, AuditStep};

use super::daily_aggregation::MeasuredShift;

/// The result of selecting the day's hourly rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSelection {
    /// Rate per distinct (subsidiary, role) pair worked that has one.
    pub rates_used: BTreeMap<(String, String), Decimal>,
    /// The highest rate among `rates_used`, or zero when it is empty.
    pub max_rate: Decimal,
    /// The audit step recording the selection.
    pub audit_step: AuditStep,
}

/// Looks up the configured rate of an employee for a subsidiary and role.
///
/// When several rows share the pair, the first one wins.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::lookup_rate;
/// use payroll_engine::models::AllowedRole;
/// use rust_decimal::Decimal;
///
/// let roles = vec![AllowedRole {
///     employee_id: "E001".to_string(),
///     subsidiary: "Alpha Logistics".to_string(),
///     role: "Driver".to_string(),
///     hourly_rate: Decimal::new(5200, 2),
/// }];
///
/// assert_eq!(lookup_rate(&roles, "E001", "Alpha Logistics", "Driver"), Some(Decimal::new(5200, 2)));
/// assert_eq!(lookup_rate(&roles, "E001", "Alpha Logistics", "Loader"), None);
/// assert_eq!(lookup_rate(&roles, "E002", "Alpha Logistics", "Driver"), None);
/// ```
pub fn lookup_rate(
    allowed_roles: &[AllowedRole],
    employee_id: &str,
    subsidiary: &str,
    role: &str,
) -> Option<Decimal> {
    allowed_roles
        .iter()
        .find(|r| r.employee_id == employee_id && r.matches(subsidiary, role))
        .map(|r| r.hourly_rate)
}

/// Selects the maximum configured rate among the pairs worked that day.
///
/// # Arguments
///
/// * `employee_id` - The employee whose allowed roles apply
/// * `shifts` - The day's measured shifts
/// * `allowed_roles` - Allowed roles; rows of other employees are ignored
/// * `step_number` - The step number for audit trail sequencing
pub fn select_max_rate(
    employee_id: &str,
    shifts: &[MeasuredShift],
    allowed_roles: &[AllowedRole],
    step_number: u32,
) -> RateSelection {
    let mut rates_used = BTreeMap::new();
    let mut unrated = Vec::new();

    for shift in shifts {
        let key = (shift.subsidiary.clone(), shift.role.clone());
        if rates_used.contains_key(&key) {
            continue;
        }
        match lookup_rate(allowed_roles, employee_id, &shift.subsidiary, &shift.role) {
            Some(rate) => {
                rates_used.insert(key, rate);
            }
            None => unrated.push(format!("{} / {}", shift.subsidiary, shift.role)),
        }
    }
    unrated.sort();
    unrated.dedup();

    let max_rate = rates_used
        .values()
        .copied()
        .max()
        .unwrap_or(Decimal::ZERO);

    let reasoning = if rates_used.is_empty() {
        "No worked subsidiary/role pair has a configured rate, max rate is 0".to_string()
    } else {
        format!(
            "Highest of {} configured rate(s) applies to the whole day: ${}",
            rates_used.len(),
            max_rate
        )
    };

    let pairs: Vec<serde_json::Value> = rates_used
        .iter()
        .map(|((subsidiary, role), rate)| {
            serde_json::json!({
                "subsidiary": subsidiary,
                "role": role,
                "hourly_rate": rate.to_string()
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "max_rate_selection".to_string(),
        rule_name: "Max Rate Selection".to_string(),
        input: serde_json::json!({
            "rated_pairs": pairs,
            "unrated_pairs": unrated
        }),
        output: serde_json::json!({
            "max_rate": max_rate.to_string()
        }),
        reasoning,
    };

    RateSelection {
        rates_used,
        max_rate,
        audit_step,
    }
}
