use chrono::NaiveTime;

use crate::types::{PreconditionResult, PreconditionStatus, UserProfile};

const DEFAULT_DAILY_LIMIT: f64 = 10_000.0;
const FRAUD_REVIEW_THRESHOLD: f64 = 2500.0;

fn business_hours() -> (NaiveTime, NaiveTime) {
    (NaiveTime::from_hms_opt(8, 0, 0).unwrap(), NaiveTime::from_hms_opt(20, 0, 0).unwrap())
}

/// Sync, pure precondition evaluator — spec.md §4.6. `now` is passed in
/// rather than read from the clock so the evaluator has no I/O.
pub fn evaluate(names: &[String], amount: Option<f64>, daily_limit: Option<u32>, user_profile: Option<&UserProfile>, now: NaiveTime) -> Vec<PreconditionResult> {
    names.iter().map(|name| evaluate_one(name, amount, daily_limit, user_profile, now)).collect()
}

fn evaluate_one(name: &str, amount: Option<f64>, daily_limit: Option<u32>, user_profile: Option<&UserProfile>, now: NaiveTime) -> PreconditionResult {
    match name {
        "balance_check" => balance_check(amount, user_profile),
        "limit_check" => limit_check(amount, daily_limit),
        "fraud_check" => fraud_check(amount),
        "hours_check" => hours_check(now),
        other => PreconditionResult {
            name: other.to_string(),
            status: PreconditionStatus::NotApplicable,
            message: None,
            action_required: None,
        },
    }
}

fn balance_check(amount: Option<f64>, user_profile: Option<&UserProfile>) -> PreconditionResult {
    let (amount, balance) = match (amount, user_profile) {
        (Some(amount), Some(profile)) => (amount, profile.available_balance),
        _ => return not_applicable("balance_check"),
    };
    if amount <= balance {
        passed("balance_check")
    } else {
        PreconditionResult {
            name: "balance_check".to_string(),
            status: PreconditionStatus::Failed,
            message: Some(format!("Insufficient funds: available balance is ${balance:.2}")),
            action_required: Some("Reduce the amount or choose a different funding account".to_string()),
        }
    }
}

fn limit_check(amount: Option<f64>, daily_limit: Option<u32>) -> PreconditionResult {
    let Some(amount) = amount else { return not_applicable("limit_check") };
    let limit = daily_limit.map(f64::from).unwrap_or(DEFAULT_DAILY_LIMIT);
    if amount <= limit {
        passed("limit_check")
    } else {
        PreconditionResult {
            name: "limit_check".to_string(),
            status: PreconditionStatus::Failed,
            message: Some(format!("Amount ${amount:.2} exceeds the daily limit of ${limit:.2}")),
            action_required: Some("Split the transaction or request a limit increase".to_string()),
        }
    }
}

fn fraud_check(amount: Option<f64>) -> PreconditionResult {
    let Some(amount) = amount else { return not_applicable("fraud_check") };
    if amount <= FRAUD_REVIEW_THRESHOLD {
        passed("fraud_check")
    } else {
        PreconditionResult {
            name: "fraud_check".to_string(),
            status: PreconditionStatus::Pending,
            message: Some("This transaction requires additional verification".to_string()),
            action_required: Some("Complete identity verification".to_string()),
        }
    }
}

fn hours_check(now: NaiveTime) -> PreconditionResult {
    let (open, close) = business_hours();
    if now >= open && now <= close {
        passed("hours_check")
    } else {
        PreconditionResult {
            name: "hours_check".to_string(),
            status: PreconditionStatus::Failed,
            message: Some("This action is only available between 08:00 and 20:00".to_string()),
            action_required: Some("Try again during business hours".to_string()),
        }
    }
}

fn passed(name: &str) -> PreconditionResult {
    PreconditionResult { name: name.to_string(), status: PreconditionStatus::Passed, message: None, action_required: None }
}

fn not_applicable(name: &str) -> PreconditionResult {
    PreconditionResult { name: name.to_string(), status: PreconditionStatus::NotApplicable, message: None, action_required: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserProfile;
    use cba_catalog::AuthLevel;

    #[test]
    fn balance_check_fails_when_amount_exceeds_available() {
        let profile = UserProfile { user_id: "u1".to_string(), auth_level: AuthLevel::Full, available_balance: 100.0 };
        let result = balance_check(Some(200.0), Some(&profile));
        assert_eq!(result.status, PreconditionStatus::Failed);
    }

    #[test]
    fn fraud_check_is_pending_above_threshold() {
        let result = fraud_check(Some(5000.0));
        assert_eq!(result.status, PreconditionStatus::Pending);
    }

    #[test]
    fn hours_check_fails_outside_business_hours() {
        let result = hours_check(NaiveTime::from_hms_opt(23, 0, 0).unwrap());
        assert_eq!(result.status, PreconditionStatus::Failed);
    }

    #[test]
    fn limit_check_uses_default_when_no_daily_limit() {
        let result = limit_check(Some(15_000.0), None);
        assert_eq!(result.status, PreconditionStatus::Failed);
    }
}
