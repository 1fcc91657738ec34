use chrono::{Duration, NaiveDate, Utc};

use crate::types::{EntityType, ExtractedEntity};

const MAX_FUTURE_DAYS: i64 = 365;
const MAX_PAST_YEARS: i64 = 5;
const AMOUNT_WARN_THRESHOLD: f64 = 10_000.0;

const ACCOUNT_TYPES: &[&str] = &["checking", "savings", "credit", "investment", "loan", "business"];

/// Per-type validation rule from spec.md §4.2, folding in the legacy
/// bounds-checking the entity extractor absorbed (amount range, date
/// horizon) as non-fatal warnings rather than a separate validator.
pub fn validate(entity: &mut ExtractedEntity, warnings: &mut Vec<String>) -> Result<(), String> {
    match entity.entity_type {
        EntityType::Amount => validate_amount(entity, warnings),
        EntityType::AccountType => validate_account_type(entity),
        EntityType::Email => validate_email(entity),
        EntityType::Date => validate_date(entity, warnings),
        EntityType::RoutingNumber => Ok(()),
        _ => Ok(()),
    }
}

fn validate_amount(entity: &mut ExtractedEntity, warnings: &mut Vec<String>) -> Result<(), String> {
    let raw = entity.value.as_f64().ok_or_else(|| "amount must be numeric".to_string())?;
    if !(0.01..=1_000_000.0).contains(&raw) {
        return Err(format!("amount {raw} is outside the allowed range (0.01, 1000000)"));
    }
    let rounded = (raw * 100.0).round() / 100.0;
    entity.value = serde_json::json!(rounded);
    if rounded > AMOUNT_WARN_THRESHOLD {
        warnings.push(format!("amount {rounded} exceeds the typical transfer size — double check before confirming"));
    }
    Ok(())
}

fn validate_account_type(entity: &mut ExtractedEntity) -> Result<(), String> {
    let raw = entity.value.as_str().ok_or_else(|| "account_type must be a string".to_string())?;
    let lowered = raw.to_lowercase();
    if !ACCOUNT_TYPES.contains(&lowered.as_str()) {
        return Err(format!("'{raw}' is not a recognized account type"));
    }
    entity.value = serde_json::json!(lowered);
    Ok(())
}

fn validate_email(entity: &mut ExtractedEntity) -> Result<(), String> {
    let raw = entity.value.as_str().ok_or_else(|| "email must be a string".to_string())?;
    if !raw.contains('@') || !raw.contains('.') {
        return Err(format!("'{raw}' is not a valid email address"));
    }
    entity.value = serde_json::json!(raw.to_lowercase());
    Ok(())
}

fn validate_date(entity: &mut ExtractedEntity, warnings: &mut Vec<String>) -> Result<(), String> {
    let raw = entity.value.as_str().ok_or_else(|| "date must be an ISO string".to_string())?;
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| format!("'{raw}' is not an ISO date"))?;
    let today = Utc::now().date_naive();
    if parsed > today + Duration::days(MAX_FUTURE_DAYS) {
        warnings.push(format!("date {raw} is more than {MAX_FUTURE_DAYS} days in the future"));
    }
    if parsed < today - Duration::days(MAX_PAST_YEARS * 365) {
        warnings.push(format!("date {raw} is more than {MAX_PAST_YEARS} years in the past"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntitySource;

    fn entity(entity_type: EntityType, value: serde_json::Value) -> ExtractedEntity {
        ExtractedEntity::new(entity_type, value, "raw", 0.9, EntitySource::Pattern)
    }

    #[test]
    fn amount_out_of_range_is_rejected() {
        let mut e = entity(EntityType::Amount, serde_json::json!(2_000_000.0));
        let mut warnings = Vec::new();
        assert!(validate(&mut e, &mut warnings).is_err());
    }

    #[test]
    fn large_amount_warns_but_passes() {
        let mut e = entity(EntityType::Amount, serde_json::json!(15_000.0));
        let mut warnings = Vec::new();
        assert!(validate(&mut e, &mut warnings).is_ok());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn account_type_is_normalized_lowercase() {
        let mut e = entity(EntityType::AccountType, serde_json::json!("Checking"));
        let mut warnings = Vec::new();
        validate(&mut e, &mut warnings).unwrap();
        assert_eq!(e.value, serde_json::json!("checking"));
    }

    #[test]
    fn unknown_account_type_is_rejected() {
        let mut e = entity(EntityType::AccountType, serde_json::json!("offshore"));
        let mut warnings = Vec::new();
        assert!(validate(&mut e, &mut warnings).is_err());
    }
}
