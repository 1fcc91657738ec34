use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, Utc};
use regex::Regex;

use crate::types::{EntitySource, EntityType, ExtractedEntity};

static AMOUNT_DOLLAR_SIGN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\s?([0-9][0-9,]*(?:\.[0-9]{1,2})?)").unwrap());
static AMOUNT_WORD_FORM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b([0-9][0-9,]*(?:\.[0-9]{1,2})?)\s*(?:dollars|bucks|usd)\b").unwrap());
static DATE_ISO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());
static DATE_US: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap());
static DATE_RELATIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(today|tomorrow|yesterday)\b").unwrap());
static ROUTING_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{9})\b").unwrap());
static PHONE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})\b").unwrap());
static EMAIL_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").unwrap());
static ACCOUNT_ID_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b([A-Z]{3}\d{3,})\b").unwrap());

const PATTERN_CONFIDENCE: f64 = 0.85;

/// Fixed table of compiled regexes per entity type — spec.md §4.2's
/// "pattern phase". High confidence, no LLM involved.
pub fn extract(utterance: &str) -> Vec<ExtractedEntity> {
    let mut out = Vec::new();

    if let Some(entity) = extract_amount(utterance) {
        out.push(entity);
    }
    if let Some(entity) = extract_date(utterance) {
        out.push(entity);
    }
    if let Some(entity) = extract_routing_number(utterance) {
        out.push(entity);
    }
    if let Some(entity) = extract_phone(utterance) {
        out.push(entity);
    }
    if let Some(entity) = extract_email(utterance) {
        out.push(entity);
    }
    if let Some(entity) = extract_account_id(utterance) {
        out.push(entity);
    }

    out
}

fn parse_amount_digits(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}

fn extract_amount(utterance: &str) -> Option<ExtractedEntity> {
    if let Some(caps) = AMOUNT_DOLLAR_SIGN.captures(utterance) {
        let raw = caps.get(0).unwrap().as_str().to_string();
        let value = parse_amount_digits(&caps[1])?;
        return Some(ExtractedEntity::new(EntityType::Amount, serde_json::json!(value), raw, PATTERN_CONFIDENCE, EntitySource::Pattern));
    }
    if let Some(caps) = AMOUNT_WORD_FORM.captures(utterance) {
        let raw = caps.get(0).unwrap().as_str().to_string();
        let value = parse_amount_digits(&caps[1])?;
        return Some(ExtractedEntity::new(EntityType::Amount, serde_json::json!(value), raw, PATTERN_CONFIDENCE, EntitySource::Pattern));
    }
    None
}

fn extract_date(utterance: &str) -> Option<ExtractedEntity> {
    if let Some(caps) = DATE_ISO.captures(utterance) {
        let raw = caps.get(0).unwrap().as_str().to_string();
        return Some(ExtractedEntity::new(EntityType::Date, serde_json::json!(raw.clone()), raw, PATTERN_CONFIDENCE, EntitySource::Pattern));
    }
    if let Some(caps) = DATE_US.captures(utterance) {
        let raw = caps.get(0).unwrap().as_str().to_string();
        let (month, day, year) = (caps[1].parse::<u32>().ok()?, caps[2].parse::<u32>().ok()?, caps[3].parse::<i32>().ok()?);
        let iso = NaiveDate::from_ymd_opt(year, month, day)?.format("%Y-%m-%d").to_string();
        return Some(ExtractedEntity::new(EntityType::Date, serde_json::json!(iso), raw, PATTERN_CONFIDENCE, EntitySource::Pattern));
    }
    if let Some(caps) = DATE_RELATIVE.captures(utterance) {
        let raw = caps.get(0).unwrap().as_str().to_string();
        let today = Utc::now().date_naive();
        let resolved = match raw.to_lowercase().as_str() {
            "today" => today,
            "tomorrow" => today + Duration::days(1),
            "yesterday" => today - Duration::days(1),
            _ => return None,
        };
        let iso = resolved.format("%Y-%m-%d").to_string();
        return Some(ExtractedEntity::new(EntityType::Date, serde_json::json!(iso), raw, PATTERN_CONFIDENCE, EntitySource::Pattern));
    }
    None
}

/// ABA routing-number checksum: `(3(d0+d3+d6)+7(d1+d4+d7)+(d2+d5+d8)) mod 10 == 0`.
pub fn aba_checksum_valid(digits: &[u32; 9]) -> bool {
    let d = digits;
    let sum = 3 * (d[0] + d[3] + d[6]) + 7 * (d[1] + d[4] + d[7]) + (d[2] + d[5] + d[8]);
    sum % 10 == 0
}

fn extract_routing_number(utterance: &str) -> Option<ExtractedEntity> {
    for caps in ROUTING_CANDIDATE.captures_iter(utterance) {
        let raw = caps.get(1).unwrap().as_str();
        let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != 9 {
            continue;
        }
        let arr: [u32; 9] = digits.try_into().ok()?;
        if aba_checksum_valid(&arr) {
            return Some(ExtractedEntity::new(EntityType::RoutingNumber, serde_json::json!(raw), raw, PATTERN_CONFIDENCE, EntitySource::Pattern));
        }
    }
    None
}

fn extract_phone(utterance: &str) -> Option<ExtractedEntity> {
    let caps = PHONE_CANDIDATE.captures(utterance)?;
    let raw = caps.get(0).unwrap().as_str().to_string();
    let normalized = format!("({}) {}-{}", &caps[1], &caps[2], &caps[3]);
    Some(ExtractedEntity::new(EntityType::Phone, serde_json::json!(normalized), raw, PATTERN_CONFIDENCE, EntitySource::Pattern))
}

fn extract_email(utterance: &str) -> Option<ExtractedEntity> {
    let caps = EMAIL_CANDIDATE.find(utterance)?;
    let raw = caps.as_str().to_string();
    Some(ExtractedEntity::new(EntityType::Email, serde_json::json!(raw.to_lowercase()), raw, PATTERN_CONFIDENCE, EntitySource::Pattern))
}

fn extract_account_id(utterance: &str) -> Option<ExtractedEntity> {
    let caps = ACCOUNT_ID_CANDIDATE.captures(utterance)?;
    let raw = caps.get(1).unwrap().as_str().to_string();
    Some(ExtractedEntity::new(EntityType::AccountId, serde_json::json!(raw.clone()), raw, PATTERN_CONFIDENCE, EntitySource::Pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_dollar_amount_with_grouping() {
        let entities = extract("please send $1,250.50 to John");
        let amount = entities.iter().find(|e| e.entity_type == EntityType::Amount).unwrap();
        assert_eq!(amount.value, serde_json::json!(1250.50));
    }

    #[test]
    fn extracts_word_form_amount() {
        let entities = extract("transfer 500 dollars to savings");
        let amount = entities.iter().find(|e| e.entity_type == EntityType::Amount).unwrap();
        assert_eq!(amount.value, serde_json::json!(500.0));
    }

    #[test]
    fn extracts_relative_date() {
        let entities = extract("schedule it for tomorrow");
        assert!(entities.iter().any(|e| e.entity_type == EntityType::Date));
    }

    #[test]
    fn rejects_routing_number_with_bad_checksum() {
        let entities = extract("my routing number is 123456789");
        assert!(!entities.iter().any(|e| e.entity_type == EntityType::RoutingNumber));
    }

    #[test]
    fn accepts_routing_number_with_valid_checksum() {
        // 021000021 is a well-known, checksum-valid ABA routing number.
        let entities = extract("route it through 021000021 please");
        assert!(entities.iter().any(|e| e.entity_type == EntityType::RoutingNumber));
    }

    #[test]
    fn normalizes_phone_number() {
        let entities = extract("call me at 555-123-4567");
        let phone = entities.iter().find(|e| e.entity_type == EntityType::Phone).unwrap();
        assert_eq!(phone.value, serde_json::json!("(555) 123-4567"));
    }
}
