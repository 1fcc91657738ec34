use cba_extractor::{EntityType, ExtractedEntity};

/// Generic value formatting for confirmation messages — spec.md §4.6:
/// numeric values in (0, 1_000_000) render as `$x,xxx.xx`; digit-and-
/// separator strings mask as `...last4`; everything else renders verbatim.
pub fn format_value(value: &serde_json::Value) -> String {
    if let Some(number) = value.as_f64() {
        if number > 0.0 && number < 1_000_000.0 {
            return format_currency(number);
        }
        return number.to_string();
    }
    if let Some(text) = value.as_str() {
        if is_digits_and_separators(text) && text.len() > 4 {
            let last4 = &text[text.len() - 4..];
            return format!("...{last4}");
        }
        return text.to_string();
    }
    value.to_string()
}

fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let dollars = cents / 100;
    let remainder = (cents % 100).abs();
    let whole = dollars.unsigned_abs().to_string();
    let grouped = group_thousands(&whole);
    format!("${grouped}.{remainder:02}")
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::new();
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

fn is_digits_and_separators(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit() || c == '-' || c == ' ')
}

/// Builds the confirmation message from the union of required/optional
/// entities actually present, plus nested context lines from enriched
/// records for fields that appear in those lists — spec.md §4.6 step 2.
pub fn confirmation_lines(entities: &[ExtractedEntity], required: &[String], optional: &[String]) -> Vec<String> {
    let relevant: Vec<&str> = required.iter().chain(optional.iter()).map(String::as_str).collect();
    let mut lines = Vec::new();
    for entity in entities {
        if !relevant.contains(&entity.entity_type.as_str()) {
            continue;
        }
        lines.push(format!("{}: {}", entity.entity_type, format_value(&entity.value)));
        if let Some(record) = &entity.enriched_record {
            if let Some(name) = record.get("name").and_then(|v| v.as_str()) {
                lines.push(format!("  -> {name}"));
            }
        }
    }
    lines
}

pub fn success_message(category: &str, subcategory: &str, name: &str, entities: &[ExtractedEntity]) -> String {
    match (category, subcategory) {
        ("accounts", "balance") => {
            let account = entities.iter().find(|e| matches!(e.entity_type, EntityType::AccountId | EntityType::AccountType | EntityType::FromAccount));
            match account.and_then(|e| e.enriched_record.as_ref()) {
                Some(record) => {
                    let balance = record.get("balance").and_then(|v| v.as_f64()).unwrap_or(0.0);
                    let account_type = record.get("type").and_then(|v| v.as_str()).unwrap_or("account");
                    format!("Your {account_type} balance is {}", format_currency(balance))
                }
                None => "Your account balance is on its way.".to_string(),
            }
        }
        ("payments", _) => {
            let amount = entities.iter().find(|e| e.entity_type == EntityType::Amount).map(|e| format_value(&e.value)).unwrap_or_else(|| "the requested amount".to_string());
            let recipient = entities
                .iter()
                .find(|e| e.entity_type == EntityType::Recipient)
                .and_then(|e| e.value.as_str())
                .unwrap_or("the recipient");
            format!("Transfer of {amount} to {recipient} has been initiated.")
        }
        ("cards", "block") => {
            let card = entities.iter().find(|e| e.entity_type == EntityType::CardId);
            let raw = card.map(|e| e.raw_text.clone()).unwrap_or_default();
            let last4 = if raw.len() >= 4 { &raw[raw.len() - 4..] } else { raw.as_str() };
            format!("Your card ending in {last4} has been temporarily blocked.")
        }
        _ => format!("Your {name} request has been processed."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_currency_with_grouping() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(999.0), "$999.00");
    }

    #[test]
    fn masks_long_digit_strings() {
        let value = serde_json::json!("4111222233334444");
        assert_eq!(format_value(&value), "...4444");
    }

    #[test]
    fn leaves_short_strings_verbatim() {
        let value = serde_json::json!("John");
        assert_eq!(format_value(&value), "John");
    }
}
