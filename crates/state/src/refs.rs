use std::sync::LazyLock;

use regex::Regex;

static RECIPIENT_PRONOUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(him|her|them|same person|that person)\b").unwrap());
static AMOUNT_ANAPHORA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(same amount|that much|same|it|that)\b").unwrap());
static ACCOUNT_ANAPHORA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(there|same account|that account)\b").unwrap());
static ANOTHER_AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\banother\s+(\$\d+(?:\.\d+)?)\b").unwrap());

/// Regex-based substitution applied in this fixed order, only when the
/// relevant slot is populated — spec.md §4.7. Recipient pronouns run
/// first so a bare "same" left over by "same person" is already
/// consumed before the amount pass sees it.
pub fn resolve_references(utterance: &str, last_recipient: Option<&str>, last_amount: Option<f64>, last_account: Option<&str>) -> String {
    let mut resolved = utterance.to_string();

    if let Some(recipient) = last_recipient {
        resolved = RECIPIENT_PRONOUN.replace_all(&resolved, regex::NoExpand(recipient)).to_string();
    }

    if let Some(amount) = last_amount {
        let replacement = format!("${amount}");
        resolved = AMOUNT_ANAPHORA.replace_all(&resolved, regex::NoExpand(&replacement)).to_string();
    }

    if let Some(account) = last_account {
        resolved = ACCOUNT_ANAPHORA.replace_all(&resolved, regex::NoExpand(account)).to_string();
    }

    resolved = ANOTHER_AMOUNT.replace_all(&resolved, "$1").to_string();

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_recipient_pronoun() {
        let resolved = resolve_references("send $50 to him", Some("John Smith"), None, None);
        assert_eq!(resolved, "send $50 to John Smith");
    }

    #[test]
    fn substitutes_amount_anaphora_without_touching_consumed_recipient_text() {
        let resolved = resolve_references("send that much to same person", Some("John Smith"), Some(200.0), None);
        assert_eq!(resolved, "send $200 to John Smith");
    }

    #[test]
    fn substitutes_account_anaphora() {
        let resolved = resolve_references("move it there", None, None, Some("Primary Checking"));
        assert_eq!(resolved, "move it Primary Checking");
    }

    #[test]
    fn strips_another_before_a_literal_amount() {
        let resolved = resolve_references("send another $50", None, None, None);
        assert_eq!(resolved, "send $50");
    }

    #[test]
    fn leaves_utterance_untouched_when_slots_are_empty() {
        let resolved = resolve_references("send it to him", None, None, None);
        assert_eq!(resolved, "send it to him");
    }
}
