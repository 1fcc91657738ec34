const APPROVE_KEYWORDS: &[&str] = &["yes", "confirm", "approve", "proceed", "ok"];
const CANCEL_KEYWORDS: &[&str] = &["no", "cancel", "stop", "abort"];

/// Simple keyword detection over an approval-response utterance — spec.md
/// §4.9. `None` means the utterance isn't approval-like; the turn falls
/// through to the normal pipeline instead of being consumed here.
pub fn decision(query: &str) -> Option<bool> {
    let lowered = query.to_lowercase();
    if CANCEL_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(false);
    }
    if APPROVE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return Some(true);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_approval_keywords() {
        assert_eq!(decision("yes please"), Some(true));
        assert_eq!(decision("confirm it"), Some(true));
        assert_eq!(decision("ok go ahead"), Some(true));
    }

    #[test]
    fn detects_cancel_keywords() {
        assert_eq!(decision("no, cancel that"), Some(false));
        assert_eq!(decision("abort"), Some(false));
    }

    #[test]
    fn unrelated_utterance_is_not_approval_like() {
        assert_eq!(decision("what's my balance"), None);
    }
}
