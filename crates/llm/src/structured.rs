use serde::de::DeserializeOwned;

/// Extracts JSON from a free-text LLM reply, preferring a fenced ```json
/// block and falling back to the first balanced `{...}` span. Grounded in
/// the teacher's extraction helper — several providers return prose around
/// the JSON payload even when asked for `json_object` mode.
pub fn extract_json_output<T: DeserializeOwned>(text: &str) -> anyhow::Result<T> {
    if let Some(fenced) = extract_fenced_json(text) {
        if let Ok(value) = serde_json::from_str::<T>(&fenced) {
            return Ok(value);
        }
    }

    if let Some(braced) = extract_first_braced(text) {
        return Ok(serde_json::from_str::<T>(&braced)?);
    }

    Err(anyhow::anyhow!("no JSON object found in LLM output"))
}

fn extract_fenced_json(text: &str) -> Option<String> {
    let start_marker = text.find("```json").map(|i| i + "```json".len())?;
    let rest = &text[start_marker..];
    let end = rest.find("```")?;
    Some(rest[..end].trim().to_string())
}

fn extract_first_braced(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0i32;
    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + offset + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Marker type documenting the structured-output contract some providers
/// use in place of native function-calling.
pub struct StructuredOutput;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        intent_id: String,
        confidence: f64,
    }

    #[test]
    fn extracts_fenced_json() {
        let text = "Sure, here you go:\n```json\n{\"intent_id\": \"accounts.balance.check\", \"confidence\": 0.9}\n```\nLet me know if that helps.";
        let parsed: Payload = extract_json_output(text).unwrap();
        assert_eq!(parsed.intent_id, "accounts.balance.check");
    }

    #[test]
    fn extracts_bare_braced_json() {
        let text = "intentId={\"intent_id\": \"payments.p2p.send\", \"confidence\": 0.8} trailing";
        let parsed: Payload = extract_json_output(text).unwrap();
        assert_eq!(parsed.confidence, 0.8);
    }

    #[test]
    fn fails_on_no_json() {
        let result: anyhow::Result<Payload> = extract_json_output("no json here at all");
        assert!(result.is_err());
    }
}
