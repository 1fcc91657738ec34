/// Entities reach C8 as a flat JSON object, `entityType -> value`, where
/// `value` is either a bare JSON value or a serialized `ExtractedEntity`
/// (which carries the same `value` field, plus `enriched_record` when C3
/// attached one). See `cba-pipeline` for how the map is assembled.
pub fn raw(entities: &serde_json::Value, key: &str) -> Option<serde_json::Value> {
    let v = entities.get(key)?;
    match v {
        serde_json::Value::Object(map) if map.contains_key("value") => map.get("value").cloned(),
        other => Some(other.clone()),
    }
}

pub fn str_value(entities: &serde_json::Value, key: &str) -> Option<String> {
    match raw(entities, key)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn f64_value(entities: &serde_json::Value, key: &str) -> Option<f64> {
    raw(entities, key)?.as_f64()
}

pub fn enriched(entities: &serde_json::Value, key: &str) -> Option<serde_json::Value> {
    let record = entities.get(key)?.get("enriched_record")?;
    if record.is_null() {
        return None;
    }
    Some(record.clone())
}

/// Resolved account/recipient id, preferring the enrichment's own id over
/// the raw entity value (a recipient name, say) when present. Account
/// enrichment attaches `{"id", "name", ...}` directly; recipient
/// enrichment wraps it as `{"status", "record": {"id", ...}}`.
pub fn resolved_id(entities: &serde_json::Value, key: &str) -> Option<String> {
    if let Some(record) = enriched(entities, key) {
        if let Some(id) = record.get("id").and_then(|v| v.as_str()) {
            return Some(id.to_string());
        }
        if let Some(id) = record.get("record").and_then(|r| r.get("id")).and_then(|v| v.as_str()) {
            return Some(id.to_string());
        }
    }
    str_value(entities, key)
}
