use cba_extractor::ExtractedEntity;

/// `Vec<ExtractedEntity>` -> the flat `entityType -> value` map
/// `cba-operations` consumes, reusing `ExtractedEntity`'s own `Serialize`
/// output rather than a bespoke wrapper shape.
pub fn to_map(entities: &[ExtractedEntity]) -> serde_json::Value {
    let mut map = serde_json::Map::with_capacity(entities.len());
    for entity in entities {
        if let Ok(value) = serde_json::to_value(entity) {
            map.insert(entity.entity_type.as_str().to_string(), value);
        }
    }
    serde_json::Value::Object(map)
}

/// Inverse of `to_map` — rehydrates a session's stashed clarification
/// entities back into `ExtractedEntity`s.
pub fn from_map(map: &serde_json::Value) -> Vec<ExtractedEntity> {
    let Some(obj) = map.as_object() else { return Vec::new() };
    obj.values().filter_map(|v| serde_json::from_value(v.clone()).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cba_extractor::{EntitySource, EntityType};

    #[test]
    fn round_trips_through_the_flat_map() {
        let entities = vec![ExtractedEntity::new(EntityType::Amount, serde_json::json!(50.0), "$50", 0.9, EntitySource::Pattern)];
        let map = to_map(&entities);
        assert_eq!(map["amount"]["value"], 50.0);

        let back = from_map(&map);
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].entity_type, EntityType::Amount);
    }

    #[test]
    fn non_object_input_yields_no_entities() {
        assert!(from_map(&serde_json::json!(null)).is_empty());
    }
}
