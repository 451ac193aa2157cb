use super::patterns::ENTITIES;
use crate::model::Entity;
use crate::normalize::catalog::default_attributes;

/// One entity per matching table row, in table order.
pub fn extract_entities(text: &str) -> Vec<Entity> {
    let mut entities: Vec<Entity> = Vec::new();

    for row in ENTITIES.iter() {
        if !row.regex.is_match(text) {
            continue;
        }
        if entities.iter().any(|e| e.entity_type == row.entity_type) {
            continue;
        }
        let attributes = default_attributes(row.entity_type);
        entities.push(Entity {
            entity_type: row.entity_type.to_string(),
            name: row.name.to_string(),
            icon: row.icon.to_string(),
            selected_attributes: attributes.clone(),
            attributes,
        });
    }

    entities
}
