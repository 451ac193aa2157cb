//! Entity catalog: default attribute lists per entity type and the palette of
//! draggable entities offered by the editor.

use serde::{Deserialize, Serialize};

/// Attribute names an entity of `entity_type` exposes when none are given.
pub fn default_attributes(entity_type: &str) -> Vec<String> {
    let names: &[&str] = match entity_type {
        "customer" => &["customer_id", "name", "email", "status", "business_date"],
        "sales" => &["order_id", "customer_id", "amount", "status", "business_date"],
        "inventory" => &["product_id", "quantity", "threshold", "status"],
        "order" => &["order_id", "customer_id", "amount", "status"],
        "payment" => &["payment_id", "customer_id", "amount", "status"],
        "support" => &["ticket_id", "customer_id", "priority", "status"],
        "system" => &["metric_name", "value", "timestamp", "threshold"],
        "input" => &["data", "timestamp", "source"],
        _ => &["id", "data"],
    };
    names.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeCategory {
    /// Carried on the triggering event.
    Event,
    /// Shared context used for correlation.
    Context,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub category: AttributeCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntity {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub icon: String,
    pub dataset: String,
    pub attributes: Vec<PaletteAttribute>,
}

impl PaletteEntity {
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.name.clone()).collect()
    }
}

type AttributeRow = (&'static str, &'static str, AttributeCategory);

fn palette_entity(entity_type: &str, name: &str, icon: &str, rows: &[AttributeRow]) -> PaletteEntity {
    PaletteEntity {
        id: format!("{}_entity", entity_type),
        name: name.to_string(),
        entity_type: entity_type.to_string(),
        icon: icon.to_string(),
        dataset: format!("{}_data", entity_type),
        attributes: rows
            .iter()
            .map(|&(name, value_type, category)| PaletteAttribute {
                name: name.to_string(),
                value_type: value_type.to_string(),
                category,
            })
            .collect(),
    }
}

/// The draggable entity palette, in display order.
pub fn palette() -> Vec<PaletteEntity> {
    use AttributeCategory::{Context, Event};

    vec![
        palette_entity(
            "customer",
            "Customer Entity",
            "👥",
            &[
                ("customerId", "string", Event),
                ("status", "string", Event),
                ("balance", "number", Event),
                ("businessDate", "date", Context),
                ("region", "string", Context),
                ("customerType", "string", Context),
            ],
        ),
        palette_entity(
            "sales",
            "Sales Entity",
            "💰",
            &[
                ("orderId", "string", Event),
                ("customerId", "string", Event),
                ("amount", "number", Event),
                ("businessDate", "date", Context),
                ("region", "string", Context),
                ("salesChannel", "string", Context),
            ],
        ),
        palette_entity(
            "inventory",
            "Inventory Entity",
            "📦",
            &[
                ("productId", "string", Event),
                ("quantity", "number", Event),
                ("threshold", "number", Event),
                ("businessDate", "date", Context),
                ("warehouse", "string", Context),
                ("productCategory", "string", Context),
            ],
        ),
        palette_entity(
            "system",
            "System Entity",
            "⚙️",
            &[
                ("errorRate", "number", Event),
                ("responseTime", "number", Event),
                ("cpuUsage", "number", Event),
                ("timestamp", "datetime", Context),
                ("environment", "string", Context),
                ("service", "string", Context),
            ],
        ),
    ]
}
