//! Rule documents: the output of the text pipeline and the shared schema of the
//! graph compiler.
//!
//! Field names are the JSON contract consumed by the persistence API and the
//! render surface, so the serde attributes here are load-bearing.

use serde::{Deserialize, Serialize};

// =============================================================================
// OPERATORS
// =============================================================================

/// Comparison operator of a condition or join predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    #[default]
    #[serde(alias = "=")]
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
    StartsWith,
    EndsWith,
    IsReady,
    NotEmpty,
    IsEmpty,
    IsNotEmpty,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::Contains => "contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::IsReady => "is_ready",
            Operator::NotEmpty => "not_empty",
            Operator::IsEmpty => "is_empty",
            Operator::IsNotEmpty => "is_not_empty",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ENTITIES
// =============================================================================

/// A typed reference to a data source with a set of selectable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub selected_attributes: Vec<String>,
}

// =============================================================================
// CONDITIONS
// =============================================================================

/// A predicate over one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The phrase the condition was read from.
    #[serde(default)]
    pub name: String,
    pub field: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
}

impl Condition {
    pub fn new(
        name: impl Into<String>,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Binds two entities on matching fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCondition {
    pub left_entity: String,
    pub left_attribute: String,
    #[serde(default)]
    pub operator: Operator,
    pub right_entity: String,
    pub right_attribute: String,
}

impl JoinCondition {
    /// Join two entity types on the same attribute with `equals`.
    pub fn on(left: &str, right: &str, attribute: &str) -> Self {
        Self {
            left_entity: left.into(),
            left_attribute: attribute.into(),
            operator: Operator::Equals,
            right_entity: right.into(),
            right_attribute: attribute.into(),
        }
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

/// An effect triggered when the rule's conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: ActionKind,
}

/// The `type` tag of an action together with its type-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    TriggerJob {
        #[serde(rename = "jobName")]
        job_name: String,
    },
    CreateRequest {
        #[serde(rename = "requestType")]
        request_type: String,
    },
    SendNotification {
        #[serde(rename = "notificationType")]
        notification_type: String,
    },
    Escalate {
        target: String,
    },
    Notification,
}

impl ActionKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ActionKind::TriggerJob { .. } => "trigger_job",
            ActionKind::CreateRequest { .. } => "create_request",
            ActionKind::SendNotification { .. } => "send_notification",
            ActionKind::Escalate { .. } => "escalate",
            ActionKind::Notification => "notification",
        }
    }
}

// =============================================================================
// RULE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    #[default]
    And,
    Or,
}

/// The compiled unit of entities, conditions, join conditions and actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub entities: Vec<Entity>,
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub join_conditions: Vec<JoinCondition>,
    pub actions: Vec<Action>,
    #[serde(default)]
    pub logic: Logic,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_payload_is_flattened_next_to_type() {
        let action = Action {
            name: "Trigger P&L".into(),
            description: "trigger P&L".into(),
            kind: ActionKind::TriggerJob {
                job_name: "P&L".into(),
            },
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Trigger P&L",
                "description": "trigger P&L",
                "type": "trigger_job",
                "jobName": "P&L"
            })
        );
    }

    #[test]
    fn plain_notification_has_no_payload() {
        let action: Action = serde_json::from_value(json!({
            "type": "notification",
            "description": "Process completed"
        }))
        .unwrap();
        assert_eq!(action.kind, ActionKind::Notification);
        assert_eq!(action.name, "");
    }

    #[test]
    fn join_operator_accepts_symbol_alias() {
        let join: JoinCondition = serde_json::from_value(json!({
            "leftEntity": "customer",
            "leftAttribute": "business_date",
            "operator": "=",
            "rightEntity": "sales",
            "rightAttribute": "business_date"
        }))
        .unwrap();
        assert_eq!(join.operator, Operator::Equals);
        assert_eq!(serde_json::to_value(join.operator).unwrap(), json!("equals"));
    }

    #[test]
    fn logic_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Logic::Or).unwrap(), json!("OR"));
    }
}
