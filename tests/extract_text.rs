//! Integration tests for the pattern extractor: free text → entities,
//! conditions and actions, before any defaults are applied.

mod helpers;

use rule_compiler::extract::{self, Extraction};
use rule_compiler::model::{ActionKind, Operator};

#[test]
fn inventory_and_orders_example() {
    helpers::init_tracing();
    let found = extract::extract("If inventory is low AND orders are pending, create purchase request");

    let types: Vec<&str> = found.entities.iter().map(|e| e.entity_type.as_str()).collect();
    assert_eq!(types, vec!["inventory", "order"]);

    let low = found
        .conditions
        .iter()
        .find(|c| c.field == "quantity")
        .expect("low inventory condition");
    assert_eq!(low.operator, Operator::LessThan);
    assert_eq!(low.value, "threshold");

    let pending = found
        .conditions
        .iter()
        .find(|c| c.name == "orders are pending")
        .expect("second phrase of the clause");
    assert_eq!(pending.field, "orders");
    assert_eq!(pending.operator, Operator::NotEmpty);

    assert_eq!(found.actions.len(), 1);
    assert_eq!(
        found.actions[0].kind,
        ActionKind::CreateRequest {
            request_type: "purchase request".into()
        }
    );
}

#[test]
fn created_request_serializes_with_request_type() {
    let found = extract::extract("If inventory is low AND orders are pending, create purchase request");
    let action = serde_json::to_value(&found.actions[0]).unwrap();
    assert_eq!(action["type"], "create_request");
    assert_eq!(action["requestType"], "purchase request");
}

#[test]
fn blank_text_extracts_nothing() {
    for text in ["", "   ", "\n\t"] {
        let found = extract::extract(text);
        assert!(found.is_empty(), "expected nothing from {:?}", text);
        assert_eq!(found.source, text);
    }
}

#[test]
fn unrecognised_text_extracts_nothing() {
    let found = extract::extract("hello world");
    assert_eq!(
        found,
        Extraction {
            source: "hello world".into(),
            ..Default::default()
        }
    );
}

#[test]
fn same_date_clause_joins_customer_and_sales() {
    let found = extract::extract(
        "When customer data and sales data have the same date, trigger P&L calculation",
    );
    let types: Vec<&str> = found.entities.iter().map(|e| e.entity_type.as_str()).collect();
    assert_eq!(types, vec!["customer", "sales"]);

    let same_date = found
        .conditions
        .iter()
        .find(|c| c.field == "business_date")
        .expect("same date condition");
    assert_eq!(same_date.value, "${business_date}");

    assert_eq!(
        found.actions[0].kind,
        ActionKind::TriggerJob {
            job_name: "P&L calculation".into()
        }
    );
}

#[test]
fn error_rate_escalation() {
    let found = extract::extract("If system error rate exceeds 5% then escalate to operations team");
    let condition = &found.conditions[0];
    assert_eq!(condition.field, "error_rate");
    assert_eq!(condition.operator, Operator::GreaterThan);
    assert_eq!(condition.value, "5%");
    assert_eq!(
        found.actions[0].kind,
        ActionKind::Escalate {
            target: "operations team".into()
        }
    );
    assert_eq!(found.entities[0].entity_type, "system");
}
