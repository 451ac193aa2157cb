//! Integration tests for rule normalisation: defaults, joins and logic.

mod helpers;

use proptest::prelude::*;

use rule_compiler::extract::Extraction;
use rule_compiler::model::{ActionKind, Entity, JoinCondition, Logic, Operator};
use rule_compiler::normalize::{
    self, JoinPolicy, NormalizeOptions, catalog, default_action, default_condition, default_entity,
};

const ENTITY_TYPES: [&str; 7] = [
    "customer", "sales", "inventory", "order", "payment", "support", "system",
];

fn entity(entity_type: &str) -> Entity {
    let attributes = catalog::default_attributes(entity_type);
    Entity {
        entity_type: entity_type.into(),
        name: entity_type.into(),
        icon: String::new(),
        selected_attributes: attributes.clone(),
        attributes,
    }
}

#[test]
fn purchase_request_rule() {
    helpers::init_tracing();
    let rule = normalize::parse_rule("If inventory is low AND orders are pending, create purchase request");

    assert_eq!(rule.logic, Logic::And);
    assert_eq!(rule.entities[0].entity_type, "inventory");
    assert_eq!(rule.entities[1].entity_type, "order");
    assert_eq!(rule.join_conditions, vec![JoinCondition::on("inventory", "order", "business_date")]);
    assert!(
        rule.conditions
            .iter()
            .any(|c| c.field == "quantity" && c.operator == Operator::LessThan && c.value == "threshold")
    );
    assert!(rule.actions.iter().any(|a| a.kind
        == ActionKind::CreateRequest {
            request_type: "purchase request".into()
        }));
}

#[test]
fn hello_world_normalizes_to_documented_defaults() {
    let rule = normalize::parse_rule("hello world");
    let json = serde_json::to_value(&rule).unwrap();

    assert_eq!(json["logic"], "AND");
    assert_eq!(json["entities"][0]["type"], "input");
    assert_eq!(json["entities"][0]["name"], "Input Data");
    assert_eq!(json["entities"][0]["selectedAttributes"][0], "data");
    assert_eq!(json["conditions"][0]["field"], "data");
    assert_eq!(json["conditions"][0]["operator"], "not_empty");
    assert_eq!(json["actions"][0]["type"], "notification");
    assert_eq!(json["actions"][0]["description"], "Process completed");
    assert_eq!(json["joinConditions"].as_array().unwrap().len(), 0);
}

#[test]
fn or_logic_is_detected() {
    let rule = normalize::parse_rule("If payment issue or error rate rises, escalate to ops");
    assert_eq!(rule.logic, Logic::Or);
}

#[test]
fn adjacent_pairs_policy() {
    let extraction = Extraction {
        source: "customer, sales and system".into(),
        entities: vec![entity("customer"), entity("sales"), entity("system")],
        ..Default::default()
    };
    let options = NormalizeOptions {
        join_policy: JoinPolicy::AdjacentPairs,
    };
    let rule = normalize::normalize_with(extraction, &options);
    assert_eq!(
        rule.join_conditions,
        vec![
            JoinCondition::on("customer", "sales", "business_date"),
            JoinCondition::on("sales", "system", "business_date"),
        ]
    );
}

#[test]
fn palette_serializes_for_the_editor() {
    let palette = serde_json::to_value(catalog::palette()).unwrap();
    assert_eq!(palette[0]["id"], "customer_entity");
    assert_eq!(palette[0]["type"], "customer");
    assert_eq!(palette[0]["attributes"][0]["name"], "customerId");
    assert_eq!(palette[0]["attributes"][0]["category"], "event");
    assert_eq!(palette[3]["dataset"], "system_data");
}

proptest! {
    #[test]
    fn empty_extractions_get_exactly_the_defaults(source in ".{0,60}") {
        let rule = normalize::normalize(Extraction { source, ..Default::default() });
        prop_assert_eq!(rule.entities, vec![default_entity()]);
        prop_assert_eq!(rule.conditions, vec![default_condition()]);
        prop_assert_eq!(rule.actions, vec![default_action()]);
        prop_assert!(rule.join_conditions.is_empty());
    }

    #[test]
    fn first_join_references_first_two_entities(
        types in proptest::sample::subsequence(ENTITY_TYPES.to_vec(), 2..=ENTITY_TYPES.len()),
    ) {
        let extraction = Extraction {
            entities: types.iter().map(|t| entity(t)).collect(),
            ..Default::default()
        };
        let rule = normalize::normalize(extraction);
        prop_assert!(!rule.join_conditions.is_empty());
        prop_assert_eq!(&rule.join_conditions[0].left_entity, &rule.entities[0].entity_type);
        prop_assert_eq!(&rule.join_conditions[0].right_entity, &rule.entities[1].entity_type);
    }

    #[test]
    fn any_text_yields_a_complete_rule(text in ".{0,80}") {
        let rule = normalize::parse_rule(&text);
        prop_assert!(!rule.entities.is_empty());
        prop_assert!(!rule.conditions.is_empty());
        prop_assert!(!rule.actions.is_empty());
        prop_assert_eq!(rule.join_conditions.len(), usize::from(rule.entities.len() > 1));
    }
}
