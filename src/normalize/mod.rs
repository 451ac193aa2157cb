//! Rule normalisation: default filling, join derivation and logic resolution.

pub mod catalog;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::patterns::compile;
use crate::extract::{Extraction, extract};
use crate::model::{Action, ActionKind, Condition, Entity, JoinCondition, Logic, Operator, Rule};

/// Attribute every derived join matches on.
pub const JOIN_ATTRIBUTE: &str = "business_date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JoinPolicy {
    /// Join `entities[0]` with `entities[1]` only.
    #[default]
    FirstPair,
    /// Join every adjacent pair `(i, i + 1)`.
    AdjacentPairs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizeOptions {
    pub join_policy: JoinPolicy,
}

pub fn normalize(extraction: Extraction) -> Rule {
    normalize_with(extraction, &NormalizeOptions::default())
}

pub fn normalize_with(extraction: Extraction, options: &NormalizeOptions) -> Rule {
    let logic = resolve_logic(&extraction.source);
    let mut rule = Rule {
        entities: extraction.entities,
        conditions: extraction.conditions,
        join_conditions: Vec::new(),
        actions: extraction.actions,
        logic,
        description: extraction.source,
    };

    rule.join_conditions = derive_joins(&rule.entities, options.join_policy);
    fill_defaults(&mut rule);

    tracing::debug!(
        entities = rule.entities.len(),
        joins = rule.join_conditions.len(),
        logic = ?rule.logic,
        "normalized rule"
    );

    rule
}

/// `normalize(extract(text))`.
pub fn parse_rule(text: &str) -> Rule {
    normalize(extract(text))
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub fn default_entity() -> Entity {
    Entity {
        entity_type: "input".into(),
        name: "Input Data".into(),
        icon: "📥".into(),
        attributes: vec!["data".into()],
        selected_attributes: vec!["data".into()],
    }
}

pub fn default_condition() -> Condition {
    Condition::new("Default Condition", "data", Operator::NotEmpty, "")
}

pub fn default_action() -> Action {
    Action {
        name: "Default Action".into(),
        description: "Process completed".into(),
        kind: ActionKind::Notification,
    }
}

/// Replace each empty list of `rule` with its single documented default.
pub fn fill_defaults(rule: &mut Rule) {
    if rule.entities.is_empty() {
        rule.entities.push(default_entity());
    }
    if rule.conditions.is_empty() {
        rule.conditions.push(default_condition());
    }
    if rule.actions.is_empty() {
        rule.actions.push(default_action());
    }
}

// ---------------------------------------------------------------------------
// Joins
// ---------------------------------------------------------------------------

pub fn derive_joins(entities: &[Entity], policy: JoinPolicy) -> Vec<JoinCondition> {
    let join = |pair: &[Entity]| {
        JoinCondition::on(&pair[0].entity_type, &pair[1].entity_type, JOIN_ATTRIBUTE)
    };
    match policy {
        JoinPolicy::FirstPair => entities.get(..2).map(join).into_iter().collect(),
        JoinPolicy::AdjacentPairs => entities.windows(2).map(join).collect(),
    }
}

// ---------------------------------------------------------------------------
// Logic
// ---------------------------------------------------------------------------

static AND_WORD: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"(?i)\band\b"));
static OR_WORD: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"(?i)\bor\b"));

fn has_word(word: &LazyLock<Option<Regex>>, text: &str) -> bool {
    word.as_ref().is_some_and(|re| re.is_match(text))
}

/// `AND` when the text says "and", else `OR` when it says "or", else `AND`.
pub fn resolve_logic(text: &str) -> Logic {
    if has_word(&AND_WORD, text) {
        Logic::And
    } else if has_word(&OR_WORD, text) {
        Logic::Or
    } else {
        Logic::And
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(t: &str) -> Entity {
        Entity {
            entity_type: t.into(),
            name: t.into(),
            icon: String::new(),
            attributes: catalog::default_attributes(t),
            selected_attributes: Vec::new(),
        }
    }

    #[test]
    fn hello_world_is_all_defaults() {
        let rule = parse_rule("hello world");
        assert_eq!(rule.entities, vec![default_entity()]);
        assert_eq!(rule.conditions, vec![default_condition()]);
        assert_eq!(rule.actions, vec![default_action()]);
        assert!(rule.join_conditions.is_empty());
        assert_eq!(rule.logic, Logic::And);
        assert_eq!(rule.description, "hello world");
    }

    #[test]
    fn or_inside_a_word_does_not_count() {
        assert_eq!(resolve_logic("check orders for errors"), Logic::And);
        assert_eq!(resolve_logic("payment fails OR times out"), Logic::Or);
        assert_eq!(resolve_logic("a or b and c"), Logic::And);
    }

    #[test]
    fn first_pair_joins_only_first_two() {
        let entities = vec![entity("customer"), entity("sales"), entity("system")];
        let joins = derive_joins(&entities, JoinPolicy::FirstPair);
        assert_eq!(joins, vec![JoinCondition::on("customer", "sales", "business_date")]);
    }

    #[test]
    fn adjacent_pairs_chain_every_entity() {
        let entities = vec![entity("customer"), entity("sales"), entity("system")];
        let joins = derive_joins(&entities, JoinPolicy::AdjacentPairs);
        assert_eq!(joins.len(), 2);
        assert_eq!(joins[1].left_entity, "sales");
        assert_eq!(joins[1].right_entity, "system");
    }

    #[test]
    fn single_entity_has_no_join() {
        assert!(derive_joins(&[entity("inventory")], JoinPolicy::FirstPair).is_empty());
    }
}
