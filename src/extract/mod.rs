//! Pattern extraction: free text → entities, conditions, actions.
//!
//! Absence of a match is the normal outcome, never an error. Defaults for
//! empty lists are supplied by `normalize`, not here.

pub mod action;
pub mod condition;
pub mod entity;
pub(crate) mod patterns;

use serde::{Deserialize, Serialize};

use crate::model::{Action, Condition, Entity};

pub use action::extract_actions;
pub use condition::extract_conditions;
pub use entity::extract_entities;

/// Raw extraction result, before defaults and joins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Extraction {
    pub source: String,
    pub entities: Vec<Entity>,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.conditions.is_empty() && self.actions.is_empty()
    }
}

pub fn extract(text: &str) -> Extraction {
    if text.trim().is_empty() {
        return Extraction {
            source: text.to_string(),
            ..Default::default()
        };
    }

    let extraction = Extraction {
        source: text.to_string(),
        entities: extract_entities(text),
        conditions: extract_conditions(text),
        actions: extract_actions(text),
    };

    tracing::debug!(
        entities = extraction.entities.len(),
        conditions = extraction.conditions.len(),
        actions = extraction.actions.len(),
        "extracted rule parts from text"
    );

    extraction
}
