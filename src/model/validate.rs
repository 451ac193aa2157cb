//! Invariant validation for rule and process documents.
//!
//! Callers that accept documents from outside (the persistence API, pasted
//! JSON) run these before handing them to the graph compiler or layout engine.

use std::collections::HashSet;

use super::process::{Phase, Process};
use super::rule::Rule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
    /// Entity type, condition name or phase id the error was found on.
    pub subject: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subject {
            Some(id) => write!(f, "[{}] {} (at '{}')", self.code, self.message, id),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Validate a rule against all invariants. Returns all errors found.
pub fn validate_rule(rule: &Rule) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_non_empty_lists(rule, &mut errors);
    validate_selected_attributes(rule, &mut errors);
    validate_join_present(rule, &mut errors);
    validate_join_references(rule, &mut errors);
    validate_condition_fields(rule, &mut errors);

    errors
}

/// Validate a process tree. Returns all errors found.
pub fn validate_process(process: &Process) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    collect_phase_ids(&process.phases, &mut seen, &mut errors);
    errors
}

// ---------------------------------------------------------------------------
// Invariant: entities, conditions and actions are non-empty
// ---------------------------------------------------------------------------

fn validate_non_empty_lists(rule: &Rule, errors: &mut Vec<ValidationError>) {
    let lists = [
        ("entities", rule.entities.is_empty()),
        ("conditions", rule.conditions.is_empty()),
        ("actions", rule.actions.is_empty()),
    ];
    for (name, empty) in lists {
        if empty {
            errors.push(ValidationError {
                code: "R001",
                message: format!("Rule must contain at least one entry in '{}'", name),
                subject: None,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant: selectedAttributes ⊆ attributes
// ---------------------------------------------------------------------------

fn validate_selected_attributes(rule: &Rule, errors: &mut Vec<ValidationError>) {
    for entity in &rule.entities {
        for selected in &entity.selected_attributes {
            if !entity.attributes.contains(selected) {
                errors.push(ValidationError {
                    code: "R002",
                    message: format!(
                        "Selected attribute '{}' is not an attribute of entity '{}'",
                        selected, entity.entity_type
                    ),
                    subject: Some(entity.entity_type.clone()),
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant: more than one entity → a join between the first two exists
// ---------------------------------------------------------------------------

fn validate_join_present(rule: &Rule, errors: &mut Vec<ValidationError>) {
    let [first, second, ..] = rule.entities.as_slice() else {
        return;
    };
    let joined = rule.join_conditions.iter().any(|j| {
        (j.left_entity == first.entity_type && j.right_entity == second.entity_type)
            || (j.left_entity == second.entity_type && j.right_entity == first.entity_type)
    });
    if !joined {
        errors.push(ValidationError {
            code: "R003",
            message: format!(
                "Rule has {} entities but no join between '{}' and '{}'",
                rule.entities.len(),
                first.entity_type,
                second.entity_type
            ),
            subject: None,
        });
    }
}

// ---------------------------------------------------------------------------
// Invariant: joins reference entities of the rule
// ---------------------------------------------------------------------------

fn validate_join_references(rule: &Rule, errors: &mut Vec<ValidationError>) {
    let types: HashSet<&str> = rule.entities.iter().map(|e| e.entity_type.as_str()).collect();
    for join in &rule.join_conditions {
        for side in [&join.left_entity, &join.right_entity] {
            if !types.contains(side.as_str()) {
                errors.push(ValidationError {
                    code: "R004",
                    message: format!("Join references unknown entity '{}'", side),
                    subject: Some(side.clone()),
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant: every condition names a field
// ---------------------------------------------------------------------------

fn validate_condition_fields(rule: &Rule, errors: &mut Vec<ValidationError>) {
    for condition in &rule.conditions {
        if condition.field.trim().is_empty() {
            errors.push(ValidationError {
                code: "R005",
                message: "Condition has an empty field".into(),
                subject: Some(condition.name.clone()),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant: phase ids are non-empty and unique across the tree
// ---------------------------------------------------------------------------

fn collect_phase_ids(
    phases: &[Phase],
    seen: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for phase in phases {
        if phase.id.trim().is_empty() {
            errors.push(ValidationError {
                code: "X002",
                message: format!("Phase '{}' has an empty id", phase.name),
                subject: None,
            });
        } else if !seen.insert(phase.id.clone()) {
            errors.push(ValidationError {
                code: "X001",
                message: format!("Duplicate phase ID '{}'", phase.id),
                subject: Some(phase.id.clone()),
            });
        }
        collect_phase_ids(&phase.sub_phases, seen, errors);
    }
}
