//! Quick phase sketch from prose: one phase per sentence, laid out three per
//! row, with sequential/parallel edges guessed from the wording.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::patterns::compile;
use crate::model::{ContextCondition, Operator};
use crate::parse::types::{EdgeStyle, FlowEdge, Position};

const COLUMNS: usize = 3;
const NODE_SPACING: f64 = 200.0;
const ROW_SPACING: f64 = 150.0;
const ORIGIN: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseType {
    Start,
    Decision,
    Action,
    Calculation,
    Notification,
    End,
    Process,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchAction {
    pub name: String,
    #[serde(rename = "type")]
    pub action_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchPhase {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub phase_type: PhaseType,
    pub description: String,
    pub conditions: Vec<ContextCondition>,
    pub actions: Vec<SketchAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchNodeData {
    pub label: String,
    pub phase_type: PhaseType,
    pub description: String,
    pub conditions: Vec<ContextCondition>,
    pub actions: Vec<SketchAction>,
}

/// Sketch nodes render as `phaseNode` but carry the sketch payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    pub data: SketchNodeData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseSketch {
    pub phases: Vec<SketchPhase>,
    pub nodes: Vec<SketchNode>,
    pub edges: Vec<FlowEdge>,
}

static SENTENCE_END: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"[.!?]+"));

static PHASE_TYPES: LazyLock<Vec<(Regex, PhaseType)>> = LazyLock::new(|| {
    [
        (r"(?i)\b(?:start|begin)", PhaseType::Start),
        (r"(?i)\b(?:if|when)\b", PhaseType::Decision),
        (r"(?i)\b(?:trigger|action)", PhaseType::Action),
        (r"(?i)\b(?:calculat|comput)", PhaseType::Calculation),
        (r"(?i)\b(?:notif|send)", PhaseType::Notification),
        (r"(?i)\b(?:end|complet)", PhaseType::End),
    ]
    .into_iter()
    .filter_map(|(source, phase_type)| compile(source).map(|re| (re, phase_type)))
    .collect()
});

static CONDITION: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)\b(?:if|when)\s+(.+?)(?:\s+(?:then|and|or)\b|\s*,)"));

static COMPARATOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)\s+(is|equals|greater|less|contains|exceeds)\s+"));

static ACTION: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)\b(?:trigger|create|send|escalate|notify)\s+([^,\s]+)"));

static SEQUENTIAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)\b(?:after|then|completion)\b"));

pub fn sketch(text: &str) -> PhaseSketch {
    let sentences: Vec<&str> = match SENTENCE_END.as_ref() {
        Some(re) => re.split(text).map(str::trim).filter(|s| !s.is_empty()).collect(),
        None => Some(text.trim()).filter(|s| !s.is_empty()).into_iter().collect(),
    };
    let phases: Vec<SketchPhase> = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| sketch_phase(i, sentence))
        .collect();

    let mut nodes = Vec::with_capacity(phases.len());
    let mut edges = Vec::new();

    for (i, phase) in phases.iter().enumerate() {
        nodes.push(SketchNode {
            id: phase.id.clone(),
            node_type: "phaseNode".into(),
            position: Position::new(
                (i % COLUMNS) as f64 * NODE_SPACING + ORIGIN,
                (i / COLUMNS) as f64 * ROW_SPACING + ORIGIN,
            ),
            data: SketchNodeData {
                label: phase.name.clone(),
                phase_type: phase.phase_type,
                description: phase.description.clone(),
                conditions: phase.conditions.clone(),
                actions: phase.actions.clone(),
            },
        });

        if i == 0 {
            continue;
        }
        let prev = &phases[i - 1];
        if is_match(&SEQUENTIAL, &phase.description) {
            edges.push(
                FlowEdge::smoothstep(format!("edge-{}-{}", prev.id, phase.id), &prev.id, &phase.id)
                    .with_style(EdgeStyle::solid("#10b981", 3.0))
                    .with_label("Sequential"),
            );
        } else if i == 1 {
            edges.push(
                FlowEdge::smoothstep(format!("edge-start-{}", phase.id), &prev.id, &phase.id)
                    .with_style(EdgeStyle::dashed("#3b82f6", 2.0, "5,5"))
                    .with_label("Parallel"),
            );
        }
    }

    PhaseSketch {
        phases,
        nodes,
        edges,
    }
}

fn sketch_phase(index: usize, sentence: &str) -> SketchPhase {
    let phase_type = PHASE_TYPES
        .iter()
        .find(|(re, _)| re.is_match(sentence))
        .map(|&(_, t)| t)
        .unwrap_or(PhaseType::Process);

    SketchPhase {
        id: format!("phase-{}", index + 1),
        name: format!("Phase {}", index + 1),
        phase_type,
        description: sentence.to_string(),
        conditions: sketch_conditions(sentence),
        actions: sketch_actions(sentence),
    }
}

fn sketch_conditions(sentence: &str) -> Vec<ContextCondition> {
    let (Some(clause), Some(comparator)) = (CONDITION.as_ref(), COMPARATOR.as_ref()) else {
        return Vec::new();
    };
    clause
        .captures_iter(sentence)
        .filter_map(|caps| {
            let text = caps.get(1)?.as_str();
            let found = comparator.captures(text)?;
            let (whole, word) = (found.get(0)?, found.get(1)?);
            let field = text[..whole.start()].trim();
            let rest = text[whole.end()..].trim();
            let (operator, value) = match word.as_str().to_lowercase().as_str() {
                "greater" | "exceeds" => (Operator::GreaterThan, strip_than(rest)),
                "less" => (Operator::LessThan, strip_than(rest)),
                "contains" => (Operator::Contains, rest),
                _ => (Operator::Equals, rest),
            };
            (!field.is_empty() && !value.is_empty()).then(|| ContextCondition {
                field: field.to_string(),
                operator,
                value: value.to_string(),
            })
        })
        .collect()
}

fn strip_than(value: &str) -> &str {
    value
        .strip_prefix("than ")
        .or_else(|| value.strip_prefix("Than "))
        .map(str::trim_start)
        .unwrap_or(value)
}

fn sketch_actions(sentence: &str) -> Vec<SketchAction> {
    let Some(action) = ACTION.as_ref() else {
        return Vec::new();
    };
    action
        .captures_iter(sentence)
        .filter_map(|caps| caps.get(1))
        .map(|m| SketchAction {
            name: m.as_str().to_string(),
            action_type: "action".into(),
        })
        .collect()
}

fn is_match(re: &LazyLock<Option<Regex>>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_phase_per_sentence() {
        let s = sketch("Start the month-end close. Calculate P&L! Is it done?");
        let types: Vec<_> = s.phases.iter().map(|p| p.phase_type).collect();
        assert_eq!(types, vec![PhaseType::Start, PhaseType::Calculation, PhaseType::Process]);
        assert_eq!(s.phases[2].id, "phase-3");
    }

    #[test]
    fn greater_than_condition() {
        let s = sketch("If revenue greater than 1000, trigger bonus");
        let c = &s.phases[0].conditions[0];
        assert_eq!(c.field, "revenue");
        assert_eq!(c.operator, Operator::GreaterThan);
        assert_eq!(c.value, "1000");
        assert_eq!(s.phases[0].actions[0].name, "bonus");
        assert_eq!(s.phases[0].phase_type, PhaseType::Decision);
    }

    #[test]
    fn notify_does_not_read_as_decision() {
        let s = sketch("Notify finance");
        assert_eq!(s.phases[0].phase_type, PhaseType::Notification);
    }
}
