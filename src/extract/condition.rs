//! Condition clauses: clause-boundary matching, phrase splitting, keyword
//! classification.

use super::patterns::{CLAUSES, CONJUNCTION, FIELDS, THEN_WORD, VALUES, WHITESPACE};
use crate::model::{Condition, Operator};

/// Every condition phrase captured by the clause patterns, in pattern order,
/// each phrase kept once.
pub fn extract_conditions(text: &str) -> Vec<Condition> {
    let mut phrases: Vec<String> = Vec::new();

    for clause in CLAUSES.iter() {
        for caps in clause.captures_iter(text) {
            for captured in caps.iter().skip(1).flatten() {
                for phrase in split_phrases(captured.as_str()) {
                    if !phrases.contains(&phrase) {
                        phrases.push(phrase);
                    }
                }
            }
        }
    }

    phrases.iter().map(|p| classify(p)).collect()
}

fn split_phrases(clause: &str) -> Vec<String> {
    let pieces: Vec<&str> = match CONJUNCTION.as_ref() {
        Some(re) => re.split(clause).collect(),
        None => vec![clause],
    };
    pieces
        .into_iter()
        .map(|p| p.trim().trim_end_matches(',').trim_end().to_string())
        .filter(|p| !p.is_empty() && !mentions_then(p))
        .collect()
}

fn mentions_then(phrase: &str) -> bool {
    THEN_WORD.as_ref().is_some_and(|re| re.is_match(phrase))
}

/// Map a phrase to a condition by the first keyword rule it satisfies.
pub fn classify(phrase: &str) -> Condition {
    let lower = phrase.to_lowercase();
    let (field, operator, value) = if lower.contains("ready") {
        ("status".to_string(), Operator::Equals, "ready".to_string())
    } else if lower.contains("low") {
        ("quantity".to_string(), Operator::LessThan, "threshold".to_string())
    } else if lower.contains("exceeds") || lower.contains('>') {
        (field_of(phrase), Operator::GreaterThan, value_of(phrase))
    } else if lower.contains("same date") {
        ("business_date".to_string(), Operator::Equals, "${business_date}".to_string())
    } else if lower.contains("payment issue") {
        ("payment_status".to_string(), Operator::Equals, "failed".to_string())
    } else if lower.contains("error rate") {
        ("error_rate".to_string(), Operator::GreaterThan, "5%".to_string())
    } else {
        (field_of(phrase), Operator::NotEmpty, String::new())
    };
    Condition::new(phrase, field, operator, value)
}

/// First field pattern found, lower-cased with whitespace runs as `_`.
pub fn field_of(phrase: &str) -> String {
    FIELDS
        .iter()
        .find_map(|re| re.find(phrase))
        .map(|m| {
            let lower = m.as_str().to_lowercase();
            match WHITESPACE.as_ref() {
                Some(ws) => ws.replace_all(&lower, "_").into_owned(),
                None => lower,
            }
        })
        .unwrap_or_else(|| "data".to_string())
}

/// First value pattern found, verbatim; empty when nothing matches.
pub fn value_of(phrase: &str) -> String {
    VALUES
        .iter()
        .find_map(|re| re.find(phrase))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
