//! Verb-triggered action clauses.

use super::patterns::ACTIONS;
use crate::model::{Action, ActionKind};

pub fn extract_actions(text: &str) -> Vec<Action> {
    let mut actions: Vec<Action> = Vec::new();

    for pattern in ACTIONS.iter() {
        for caps in pattern.captures_iter(text) {
            let (Some(whole), Some(verb), Some(object)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            let action = classify(verb.as_str(), object.as_str().trim(), whole.as_str().trim());
            if !actions.contains(&action) {
                actions.push(action);
            }
        }
    }

    actions
}

fn classify(verb: &str, object: &str, clause: &str) -> Action {
    let (name, kind) = match verb.to_lowercase().as_str() {
        "trigger" => (
            format!("Trigger {}", object),
            ActionKind::TriggerJob {
                job_name: object.to_string(),
            },
        ),
        "create" => (
            format!("Create {}", object),
            ActionKind::CreateRequest {
                request_type: object.to_string(),
            },
        ),
        "send" => (
            format!("Send {}", object),
            ActionKind::SendNotification {
                notification_type: object.to_string(),
            },
        ),
        "escalate" => {
            let target = strip_to(object);
            (
                format!("Escalate to {}", target),
                ActionKind::Escalate {
                    target: target.to_string(),
                },
            )
        }
        _ => (clause.to_string(), ActionKind::Notification),
    };

    Action {
        name,
        description: clause.to_string(),
        kind,
    }
}

fn strip_to(object: &str) -> &str {
    let bytes = object.as_bytes();
    if bytes.len() > 3 && bytes[..2].eq_ignore_ascii_case(b"to") && bytes[2].is_ascii_whitespace() {
        object[3..].trim_start()
    } else {
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_captures_rest_of_clause() {
        let actions = extract_actions("If inventory is low, create purchase request.");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].name, "Create purchase request");
        assert_eq!(
            actions[0].kind,
            ActionKind::CreateRequest {
                request_type: "purchase request".into()
            }
        );
        assert_eq!(actions[0].description, "create purchase request");
    }

    #[test]
    fn escalate_strips_leading_to() {
        let actions = extract_actions("escalate to operations team");
        assert_eq!(
            actions[0].kind,
            ActionKind::Escalate {
                target: "operations team".into()
            }
        );
        assert_eq!(actions[0].name, "Escalate to operations team");
    }

    #[test]
    fn notify_is_plain_notification() {
        let actions = extract_actions("notify finance; then stop");
        assert_eq!(actions[0].kind, ActionKind::Notification);
        assert_eq!(actions[0].name, "notify finance");
    }

    #[test]
    fn verbs_are_reported_in_table_order() {
        let actions = extract_actions("send alert, trigger P&L calculation");
        let types: Vec<_> = actions.iter().map(|a| a.kind.type_name()).collect();
        assert_eq!(types, vec!["trigger_job", "send_notification"]);
    }
}
