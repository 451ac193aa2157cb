//! Integration tests for document invariants and their conversion into
//! compiler errors.

mod helpers;

use proptest::prelude::*;

use rule_compiler::error::{CompilerError, Phase as ErrorPhase};
use rule_compiler::model::{Phase, validate_process, validate_rule};
use rule_compiler::normalize;

#[test]
fn normalized_examples_are_valid() {
    helpers::init_tracing();
    for text in [
        "If inventory is low AND orders are pending, create purchase request",
        "When customer data and sales data have the same date, trigger P&L calculation",
        "hello world",
    ] {
        let rule = normalize::parse_rule(text);
        assert_eq!(validate_rule(&rule), vec![], "{:?}", text);
    }
}

#[test]
fn dropping_the_join_is_r003() {
    let mut rule = normalize::parse_rule("When customer data and sales data have the same date, trigger P&L");
    rule.join_conditions.clear();
    let errors = validate_rule(&rule);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, "R003");

    let error = CompilerError::from(errors[0].clone());
    assert_eq!(error.phase, ErrorPhase::Validate);
    assert!(error.to_string().starts_with("[Validate:R003] Rule has 2 entities"));
}

#[test]
fn fixture_processes_have_unique_phase_ids() {
    assert!(validate_process(&helpers::process(helpers::NESTED_PROCESS)).is_empty());
    assert!(validate_process(&helpers::process(helpers::CALCULATOR_PROCESS)).is_empty());
}

#[test]
fn duplicate_ids_across_levels() {
    let process = helpers::process_of(
        vec![
            helpers::phase("a").with_sub_phases(vec![helpers::phase("b")]),
            helpers::phase("b"),
            Phase::new("", "Unnamed"),
        ],
        false,
    );
    let codes: Vec<&str> = validate_process(&process).iter().map(|e| e.code).collect();
    assert_eq!(codes, vec!["X001", "X002"]);
}

proptest! {
    #[test]
    fn parsed_rules_satisfy_every_invariant(text in "[a-zA-Z ,]{0,60}") {
        let rule = normalize::parse_rule(&text);
        prop_assert!(validate_rule(&rule).is_empty());
    }
}
