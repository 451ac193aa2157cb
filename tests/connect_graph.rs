//! Integration tests for the connection policy on the rule canvas.

mod helpers;

use proptest::prelude::*;

use rule_compiler::parse::GraphIndex;
use rule_compiler::parse::types::*;
use rule_compiler::validate::{self, filter_edges, is_allowed};

fn node(id: &str, kind: NodeKind) -> FlowNode {
    let position = Position::default();
    let id = id.to_string();
    match kind {
        NodeKind::Entity => FlowNode::Entity(NodeBase {
            id,
            position,
            data: EntityNodeData {
                entity_type: "sales".into(),
                ..Default::default()
            },
        }),
        NodeKind::Join => FlowNode::Join(NodeBase {
            id,
            position,
            data: JoinNodeData::default(),
        }),
        NodeKind::Action => FlowNode::Action(NodeBase {
            id,
            position,
            data: ActionNodeData::default(),
        }),
        NodeKind::Condition => FlowNode::Condition(NodeBase {
            id,
            position,
            data: ConditionNodeData::default(),
        }),
        NodeKind::Phase => FlowNode::Phase(NodeBase {
            id: id.clone(),
            position,
            data: PhaseNodeData {
                phase: rule_compiler::model::Phase::new(id, "Phase"),
                calculators: vec![],
                sub_phases: vec![],
                track_number: 1,
                level: 0,
                is_junction: true,
                station_name: "Phase".into(),
            },
        }),
        NodeKind::Calculator => FlowNode::Calculator(NodeBase {
            id: id.clone(),
            position,
            data: CalculatorNodeData {
                label: "calc".into(),
                calculator: rule_compiler::model::Calculator::new(id, "calc", "app"),
            },
        }),
    }
}

const KINDS: [NodeKind; 6] = [
    NodeKind::Entity,
    NodeKind::Join,
    NodeKind::Action,
    NodeKind::Condition,
    NodeKind::Phase,
    NodeKind::Calculator,
];

fn one_of_each() -> FlowGraph {
    FlowGraph {
        nodes: KINDS.iter().enumerate().map(|(i, &k)| node(&format!("n{}", i), k)).collect(),
        edges: vec![],
    }
}

#[test]
fn entity_to_join_is_accepted() {
    helpers::init_tracing();
    let graph = one_of_each();
    let outcome = validate::connect(&graph, FlowEdge::smoothstep("e", "n0", "n1"));
    assert!(outcome.is_accepted());
    assert_eq!(outcome.graph.edges.len(), 1);
}

#[test]
fn reverse_direction_is_rejected_with_c001() {
    let graph = one_of_each();
    let outcome = validate::connect(&graph, FlowEdge::smoothstep("e", "n1", "n0"));
    let error = outcome.rejected.expect("join → entity is not allowed");
    assert_eq!(error.code, "C001");
    assert_eq!(error.message, "Cannot connect joinNode to entityNode");
    assert!(outcome.graph.edges.is_empty());
}

#[test]
fn second_identical_edge_is_a_duplicate() {
    let graph = validate::connect(&one_of_each(), FlowEdge::smoothstep("a", "n1", "n2")).graph;
    let outcome = validate::connect(&graph, FlowEdge::smoothstep("b", "n1", "n2"));
    assert_eq!(outcome.rejected.map(|e| e.code), Some("C003".to_string()));
    assert_eq!(outcome.graph.edges.len(), 1);
}

#[test]
fn unknown_endpoint_is_c002() {
    let err = validate::check_connection(&one_of_each(), &FlowEdge::smoothstep("x", "n0", "nowhere"))
        .unwrap_err();
    assert_eq!(err.code, "C002");
    assert_eq!(err.node_id.as_deref(), Some("nowhere"));
}

#[test]
fn fixture_edges_are_filtered_in_order() {
    let graph = helpers::canvas(helpers::RULE_CANVAS);
    let filtered = filter_edges(&graph);

    let accepted: Vec<&str> = filtered.accepted.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(accepted, vec!["e1", "e2", "e3"]);

    let rejected: Vec<(&str, &str)> = filtered
        .rejected
        .iter()
        .map(|r| (r.edge.id.as_str(), r.reason.code.as_str()))
        .collect();
    assert_eq!(rejected, vec![("e4", "C001"), ("e5", "C003"), ("e6", "C002")]);
}

proptest! {
    #[test]
    fn only_allowed_pairs_survive(pairs in proptest::collection::vec((0usize..6, 0usize..6), 0..30)) {
        let mut graph = one_of_each();
        graph.edges = pairs
            .iter()
            .enumerate()
            .map(|(i, (s, t))| FlowEdge::smoothstep(format!("e{}", i), format!("n{}", s), format!("n{}", t)))
            .collect();

        let filtered = filter_edges(&graph);
        prop_assert_eq!(filtered.accepted.len() + filtered.rejected.len(), pairs.len());

        for edge in &filtered.accepted {
            let source = graph.node(&edge.source).map(FlowNode::kind);
            let target = graph.node(&edge.target).map(FlowNode::kind);
            prop_assert!(matches!((source, target), (Some(s), Some(t)) if is_allowed(s, t)));
        }
        for (i, a) in filtered.accepted.iter().enumerate() {
            for b in &filtered.accepted[i + 1..] {
                prop_assert!(!a.same_connection(b));
            }
        }
        // at most the two allowed connections can ever be accepted
        prop_assert!(filtered.accepted.len() <= 2);
    }
}

#[test]
fn index_resolves_entity_feeding_join() {
    let graph = helpers::canvas(helpers::INCOMPLETE_CANVAS);
    let index = GraphIndex::build(&graph).unwrap();
    assert_eq!(index.kind_of("join-1"), Some(NodeKind::Join));
    assert_eq!(index.predecessors("join-1"), vec!["inventory-1"]);
    assert!(index.predecessors("inventory-1").is_empty());
    assert_eq!(index.kind_of("ghost"), None);
}

#[test]
fn dangling_edge_fails_indexing() {
    let graph = helpers::canvas(helpers::RULE_CANVAS);
    let errors = GraphIndex::build(&graph).unwrap_err();
    let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["P002"]);
    assert!(errors[0].message.contains("'ghost'"));
}
