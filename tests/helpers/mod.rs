#![allow(dead_code)]

use std::sync::Once;

use rule_compiler::model::{Calculator, Phase, Process, ProcessAction};
use rule_compiler::parse::{self, FlowGraph};

// =============================================================================
// Logging
// =============================================================================

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so it shows on failure.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

// =============================================================================
// Fixtures
// =============================================================================

pub const RULE_CANVAS: &str = include_str!("../fixtures/rule_canvas.json");
pub const INCOMPLETE_CANVAS: &str = include_str!("../fixtures/incomplete_canvas.json");
pub const NESTED_PROCESS: &str = include_str!("../fixtures/nested_process.json");
pub const CALCULATOR_PROCESS: &str = include_str!("../fixtures/calculator_process.json");

pub fn canvas(json: &str) -> FlowGraph {
    parse::parse(json).expect("fixture canvas should parse")
}

pub fn process(json: &str) -> Process {
    serde_json::from_str(json).expect("fixture process should parse")
}

// =============================================================================
// Process builders
// =============================================================================

pub fn phase(id: &str) -> Phase {
    Phase::new(id, format!("Phase {}", id))
}

pub fn calculators(ids: &[&str]) -> Vec<Calculator> {
    ids.iter()
        .map(|id| Calculator::new(*id, format!("calc-{}", id), "app"))
        .collect()
}

/// A single top-level chain `p0 → p1 → … → p(depth)` of nested sub-phases.
pub fn chain(depth: usize) -> Phase {
    let mut current = phase(&format!("p{}", depth));
    for level in (0..depth).rev() {
        current = phase(&format!("p{}", level)).with_sub_phases(vec![current]);
    }
    current
}

pub fn process_of(phases: Vec<Phase>, terminal: bool) -> Process {
    Process {
        id: "proc".into(),
        name: "Test Process".into(),
        description: String::new(),
        phases,
        action: terminal.then(ProcessAction::process_completed),
    }
}
