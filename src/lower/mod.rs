//! Lowering phase: canvas graphs ⇄ rule and process documents.
//!
//! `rule` compiles the entity/join/action canvas, `render` goes the other way,
//! `process` reads a phase canvas back into a process, and `correlation`
//! derives the event-correlation configuration of a process.

pub mod correlation;
pub mod process;
pub mod render;
pub mod rule;

pub use correlation::{CorrelationConfig, correlation_config};
pub use process::process_from_graph;
pub use render::rule_to_graph;
pub use rule::{
    ConfiguredAction, ConfiguredEntity, ConfiguredRule, RuleCompilation, RuleConfiguration,
    can_generate, compile_rule_graph,
};
