use serde::{Deserialize, Serialize};

use crate::model::{Phase, Process};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStatistics {
    /// Top-level phases only.
    pub total_phases: usize,
    pub total_sub_phases: usize,
    pub total_calculators: usize,
    pub total_edges: usize,
    /// Deepest `subPhases` nesting.
    pub max_depth: usize,
    /// Like `max_depth`, but a phase without sub-phases reaches
    /// `depth + calculators.len()`.
    pub max_level: usize,
}

/// Counts over the whole tree. `total_edges` is left at zero for the layout
/// to fill in.
pub fn statistics(process: &Process) -> ProcessStatistics {
    let mut stats = ProcessStatistics {
        total_phases: process.phases.len(),
        ..Default::default()
    };
    for phase in &process.phases {
        visit(phase, 0, &mut stats);
        stats.max_level = stats.max_level.max(max_level(phase, 0));
    }
    stats
}

fn visit(phase: &Phase, depth: usize, stats: &mut ProcessStatistics) {
    stats.max_depth = stats.max_depth.max(depth);
    stats.total_sub_phases += phase.sub_phases.len();
    stats.total_calculators += phase.calculators.len();
    for sub in &phase.sub_phases {
        visit(sub, depth + 1, stats);
    }
}

fn max_level(phase: &Phase, level: usize) -> usize {
    if !phase.sub_phases.is_empty() {
        phase
            .sub_phases
            .iter()
            .map(|sub| max_level(sub, level + 1))
            .fold(level, usize::max)
    } else {
        level + phase.calculators.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Calculator;

    fn process(phases: Vec<Phase>) -> Process {
        Process {
            id: "p".into(),
            name: "p".into(),
            description: String::new(),
            phases,
            action: None,
        }
    }

    #[test]
    fn calculators_extend_level_but_not_depth() {
        let leaf = Phase::new("b", "B").with_calculators(vec![
            Calculator::new("1", "x", "app"),
            Calculator::new("2", "y", "app"),
            Calculator::new("3", "z", "app"),
        ]);
        let stats = statistics(&process(vec![Phase::new("a", "A").with_sub_phases(vec![leaf])]));
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.max_level, 4);
        assert_eq!(stats.total_calculators, 3);
    }

    #[test]
    fn empty_process_is_all_zero() {
        assert_eq!(statistics(&process(vec![])), ProcessStatistics::default());
    }
}
