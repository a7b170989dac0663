//! Slack derivation and critical/non-critical partitioning.

use crate::config::AnalysisConfig;
use crate::graph::TaskGraph;
use crate::interner::NodeId;
use crate::log_checks;

use super::schedule::ScheduleTimes;

/// Slack per node plus the critical flag for task nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct SlackMap {
    slack: Vec<f64>,
    critical: Vec<bool>,
}

impl SlackMap {
    #[inline]
    pub fn slack(&self, node: NodeId) -> f64 {
        self.slack[node as usize]
    }

    /// Zero-slack task. Always false for the anchors.
    #[inline]
    pub fn is_critical(&self, node: NodeId) -> bool {
        self.critical[node as usize]
    }

    /// Critical task nodes in insertion order.
    pub fn critical_nodes<'g>(&'g self, graph: &'g TaskGraph) -> impl Iterator<Item = NodeId> + 'g {
        graph.task_nodes().filter(move |&node| self.is_critical(node))
    }
}

pub struct SlackAnalyzer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> SlackAnalyzer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, graph: &TaskGraph, times: &ScheduleTimes) -> SlackMap {
        let n = graph.node_count();
        let mut slack = vec![0.0; n];
        let mut critical = vec![false; n];

        for node in graph.task_nodes() {
            let idx = node as usize;
            let value = times.slack[idx];
            slack[idx] = value;
            critical[idx] = self.config.is_zero_slack(value);

            log_checks!(
                self.config.verbosity,
                task_id = graph.name(node),
                slack = value,
                critical = critical[idx],
                "Slack"
            );
        }

        SlackMap { slack, critical }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critical_path::schedule::ScheduleComputer;
    use crate::graph::{TaskGraphBuilder, END, START};
    use crate::models::TaskDescriptor;

    fn make_task(id: &str, duration: f64, deps: &[&str]) -> TaskDescriptor {
        TaskDescriptor::hours(id, duration, deps.iter().copied())
    }

    fn analyze(tasks: &[TaskDescriptor], config: &AnalysisConfig) -> (TaskGraph, SlackMap) {
        let graph = TaskGraphBuilder::new(config).build(tasks).graph;
        let times = ScheduleComputer::new(0).compute(&graph).unwrap();
        let slack = SlackAnalyzer::new(config).analyze(&graph, &times);
        (graph, slack)
    }

    #[test]
    fn test_diamond_slack() {
        // a -> b -> d and a -> c -> d, b is the longer branch
        let tasks = vec![
            make_task("a", 2.0, &[]),
            make_task("b", 5.0, &["a"]),
            make_task("c", 1.0, &["a"]),
            make_task("d", 3.0, &["b", "c"]),
        ];
        let (graph, slack) = analyze(&tasks, &AnalysisConfig::default());
        let id = |name: &str| graph.node_id(name).unwrap();

        assert!(slack.is_critical(id("a")));
        assert!(slack.is_critical(id("b")));
        assert!(slack.is_critical(id("d")));
        assert!(!slack.is_critical(id("c")));
        assert_eq!(slack.slack(id("c")), 4.0);

        let critical: Vec<&str> = slack.critical_nodes(&graph).map(|n| graph.name(n)).collect();
        assert_eq!(critical, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_anchors_never_critical() {
        let (_, slack) = analyze(&[make_task("a", 1.0, &[])], &AnalysisConfig::default());
        assert!(!slack.is_critical(START));
        assert!(!slack.is_critical(END));
    }

    #[test]
    fn test_epsilon_absorbs_drift() {
        let tasks = vec![
            make_task("a", 0.1 + 0.2, &[]),
            make_task("b", 0.3, &[]),
            make_task("c", 1.0, &["a", "b"]),
        ];
        // 0.1 + 0.2 != 0.3 in f64, so b carries a tiny positive slack
        let (graph, exact) = analyze(&tasks, &AnalysisConfig::default());
        let b = graph.node_id("b").unwrap();
        assert!(exact.slack(b) > 0.0);
        assert!(!exact.is_critical(b));

        let config = AnalysisConfig {
            slack_epsilon: 1e-9,
            ..AnalysisConfig::default()
        };
        let (_, tolerant) = analyze(&tasks, &config);
        assert!(tolerant.is_critical(b));
    }
}
