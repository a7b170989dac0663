//! Flags structurally risky tasks on the critical path.

use crate::config::AnalysisConfig;
use crate::graph::TaskGraph;
use crate::interner::NodeId;

use super::types::{BottleneckInfo, BottleneckReason};

pub struct BottleneckDetector<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> BottleneckDetector<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Check every critical path task against the duration and degree limits.
    ///
    /// Degrees are taken from the full graph, not the critical subgraph, and
    /// count anchor edges.
    pub fn detect(&self, graph: &TaskGraph, critical_path: &[NodeId]) -> Vec<BottleneckInfo> {
        if critical_path.is_empty() {
            return Vec::new();
        }

        let avg_duration = critical_path
            .iter()
            .map(|&n| graph.duration(n))
            .sum::<f64>()
            / critical_path.len() as f64;
        let long_threshold = avg_duration * self.config.long_duration_factor;

        let mut bottlenecks = Vec::new();

        for &node in critical_path {
            let mut reasons = Vec::new();

            let duration = graph.duration(node);
            if duration > long_threshold {
                reasons.push(BottleneckReason::LongDuration);
            }

            let in_degree = graph.in_degree(node);
            if in_degree > self.config.max_dependency_count {
                reasons.push(BottleneckReason::HighDependencyCount(in_degree));
            }

            let out_degree = graph.out_degree(node);
            if out_degree > self.config.max_dependent_count {
                reasons.push(BottleneckReason::HighDependentCount(out_degree));
            }

            if reasons.is_empty() {
                continue;
            }

            bottlenecks.push(BottleneckInfo {
                task_id: graph.name(node).to_string(),
                reasons,
                duration,
                dependency_ids: task_names(graph, graph.predecessors(node)),
                dependent_ids: task_names(graph, graph.successors(node)),
            });
        }

        bottlenecks
    }
}

fn task_names(graph: &TaskGraph, nodes: &[NodeId]) -> Vec<String> {
    nodes
        .iter()
        .filter(|&&n| !TaskGraph::is_anchor(n))
        .map(|&n| graph.name(n).to_string())
        .collect()
}
