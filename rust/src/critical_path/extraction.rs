//! Ordered critical path extraction.

use crate::config::AnalysisConfig;
use crate::graph::{TaskGraph, END, START};
use crate::interner::NodeId;
use crate::log_debug;

use super::schedule::ScheduleTimes;
use super::slack::SlackMap;

/// Critical path between the anchors, anchors stripped.
#[derive(Clone, Debug, PartialEq)]
pub struct CriticalPath {
    pub nodes: Vec<NodeId>,
    /// Sum of node durations along `nodes` (hours).
    pub duration: f64,
    /// False when no start-to-end chain was found and `nodes` is the
    /// unordered set of critical tasks instead.
    pub connected: bool,
}

pub struct CriticalPathExtractor<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> CriticalPathExtractor<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Find a start-to-end path through critical tasks.
    ///
    /// Only tight edges are followed: `u -> v` where `u` finishes exactly
    /// when `v` can earliest start. Any such chain spans the whole project,
    /// so its duration equals the project duration.
    pub fn extract(
        &self,
        graph: &TaskGraph,
        times: &ScheduleTimes,
        slack: &SlackMap,
    ) -> CriticalPath {
        if graph.is_empty() {
            return CriticalPath {
                nodes: Vec::new(),
                duration: 0.0,
                connected: true,
            };
        }

        let on_critical_subgraph =
            |node: NodeId| node == START || node == END || slack.is_critical(node);
        let is_tight = |u: NodeId, v: NodeId| {
            let gap = times.earliest_start[v as usize] - times.earliest_finish[u as usize];
            self.config.is_zero_slack(gap)
        };

        let found =
            graph.shortest_path(START, END, |u, v| on_critical_subgraph(v) && is_tight(u, v));

        let (nodes, connected) = match found {
            Some(path) => {
                let inner: Vec<NodeId> = path
                    .into_iter()
                    .filter(|&n| !TaskGraph::is_anchor(n))
                    .collect();
                (inner, true)
            }
            None => (slack.critical_nodes(graph).collect(), false),
        };

        let duration: f64 = nodes.iter().map(|&n| graph.duration(n)).sum();

        log_debug!(
            self.config.verbosity,
            length = nodes.len(),
            duration,
            connected,
            "Critical path extracted"
        );

        CriticalPath {
            nodes,
            duration,
            connected,
        }
    }
}
