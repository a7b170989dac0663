//! Forward and backward passes over the task graph.

use crate::error::GraphError;
use crate::graph::{TaskGraph, END, START};
use crate::interner::NodeId;
use crate::log_debug;

/// Earliest and latest times for every node, anchors included. Hours.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleTimes {
    /// Topological order the passes ran in.
    pub order: Vec<NodeId>,
    pub earliest_start: Vec<f64>,
    pub earliest_finish: Vec<f64>,
    pub latest_start: Vec<f64>,
    pub latest_finish: Vec<f64>,
    /// Total float, carried backward from `end`. Exactly zero along tight edges.
    pub slack: Vec<f64>,
}

impl ScheduleTimes {
    /// Minimum project duration: earliest finish of the end anchor.
    pub fn project_duration(&self) -> f64 {
        self.earliest_finish[END as usize]
    }
}

/// Computes earliest/latest start and finish times.
pub struct ScheduleComputer {
    verbosity: u8,
}

impl ScheduleComputer {
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    /// Run both passes. Fails only when the graph has no topological order.
    pub fn compute(&self, graph: &TaskGraph) -> Result<ScheduleTimes, GraphError> {
        let order = graph.topological_order()?;
        let n = graph.node_count();

        // Forward pass: earliest times in topological order
        let mut earliest_start = vec![0.0; n];
        let mut earliest_finish = vec![0.0; n];

        for &node in &order {
            let idx = node as usize;
            if node == START {
                continue;
            }
            let start = graph
                .predecessors(node)
                .iter()
                .map(|&p| earliest_finish[p as usize])
                .fold(0.0, f64::max);
            earliest_start[idx] = start;
            earliest_finish[idx] = start + graph.duration(node);

            log_debug!(
                self.verbosity,
                task_id = graph.name(node),
                earliest_start = start,
                earliest_finish = earliest_finish[idx],
                "Forward pass"
            );
        }

        // Backward pass: total float in reverse topological order, latest
        // times derived from it
        let project_end = earliest_finish[END as usize];
        let mut slack = vec![0.0; n];
        let mut latest_start = vec![0.0; n];
        let mut latest_finish = vec![0.0; n];
        latest_start[END as usize] = project_end;
        latest_finish[END as usize] = project_end;

        for &node in order.iter().rev() {
            let idx = node as usize;
            if node == END {
                continue;
            }
            let float = graph
                .successors(node)
                .iter()
                .map(|&s| {
                    let gap = earliest_start[s as usize] - earliest_finish[idx];
                    slack[s as usize] + gap
                })
                .reduce(f64::min)
                // Only reachable for nodes not wired to `end`
                .unwrap_or(project_end - earliest_finish[idx]);
            slack[idx] = float;
            latest_start[idx] = earliest_start[idx] + float;
            latest_finish[idx] = earliest_finish[idx] + float;

            log_debug!(
                self.verbosity,
                task_id = graph.name(node),
                latest_start = latest_start[idx],
                latest_finish = latest_finish[idx],
                slack = float,
                "Backward pass"
            );
        }

        Ok(ScheduleTimes {
            order,
            earliest_start,
            earliest_finish,
            latest_start,
            latest_finish,
            slack,
        })
    }
}
