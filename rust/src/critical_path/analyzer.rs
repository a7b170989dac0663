//! End-to-end critical path analysis.
//!
//! Runs builder -> schedule -> slack -> extraction -> bottlenecks and packs
//! the outcome into an [`AnalysisResult`]. Every call builds its own graph,
//! so analyses share no state and can run on separate threads.

use rustc_hash::FxHashMap;

use crate::config::AnalysisConfig;
use crate::error::GraphError;
use crate::graph::{TaskGraph, TaskGraphBuilder};
use crate::models::{AnalysisResult, TaskDescriptor};
use crate::{log_changes, log_checks};

use super::bottleneck::BottleneckDetector;
use super::extraction::CriticalPathExtractor;
use super::schedule::ScheduleComputer;
use super::slack::SlackAnalyzer;
use super::types::TaskTiming;

/// Critical path analyzer bound to one configuration.
#[derive(Clone, Debug, Default)]
pub struct CriticalPathAnalyzer {
    config: AnalysisConfig,
}

impl CriticalPathAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a task collection.
    ///
    /// # Returns
    /// * `Ok(AnalysisResult)`, possibly carrying warnings and informational conditions
    /// * `Err(GraphError::Cyclic)` if the dependency graph has a cycle
    pub fn analyze(&self, tasks: &[TaskDescriptor]) -> Result<AnalysisResult, GraphError> {
        self.analyze_with_graph(tasks).map(|(_, result)| result)
    }

    /// Like [`analyze`](Self::analyze), also handing back the graph for
    /// diagnostic export.
    pub fn analyze_with_graph(
        &self,
        tasks: &[TaskDescriptor],
    ) -> Result<(TaskGraph, AnalysisResult), GraphError> {
        let config = &self.config;
        let verbosity = config.verbosity;

        log_changes!(verbosity, task_count = tasks.len(), "Analyzing critical path");

        let built = TaskGraphBuilder::new(config).build(tasks);
        let graph = built.graph;
        let mut result = AnalysisResult {
            warnings: built.warnings,
            total_tasks: graph.task_count(),
            ..AnalysisResult::default()
        };

        if graph.is_empty() {
            log_changes!(verbosity, "No tasks to analyze");
            result.conditions.push(GraphError::Empty);
            return Ok((graph, result));
        }

        let times = ScheduleComputer::new(verbosity).compute(&graph)?;
        let slack = SlackAnalyzer::new(config).analyze(&graph, &times);
        let path = CriticalPathExtractor::new(config).extract(&graph, &times, &slack);

        let critical_tasks: Vec<String> = slack
            .critical_nodes(&graph)
            .map(|n| graph.name(n).to_string())
            .collect();

        if !path.connected {
            tracing::warn!(
                critical_tasks = ?critical_tasks,
                "Could not find a complete critical path"
            );
            result.conditions.push(GraphError::Disconnected {
                critical_tasks: critical_tasks.clone(),
            });
        }

        result.bottlenecks = BottleneckDetector::new(config).detect(&graph, &path.nodes);

        let mut schedule: FxHashMap<String, TaskTiming> =
            FxHashMap::with_capacity_and_hasher(graph.task_count(), Default::default());
        for node in graph.task_nodes() {
            let idx = node as usize;
            schedule.insert(
                graph.name(node).to_string(),
                TaskTiming {
                    earliest_start: times.earliest_start[idx],
                    earliest_finish: times.earliest_finish[idx],
                    latest_start: times.latest_start[idx],
                    latest_finish: times.latest_finish[idx],
                    slack: slack.slack(node),
                },
            );
        }

        // First descriptor per id, matching the graph's duplicate handling
        let mut descriptors: FxHashMap<&str, &TaskDescriptor> =
            FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
        for task in tasks {
            descriptors.entry(task.id.as_str()).or_insert(task);
        }

        result.critical_path = path
            .nodes
            .iter()
            .map(|&n| graph.name(n).to_string())
            .collect();
        result.critical_path_tasks = result
            .critical_path
            .iter()
            .filter_map(|id| descriptors.get(id.as_str()).map(|t| (*t).clone()))
            .collect();
        result.critical_path_duration = path.duration;
        result.project_duration = times.project_duration();
        result.critical_task_count = result.critical_path.len();
        result.critical_ratio = result.critical_task_count as f64 / result.total_tasks as f64;
        result.critical_tasks = critical_tasks;
        result.schedule = schedule;

        log_checks!(
            verbosity,
            critical_path = ?result.critical_path,
            bottlenecks = result.bottlenecks.len(),
            "Critical path identified"
        );
        log_changes!(
            verbosity,
            duration = result.critical_path_duration,
            "Critical path analysis complete"
        );

        Ok((graph, result))
    }
}

/// Analyze `tasks` with `config`.
///
/// Convenience wrapper around [`CriticalPathAnalyzer::analyze`].
pub fn analyze_critical_path(
    tasks: &[TaskDescriptor],
    config: &AnalysisConfig,
) -> Result<AnalysisResult, GraphError> {
    CriticalPathAnalyzer::new(config.clone()).analyze(tasks)
}
