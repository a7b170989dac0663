//! Builds a [`TaskGraph`] from caller task descriptors.

use crate::config::AnalysisConfig;
use crate::interner::NodeId;
use crate::models::{AnalysisWarning, DurationUnit, TaskDescriptor};
use crate::log_debug;

use super::{TaskGraph, END, START};

/// Graph plus the input problems that were recovered while building it.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub graph: TaskGraph,
    pub warnings: Vec<AnalysisWarning>,
}

/// Converts task descriptors into an anchored dependency graph.
///
/// Building never fails. Cycles are left in place for the schedule pass to
/// detect when it orders the graph.
pub struct TaskGraphBuilder<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> TaskGraphBuilder<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, tasks: &[TaskDescriptor]) -> BuildOutput {
        let verbosity = self.config.verbosity;
        let mut graph = TaskGraph::with_capacity(tasks.len());
        let mut warnings = Vec::new();

        // First pass: nodes, so dependencies can refer forward
        let mut accepted: Vec<(NodeId, &TaskDescriptor)> = Vec::with_capacity(tasks.len());
        for task in tasks {
            let duration = self.duration_hours(task, &mut warnings);
            match graph.add_node(&task.id, duration) {
                Some(node) => accepted.push((node, task)),
                None => {
                    tracing::warn!(task_id = %task.id, "Duplicate task id, keeping the first");
                    warnings.push(AnalysisWarning::DuplicateTaskId {
                        task_id: task.id.clone(),
                    });
                }
            }
        }

        // Second pass: dependency edges
        for &(node, task) in &accepted {
            let mut has_valid_dependency = false;
            for dep_id in &task.dependencies {
                match graph.node_id(dep_id) {
                    Some(dep) => {
                        graph.add_edge(dep, node);
                        has_valid_dependency = true;
                    }
                    None => {
                        tracing::debug!(
                            task_id = %task.id,
                            dependency = %dep_id,
                            "Dropping unknown dependency"
                        );
                    }
                }
            }
            if !has_valid_dependency {
                graph.add_edge(START, node);
            }
        }

        // Terminal tasks feed the end anchor
        let terminals: Vec<NodeId> = graph
            .task_nodes()
            .filter(|&node| graph.out_degree(node) == 0)
            .collect();
        for node in terminals {
            log_debug!(verbosity, task_id = graph.name(node), "Terminal task");
            graph.add_edge(node, END);
        }

        BuildOutput { graph, warnings }
    }

    /// Task duration normalised to hours.
    fn duration_hours(&self, task: &TaskDescriptor, warnings: &mut Vec<AnalysisWarning>) -> f64 {
        let unit = match task.duration_unit.parse::<DurationUnit>() {
            Ok(unit) => unit,
            Err(unit) => {
                tracing::warn!(
                    task_id = %task.id,
                    unit = %unit,
                    "Unknown duration unit, defaulting to hours"
                );
                warnings.push(AnalysisWarning::UnknownDurationUnit {
                    task_id: task.id.clone(),
                    unit,
                });
                DurationUnit::Hours
            }
        };

        if !task.duration.is_finite() || task.duration < 0.0 {
            tracing::warn!(
                task_id = %task.id,
                duration = task.duration,
                "Invalid task duration, using 0"
            );
            warnings.push(AnalysisWarning::InvalidDuration {
                task_id: task.id.clone(),
                value: task.duration,
            });
            return 0.0;
        }

        unit.to_hours(task.duration, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, duration: f64, unit: &str, deps: &[&str]) -> TaskDescriptor {
        TaskDescriptor::new(id, duration, unit, deps.iter().copied())
    }

    fn build(tasks: &[TaskDescriptor]) -> BuildOutput {
        TaskGraphBuilder::new(&AnalysisConfig::default()).build(tasks)
    }

    fn names(graph: &TaskGraph, nodes: &[NodeId]) -> Vec<String> {
        nodes.iter().map(|&n| graph.name(n).to_string()).collect()
    }

    #[test]
    fn test_empty_input_has_only_anchors() {
        let out = build(&[]);
        assert!(out.graph.is_empty());
        assert_eq!(out.graph.node_count(), 2);
        assert_eq!(out.graph.edges().count(), 0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_anchor_wiring() {
        let tasks = vec![
            make_task("a", 2.0, "hours", &[]),
            make_task("b", 3.0, "hours", &["a"]),
            make_task("c", 1.0, "hours", &["a"]),
        ];
        let out = build(&tasks);
        let g = &out.graph;
        let a = g.node_id("a").unwrap();
        let b = g.node_id("b").unwrap();
        let c = g.node_id("c").unwrap();

        assert_eq!(names(g, g.successors(START)), vec!["a"]);
        assert_eq!(names(g, g.successors(a)), vec!["b", "c"]);
        assert_eq!(g.successors(b), &[END]);
        assert_eq!(g.successors(c), &[END]);
        assert_eq!(g.in_degree(END), 2);
    }

    #[test]
    fn test_duration_units_normalised() {
        let tasks = vec![
            make_task("h", 3.0, "HRS", &[]),
            make_task("d", 2.0, "days", &[]),
            make_task("w", 1.0, "Weeks", &[]),
        ];
        let out = build(&tasks);
        let g = &out.graph;
        assert_eq!(g.duration(g.node_id("h").unwrap()), 3.0);
        assert_eq!(g.duration(g.node_id("d").unwrap()), 16.0);
        assert_eq!(g.duration(g.node_id("w").unwrap()), 40.0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_custom_workday_length() {
        let config = AnalysisConfig {
            hours_per_day: 6.0,
            ..AnalysisConfig::default()
        };
        let out = TaskGraphBuilder::new(&config).build(&[make_task("d", 2.0, "days", &[])]);
        assert_eq!(out.graph.duration(out.graph.node_id("d").unwrap()), 12.0);
    }

    #[test]
    fn test_unknown_unit_falls_back_to_hours() {
        let out = build(&[make_task("a", 5.0, "sprints", &[])]);
        assert_eq!(out.graph.duration(out.graph.node_id("a").unwrap()), 5.0);
        assert_eq!(
            out.warnings,
            vec![AnalysisWarning::UnknownDurationUnit {
                task_id: "a".to_string(),
                unit: "sprints".to_string(),
            }]
        );
    }

    #[test]
    fn test_negative_duration_clamped() {
        let out = build(&[make_task("a", -4.0, "hours", &[])]);
        assert_eq!(out.graph.duration(out.graph.node_id("a").unwrap()), 0.0);
        assert!(matches!(
            out.warnings.as_slice(),
            [AnalysisWarning::InvalidDuration { task_id, .. }] if task_id == "a"
        ));
    }

    #[test]
    fn test_unknown_dependencies_dropped_silently() {
        let tasks = vec![
            make_task("a", 1.0, "hours", &[]),
            make_task("b", 1.0, "hours", &["a", "ghost"]),
            make_task("c", 1.0, "hours", &["phantom"]),
        ];
        let out = build(&tasks);
        let g = &out.graph;
        let b = g.node_id("b").unwrap();
        let c = g.node_id("c").unwrap();

        assert_eq!(names(g, g.predecessors(b)), vec!["a"]);
        // Only unknown deps: treated as having none
        assert_eq!(g.predecessors(c), &[START]);
        assert!(out.warnings.is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_dependency_logged_at_default_verbosity() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            build(&[make_task("b", 1.0, "hours", &["ghost"])]);
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Dropping unknown dependency"), "{}", output);
        assert!(output.contains("ghost"));
    }

    #[test]
    fn test_forward_reference_dependency() {
        let tasks = vec![
            make_task("b", 1.0, "hours", &["a"]),
            make_task("a", 1.0, "hours", &[]),
        ];
        let out = build(&tasks);
        let g = &out.graph;
        assert_eq!(names(g, g.predecessors(g.node_id("b").unwrap())), vec!["a"]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let tasks = vec![
            make_task("a", 1.0, "hours", &[]),
            make_task("a", 9.0, "hours", &[]),
        ];
        let out = build(&tasks);
        assert_eq!(out.graph.task_count(), 1);
        assert_eq!(out.graph.duration(out.graph.node_id("a").unwrap()), 1.0);
        assert_eq!(
            out.warnings,
            vec![AnalysisWarning::DuplicateTaskId {
                task_id: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_repeated_dependency_is_one_edge() {
        let tasks = vec![
            make_task("a", 1.0, "hours", &[]),
            make_task("b", 1.0, "hours", &["a", "a"]),
        ];
        let out = build(&tasks);
        assert_eq!(out.graph.in_degree(out.graph.node_id("b").unwrap()), 1);
    }

    #[test]
    fn test_input_not_mutated() {
        let tasks = vec![make_task("a", 2.0, "days", &["missing"])];
        let before = tasks.clone();
        let _ = build(&tasks);
        assert_eq!(tasks, before);
    }
}
