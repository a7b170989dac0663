//! Error types for task graph analysis.

use thiserror::Error;

/// Conditions raised while building or analyzing a task graph.
///
/// Only [`GraphError::Cyclic`] aborts an analysis. The other variants are
/// informational and travel inside `AnalysisResult::conditions`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphError {
    /// The dependency graph contains a cycle. `nodes` is one witness cycle in
    /// dependency order; the last node depends back on the first.
    #[error("Circular dependency detected in task graph: {}", format_cycle(.nodes))]
    Cyclic { nodes: Vec<String> },

    /// No tasks were supplied.
    #[error("Task graph is empty")]
    Empty,

    /// No start-to-end chain exists through the critical tasks; the path
    /// returned is the unordered set of critical tasks.
    #[error("Critical tasks do not form a connected path: {critical_tasks:?}")]
    Disconnected { critical_tasks: Vec<String> },
}

impl GraphError {
    /// Whether this condition aborts the analysis.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GraphError::Cyclic { .. })
    }
}

fn format_cycle(nodes: &[String]) -> String {
    match nodes.first() {
        Some(first) => {
            let mut chain = nodes.join(" -> ");
            chain.push_str(" -> ");
            chain.push_str(first);
            chain
        }
        None => "<unknown>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_message_closes_loop() {
        let err = GraphError::Cyclic {
            nodes: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Circular dependency detected in task graph: a -> b -> a"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_informational_conditions_not_fatal() {
        assert!(!GraphError::Empty.is_fatal());
        assert!(!GraphError::Disconnected {
            critical_tasks: vec!["x".to_string()]
        }
        .is_fatal());
    }
}
