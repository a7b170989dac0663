//! Types for critical path analysis.

use std::fmt;

/// Per-task timing information produced by the forward and backward passes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: f64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: f64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: f64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: f64,
    /// Slack = latest_start - earliest_start.
    pub slack: f64,
}

/// Why a critical task was flagged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BottleneckReason {
    /// Duration well above the critical-path mean.
    LongDuration,
    /// Many direct prerequisites (in-degree).
    HighDependencyCount(usize),
    /// Many direct dependents (out-degree).
    HighDependentCount(usize),
}

impl BottleneckReason {
    /// Stable machine-readable tag.
    pub fn code(&self) -> &'static str {
        match self {
            Self::LongDuration => "long_duration",
            Self::HighDependencyCount(_) => "high_dependency_count",
            Self::HighDependentCount(_) => "high_dependent_count",
        }
    }
}

impl fmt::Display for BottleneckReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LongDuration => f.write_str(self.code()),
            Self::HighDependencyCount(n) | Self::HighDependentCount(n) => {
                write!(f, "{} ({})", self.code(), n)
            }
        }
    }
}

/// A structurally risky task on the critical path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BottleneckInfo {
    pub task_id: String,
    pub reasons: Vec<BottleneckReason>,
    /// Duration in hours.
    pub duration: f64,
    /// Direct prerequisites, anchors excluded.
    pub dependency_ids: Vec<String>,
    /// Direct dependents, anchors excluded.
    pub dependent_ids: Vec<String>,
}

impl BottleneckInfo {
    pub fn has_reason(&self, code: &str) -> bool {
        self.reasons.iter().any(|r| r.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_rendering() {
        assert_eq!(BottleneckReason::LongDuration.to_string(), "long_duration");
        assert_eq!(
            BottleneckReason::HighDependencyCount(3).to_string(),
            "high_dependency_count (3)"
        );
        assert_eq!(
            BottleneckReason::HighDependentCount(4).to_string(),
            "high_dependent_count (4)"
        );
    }

    #[test]
    fn test_has_reason() {
        let info = BottleneckInfo {
            task_id: "a".to_string(),
            reasons: vec![BottleneckReason::HighDependentCount(3)],
            duration: 1.0,
            dependency_ids: vec![],
            dependent_ids: vec!["b".to_string(), "c".to_string(), "d".to_string()],
        };
        assert!(info.has_reason("high_dependent_count"));
        assert!(!info.has_reason("long_duration"));
    }
}
