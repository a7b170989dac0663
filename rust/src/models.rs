//! Input and output data types for critical path analysis.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;

use crate::config::AnalysisConfig;
use crate::critical_path::{BottleneckInfo, TaskTiming};
use crate::error::GraphError;

/// Unit a task duration is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DurationUnit {
    Hours,
    Days,
    Weeks,
}

impl DurationUnit {
    /// Convert `value` in this unit to hours.
    pub fn to_hours(self, value: f64, config: &AnalysisConfig) -> f64 {
        match self {
            DurationUnit::Hours => value,
            DurationUnit::Days => value * config.hours_per_day,
            DurationUnit::Weeks => value * config.hours_per_week,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DurationUnit::Hours => "hours",
            DurationUnit::Days => "days",
            DurationUnit::Weeks => "weeks",
        }
    }
}

impl FromStr for DurationUnit {
    type Err = String;

    /// Case-insensitive; accepts singular and abbreviated hour spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" | "hours" | "hr" | "hrs" => Ok(DurationUnit::Hours),
            "day" | "days" => Ok(DurationUnit::Days),
            "week" | "weeks" => Ok(DurationUnit::Weeks),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as supplied by the caller. Read-only to the analyzer.
#[cfg_attr(feature = "python", pyclass)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct TaskDescriptor {
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub id: String,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub duration: f64,
    /// Free-form unit label; parsed with [`DurationUnit::from_str`].
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub duration_unit: String,
    /// Ids of tasks that must finish before this one starts.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub dependencies: Vec<String>,
}

impl TaskDescriptor {
    pub fn new(
        id: impl Into<String>,
        duration: f64,
        duration_unit: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            duration,
            duration_unit: duration_unit.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for a task measured in hours.
    pub fn hours(
        id: impl Into<String>,
        duration: f64,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(id, duration, DurationUnit::Hours.as_str(), dependencies)
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl TaskDescriptor {
    #[new]
    #[pyo3(signature = (id, duration, duration_unit="hours".to_string(), dependencies=Vec::new()))]
    fn py_new(id: String, duration: f64, duration_unit: String, dependencies: Vec<String>) -> Self {
        Self {
            id,
            duration,
            duration_unit,
            dependencies,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskDescriptor(id={:?}, duration={}, duration_unit={:?}, deps={})",
            self.id,
            self.duration,
            self.duration_unit,
            self.dependencies.len()
        )
    }
}

/// A locally recovered input problem. Never fails the analysis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalysisWarning {
    /// Unit label not recognised; the duration was taken as hours.
    UnknownDurationUnit { task_id: String, unit: String },
    /// Negative or non-finite duration; clamped to zero.
    InvalidDuration { task_id: String, value: f64 },
    /// A later descriptor reused an id already seen; it was ignored.
    DuplicateTaskId { task_id: String },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDurationUnit { task_id, unit } => write!(
                f,
                "Unknown duration unit {:?} on task {}, defaulting to hours",
                unit, task_id
            ),
            Self::InvalidDuration { task_id, value } => {
                write!(f, "Invalid duration {} on task {}, using 0", value, task_id)
            }
            Self::DuplicateTaskId { task_id } => {
                write!(f, "Duplicate task id {}, keeping the first", task_id)
            }
        }
    }
}

/// Everything one analysis produces. Owned by the caller once returned.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    /// Critical task ids from first to last, anchors excluded.
    pub critical_path: Vec<String>,
    /// Input descriptors of the critical path tasks, in path order.
    pub critical_path_tasks: Vec<TaskDescriptor>,
    /// Sum of durations (hours) along `critical_path`.
    pub critical_path_duration: f64,
    /// Earliest finish of the whole project (hours).
    pub project_duration: f64,
    /// Every zero-slack task, in input order.
    pub critical_tasks: Vec<String>,
    /// Per-task timings keyed by task id.
    pub schedule: FxHashMap<String, TaskTiming>,
    pub bottlenecks: Vec<BottleneckInfo>,
    pub total_tasks: usize,
    /// Length of `critical_path`.
    pub critical_task_count: usize,
    pub critical_ratio: f64,
    pub warnings: Vec<AnalysisWarning>,
    /// Informational conditions (`Empty`, `Disconnected`).
    pub conditions: Vec<GraphError>,
}

impl AnalysisResult {
    pub fn earliest_start(&self) -> FxHashMap<String, f64> {
        self.project(|t| t.earliest_start)
    }

    pub fn earliest_finish(&self) -> FxHashMap<String, f64> {
        self.project(|t| t.earliest_finish)
    }

    pub fn latest_start(&self) -> FxHashMap<String, f64> {
        self.project(|t| t.latest_start)
    }

    pub fn latest_finish(&self) -> FxHashMap<String, f64> {
        self.project(|t| t.latest_finish)
    }

    pub fn slack(&self) -> FxHashMap<String, f64> {
        self.project(|t| t.slack)
    }

    /// Whether `task_id` has zero slack.
    pub fn is_critical(&self, task_id: &str) -> bool {
        self.critical_tasks.iter().any(|id| id == task_id)
    }

    /// Task ids with positive slack, sorted.
    pub fn non_critical_tasks(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .schedule
            .keys()
            .filter(|id| !self.is_critical(id))
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Whether the critical path search fell back to the unordered set.
    pub fn is_disconnected(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| matches!(c, GraphError::Disconnected { .. }))
    }

    fn project(&self, field: impl Fn(&TaskTiming) -> f64) -> FxHashMap<String, f64> {
        self.schedule
            .iter()
            .map(|(id, timing)| (id.clone(), field(timing)))
            .collect()
    }
}
