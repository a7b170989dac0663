//! Configuration types for critical path analysis.

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Tuning knobs for a single analysis run.
#[cfg_attr(feature = "python", pyclass)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Hours in one working day (`days` unit conversion).
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub hours_per_day: f64,
    /// Hours in one working week (`weeks` unit conversion).
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub hours_per_week: f64,
    /// Slack at or below this magnitude counts as zero. 0.0 means exact equality.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub slack_epsilon: f64,
    /// A critical task longer than this multiple of the critical-path mean is a bottleneck.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub long_duration_factor: f64,
    /// In-degree above this flags a bottleneck.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub max_dependency_count: usize,
    /// Out-degree above this flags a bottleneck.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub max_dependent_count: usize,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub verbosity: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hours_per_day: 8.0,
            hours_per_week: 40.0,
            slack_epsilon: 0.0,
            long_duration_factor: 1.5,
            max_dependency_count: 2,
            max_dependent_count: 2,
            verbosity: 0,
        }
    }
}

impl AnalysisConfig {
    /// Whether a slack value is treated as zero.
    #[inline]
    pub fn is_zero_slack(&self, slack: f64) -> bool {
        if self.slack_epsilon > 0.0 {
            slack.abs() <= self.slack_epsilon
        } else {
            slack == 0.0
        }
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl AnalysisConfig {
    #[new]
    #[pyo3(signature = (
        hours_per_day=None,
        hours_per_week=None,
        slack_epsilon=None,
        long_duration_factor=None,
        max_dependency_count=None,
        max_dependent_count=None,
        verbosity=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn py_new(
        hours_per_day: Option<f64>,
        hours_per_week: Option<f64>,
        slack_epsilon: Option<f64>,
        long_duration_factor: Option<f64>,
        max_dependency_count: Option<usize>,
        max_dependent_count: Option<usize>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            hours_per_day: hours_per_day.unwrap_or(defaults.hours_per_day),
            hours_per_week: hours_per_week.unwrap_or(defaults.hours_per_week),
            slack_epsilon: slack_epsilon.unwrap_or(defaults.slack_epsilon),
            long_duration_factor: long_duration_factor.unwrap_or(defaults.long_duration_factor),
            max_dependency_count: max_dependency_count.unwrap_or(defaults.max_dependency_count),
            max_dependent_count: max_dependent_count.unwrap_or(defaults.max_dependent_count),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AnalysisConfig(hours_per_day={}, hours_per_week={}, slack_epsilon={}, verbosity={})",
            self.hours_per_day, self.hours_per_week, self.slack_epsilon, self.verbosity
        )
    }
}
