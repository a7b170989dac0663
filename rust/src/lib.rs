//! Critical path analysis for task dependency graphs.
//!
//! Given tasks with durations and dependencies, computes the minimum project
//! duration, per-task slack, an ordered critical path, and bottleneck tasks
//! on that path.
//!
//! ```
//! use critpath::{analyze_critical_path, AnalysisConfig, TaskDescriptor};
//!
//! let tasks = vec![
//!     TaskDescriptor::hours("design", 4.0, Vec::<String>::new()),
//!     TaskDescriptor::new("build", 2.0, "days", ["design"]),
//!     TaskDescriptor::hours("review", 2.0, ["design"]),
//! ];
//! let result = analyze_critical_path(&tasks, &AnalysisConfig::default()).unwrap();
//! assert_eq!(result.critical_path, vec!["design", "build"]);
//! assert_eq!(result.critical_path_duration, 20.0);
//! ```

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

mod config;
pub mod critical_path;
mod error;
pub mod export;
pub mod graph;
mod interner;
pub mod logging;
mod models;
#[cfg(feature = "python")]
mod python;

pub use config::AnalysisConfig;
pub use critical_path::{
    analyze_critical_path, BottleneckInfo, BottleneckReason, CriticalPathAnalyzer, TaskTiming,
};
pub use error::GraphError;
pub use export::GraphSnapshot;
pub use graph::{TaskGraph, TaskGraphBuilder};
pub use interner::NodeId;
pub use models::{AnalysisResult, AnalysisWarning, DurationUnit, TaskDescriptor};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_result_serializes() {
        let tasks = vec![
            TaskDescriptor::hours("a", 2.0, Vec::<String>::new()),
            TaskDescriptor::hours("b", 3.0, ["a"]),
        ];
        let result = analyze_critical_path(&tasks, &AnalysisConfig::default()).unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["critical_path"], serde_json::json!(["a", "b"]));
        assert_eq!(json["schedule"]["b"]["earliest_start"], 2.0);

        let back: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_descriptor_deserializes() {
        let task: TaskDescriptor = serde_json::from_str(
            r#"{"id":"x","duration":1.5,"duration_unit":"days","dependencies":["y"]}"#,
        )
        .unwrap();
        assert_eq!(task, TaskDescriptor::new("x", 1.5, "days", ["y"]));
    }
}
