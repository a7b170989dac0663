//! Critical path analysis.
//!
//! Forward and backward passes over the anchored task graph yield per-task
//! slack; zero-slack tasks form the critical path, and the critical tasks
//! with outsized duration or fan-in/fan-out are reported as bottlenecks.

mod analyzer;
mod bottleneck;
mod extraction;
mod schedule;
mod slack;
mod types;

pub use analyzer::{analyze_critical_path, CriticalPathAnalyzer};
pub use bottleneck::BottleneckDetector;
pub use extraction::{CriticalPath, CriticalPathExtractor};
pub use schedule::{ScheduleComputer, ScheduleTimes};
pub use slack::{SlackAnalyzer, SlackMap};
pub use types::{BottleneckInfo, BottleneckReason, TaskTiming};
