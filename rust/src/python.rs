//! Python bindings for the critical path analyzer.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::critical_path::CriticalPathAnalyzer;
use crate::export::GraphSnapshot;
use crate::models::{AnalysisResult, TaskDescriptor};
use crate::AnalysisConfig;

fn result_to_dict<'py>(py: Python<'py>, result: &AnalysisResult) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("critical_path", result.critical_path.clone())?;
    dict.set_item("critical_path_duration", result.critical_path_duration)?;
    dict.set_item("project_duration", result.project_duration)?;
    dict.set_item("critical_tasks", result.critical_tasks.clone())?;
    dict.set_item("earliest_start", result.earliest_start())?;
    dict.set_item("earliest_finish", result.earliest_finish())?;
    dict.set_item("latest_start", result.latest_start())?;
    dict.set_item("latest_finish", result.latest_finish())?;
    dict.set_item("slack", result.slack())?;
    dict.set_item("total_tasks", result.total_tasks)?;
    dict.set_item("critical_task_count", result.critical_task_count)?;
    dict.set_item("critical_ratio", result.critical_ratio)?;

    let bottlenecks = PyList::empty_bound(py);
    for info in &result.bottlenecks {
        let entry = PyDict::new_bound(py);
        entry.set_item("task_id", &info.task_id)?;
        entry.set_item(
            "reasons",
            info.reasons.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
        )?;
        entry.set_item("duration", info.duration)?;
        entry.set_item("dependencies", info.dependency_ids.clone())?;
        entry.set_item("dependents", info.dependent_ids.clone())?;
        bottlenecks.append(entry)?;
    }
    dict.set_item("bottlenecks", bottlenecks)?;

    dict.set_item(
        "warnings",
        result.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
    )?;
    dict.set_item(
        "conditions",
        result.conditions.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
    )?;

    Ok(dict)
}

/// Analyze a task list and return the result as a dict.
///
/// # Raises
/// * ValueError if the dependency graph has a cycle
#[pyfunction]
#[pyo3(signature = (tasks, config=None))]
fn analyze_critical_path(
    py: Python<'_>,
    tasks: Vec<TaskDescriptor>,
    config: Option<AnalysisConfig>,
) -> PyResult<Py<PyDict>> {
    let analyzer = CriticalPathAnalyzer::new(config.unwrap_or_default());
    let result = analyzer
        .analyze(&tasks)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(result_to_dict(py, &result)?.unbind())
}

/// Analyze a task list and render the graph as a Mermaid flowchart.
///
/// # Raises
/// * ValueError if the dependency graph has a cycle
#[pyfunction]
#[pyo3(signature = (tasks, config=None, direction=None))]
fn critical_path_mermaid(
    tasks: Vec<TaskDescriptor>,
    config: Option<AnalysisConfig>,
    direction: Option<String>,
) -> PyResult<String> {
    let analyzer = CriticalPathAnalyzer::new(config.unwrap_or_default());
    let (graph, result) = analyzer
        .analyze_with_graph(&tasks)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(GraphSnapshot::from_analysis(&graph, &result).to_mermaid(direction.as_deref()))
}

/// The critpath Python module.
#[pymodule]
fn critpath(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<TaskDescriptor>()?;
    m.add_class::<AnalysisConfig>()?;

    m.add_function(wrap_pyfunction!(analyze_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(critical_path_mermaid, m)?)?;

    Ok(())
}
