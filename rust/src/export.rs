//! Read-only projection of an analyzed graph for external visualization.
//!
//! Not a stable interface; fields may change between releases.

use rustc_hash::FxHashSet;

use crate::graph::{TaskGraph, END, START};
use crate::models::AnalysisResult;

/// A node in the snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotNode {
    pub id: String,
    /// Duration in hours.
    pub duration: f64,
    /// Zero-slack task.
    pub critical: bool,
    /// Synthetic `start`/`end` node.
    pub anchor: bool,
}

/// An edge in the snapshot, indices into `GraphSnapshot::nodes`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotEdge {
    pub from: usize,
    pub to: usize,
    /// Consecutive hop on the extracted critical path (anchors included).
    pub on_critical_path: bool,
}

/// Node/edge dump of one analysis.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSnapshot {
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
}

impl GraphSnapshot {
    /// Project `graph` and the analysis computed from it.
    pub fn from_analysis(graph: &TaskGraph, result: &AnalysisResult) -> Self {
        let critical: FxHashSet<&str> = result.critical_tasks.iter().map(String::as_str).collect();

        let nodes = (0..graph.node_count() as u32)
            .map(|node| {
                let anchor = TaskGraph::is_anchor(node);
                let id = graph.name(node);
                SnapshotNode {
                    id: id.to_string(),
                    duration: graph.duration(node),
                    critical: !anchor && critical.contains(id),
                    anchor,
                }
            })
            .collect();

        // Hops along the path, anchors included, when the path is a real chain
        let mut hops: FxHashSet<(u32, u32)> = FxHashSet::default();
        if !result.is_disconnected() && !result.critical_path.is_empty() {
            let mut chain = vec![START];
            chain.extend(
                result
                    .critical_path
                    .iter()
                    .filter_map(|id| graph.node_id(id)),
            );
            chain.push(END);
            hops.extend(chain.windows(2).map(|w| (w[0], w[1])));
        }

        let edges = graph
            .edges()
            .map(|(from, to)| SnapshotEdge {
                from: from as usize,
                to: to as usize,
                on_critical_path: hops.contains(&(from, to)),
            })
            .collect();

        Self { nodes, edges }
    }

    /// Render as a Mermaid flowchart. `direction` defaults to `LR`.
    pub fn to_mermaid(&self, direction: Option<&str>) -> String {
        let mut mermaid = format!("flowchart {}\n", direction.unwrap_or("LR"));

        for (idx, node) in self.nodes.iter().enumerate() {
            let label = if node.anchor {
                escape_label(&node.id)
            } else {
                format!("{} ({}h)", escape_label(&node.id), node.duration)
            };
            let class = if node.anchor {
                "anchor"
            } else if node.critical {
                "critical"
            } else {
                "task"
            };
            mermaid.push_str(&format!("    n{}[\"{}\"]:::{}\n", idx, label, class));
        }

        for edge in &self.edges {
            mermaid.push_str(&format!("    n{} --> n{}\n", edge.from, edge.to));
        }

        for (idx, edge) in self.edges.iter().enumerate() {
            if edge.on_critical_path {
                mermaid.push_str(&format!(
                    "    linkStyle {} stroke:#c0392b,stroke-width:3px\n",
                    idx
                ));
            }
        }

        mermaid.push_str("\n    classDef critical fill:#f8d7da,stroke:#721c24,stroke-width:2px\n");
        mermaid.push_str("    classDef task fill:#d1ecf1,stroke:#0c5460,stroke-width:1px\n");
        mermaid.push_str("    classDef anchor fill:#e2e3e5,stroke:#383d41,stroke-width:1px\n");

        mermaid
    }
}

fn escape_label(s: &str) -> String {
    s.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::critical_path::CriticalPathAnalyzer;
    use crate::models::TaskDescriptor;

    fn make_task(id: &str, duration: f64, deps: &[&str]) -> TaskDescriptor {
        TaskDescriptor::hours(id, duration, deps.iter().copied())
    }

    fn snapshot(tasks: &[TaskDescriptor]) -> GraphSnapshot {
        let analyzer = CriticalPathAnalyzer::new(AnalysisConfig::default());
        let (graph, result) = analyzer.analyze_with_graph(tasks).unwrap();
        GraphSnapshot::from_analysis(&graph, &result)
    }

    #[test]
    fn test_snapshot_marks_critical_nodes_and_hops() {
        let snap = snapshot(&[
            make_task("a", 2.0, &[]),
            make_task("b", 5.0, &["a"]),
            make_task("c", 1.0, &["a"]),
            make_task("d", 3.0, &["b", "c"]),
        ]);

        assert_eq!(snap.nodes.len(), 6);
        assert!(snap.nodes[0].anchor && snap.nodes[1].anchor);
        let node = |id: &str| snap.nodes.iter().find(|n| n.id == id && !n.anchor).unwrap();
        assert!(node("a").critical);
        assert!(!node("c").critical);

        let critical_hops = snap.edges.iter().filter(|e| e.on_critical_path).count();
        // start->a, a->b, b->d, d->end
        assert_eq!(critical_hops, 4);
        assert_eq!(snap.edges.len(), 6);
    }

    #[test]
    fn test_mermaid_rendering() {
        let snap = snapshot(&[make_task("a", 2.0, &[]), make_task("b\"x", 1.0, &["a"])]);
        let mermaid = snap.to_mermaid(None);

        assert!(mermaid.starts_with("flowchart LR\n"));
        assert!(mermaid.contains("n0[\"start\"]:::anchor"));
        assert!(mermaid.contains("n2[\"a (2h)\"]:::critical"));
        assert!(mermaid.contains("b#quot;x"));
        assert!(mermaid.contains("n0 --> n2"));
        assert!(mermaid.contains("linkStyle 0 stroke:#c0392b"));
        assert!(snap.to_mermaid(Some("TD")).starts_with("flowchart TD\n"));
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = snapshot(&[]);
        assert_eq!(snap.nodes.len(), 2);
        assert!(snap.edges.is_empty());
    }
}
