//! Directed task graph with synthetic `start` and `end` anchors.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Slots 0 and 1 are always the
//! anchors; task nodes follow in the order they were added. Edges point from
//! a prerequisite to the task that waits on it.

mod builder;

pub use builder::{BuildOutput, TaskGraphBuilder};

use std::collections::VecDeque;

use crate::error::GraphError;
use crate::interner::{NodeId, NodeInterner};

/// Node id of the `start` anchor.
pub const START: NodeId = 0;
/// Node id of the `end` anchor.
pub const END: NodeId = 1;

const ANCHOR_COUNT: NodeId = 2;

/// Arena-backed dependency graph.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    index: NodeInterner,
    /// Duration in hours, indexed by node id.
    durations: Vec<f64>,
    predecessors: Vec<Vec<NodeId>>,
    successors: Vec<Vec<NodeId>>,
}

impl TaskGraph {
    /// Create a graph holding only the two anchors.
    pub fn with_capacity(task_capacity: usize) -> Self {
        let n = task_capacity + ANCHOR_COUNT as usize;
        let mut durations = Vec::with_capacity(n);
        durations.extend([0.0, 0.0]);
        let mut predecessors = Vec::with_capacity(n);
        predecessors.extend([Vec::new(), Vec::new()]);
        let mut successors = Vec::with_capacity(n);
        successors.extend([Vec::new(), Vec::new()]);

        Self {
            index: NodeInterner::with_capacity(task_capacity, ANCHOR_COUNT),
            durations,
            predecessors,
            successors,
        }
    }

    /// Add a task node. Returns `None` if a node with this id already exists.
    pub fn add_node(&mut self, task_id: &str, duration: f64) -> Option<NodeId> {
        let (id, added) = self.index.intern(task_id);
        if !added {
            return None;
        }
        self.durations.push(duration);
        self.predecessors.push(Vec::new());
        self.successors.push(Vec::new());
        Some(id)
    }

    /// Add edge `from -> to`. Parallel edges collapse; returns whether the edge is new.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        let successors = &mut self.successors[from as usize];
        if successors.contains(&to) {
            return false;
        }
        successors.push(to);
        self.predecessors[to as usize].push(from);
        true
    }

    /// Node id of a task, if present.
    #[inline]
    pub fn node_id(&self, task_id: &str) -> Option<NodeId> {
        self.index.get(task_id)
    }

    /// Display name of a node; anchors are `"start"` and `"end"`.
    pub fn name(&self, node: NodeId) -> &str {
        match node {
            START => "start",
            END => "end",
            _ => self.index.resolve(node).unwrap_or("<unknown>"),
        }
    }

    #[inline]
    pub fn is_anchor(node: NodeId) -> bool {
        node < ANCHOR_COUNT
    }

    #[inline]
    pub fn duration(&self, node: NodeId) -> f64 {
        self.durations[node as usize]
    }

    #[inline]
    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        &self.predecessors[node as usize]
    }

    #[inline]
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        &self.successors[node as usize]
    }

    #[inline]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.predecessors[node as usize].len()
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.successors[node as usize].len()
    }

    /// Total node count, anchors included.
    pub fn node_count(&self) -> usize {
        self.durations.len()
    }

    /// Number of task (non-anchor) nodes.
    pub fn task_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Task node ids in insertion order.
    pub fn task_nodes(&self) -> impl Iterator<Item = NodeId> {
        ANCHOR_COUNT..self.node_count() as NodeId
    }

    /// All edges as `(from, to)` pairs, grouped by source node.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(from, succs)| succs.iter().map(move |&to| (from as NodeId, to)))
    }

    /// Topological order of all nodes using Kahn's algorithm.
    ///
    /// The queue is seeded in node id order and then fed in successor
    /// insertion order, so the result is deterministic for a given input.
    /// Fails with [`GraphError::Cyclic`] carrying one witness cycle.
    pub fn topological_order(&self) -> Result<Vec<NodeId>, GraphError> {
        let n = self.node_count();
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();

        let mut queue: VecDeque<NodeId> = (0..n as NodeId)
            .filter(|&id| in_degree[id as usize] == 0)
            .collect();

        let mut emitted = vec![false; n];
        let mut result: Vec<NodeId> = Vec::with_capacity(n);

        while let Some(node) = queue.pop_front() {
            emitted[node as usize] = true;
            result.push(node);

            for &succ in &self.successors[node as usize] {
                let degree = &mut in_degree[succ as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(succ);
                }
            }
        }

        if result.len() != n {
            let nodes = self
                .find_cycle(&emitted)
                .into_iter()
                .map(|id| self.name(id).to_string())
                .collect();
            return Err(GraphError::Cyclic { nodes });
        }

        Ok(result)
    }

    /// Walk backwards through unemitted predecessors until a node repeats.
    ///
    /// Every node left over by Kahn's algorithm still has an unemitted
    /// predecessor, so the walk cannot dead-end.
    fn find_cycle(&self, emitted: &[bool]) -> Vec<NodeId> {
        let Some(first) = (0..self.node_count() as NodeId).find(|&id| !emitted[id as usize])
        else {
            return Vec::new();
        };

        let mut position: Vec<Option<usize>> = vec![None; self.node_count()];
        let mut walk: Vec<NodeId> = Vec::new();
        let mut current = first;

        loop {
            if let Some(start) = position[current as usize] {
                let mut cycle = walk.split_off(start);
                // Walked against edge direction; flip to dependency order
                cycle.reverse();
                return cycle;
            }
            position[current as usize] = Some(walk.len());
            walk.push(current);

            match self.predecessors[current as usize]
                .iter()
                .copied()
                .find(|&p| !emitted[p as usize])
            {
                Some(pred) => current = pred,
                None => return walk,
            }
        }
    }

    /// Breadth-first shortest path (by hop count) from `from` to `to`.
    ///
    /// Only edges for which `allow(u, v)` holds are traversed. Successors are
    /// visited in insertion order, so the result is deterministic. The returned
    /// path includes both endpoints.
    pub fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
        allow: impl Fn(NodeId, NodeId) -> bool,
    ) -> Option<Vec<NodeId>> {
        let n = self.node_count();
        let mut parent: Vec<Option<NodeId>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut queue: VecDeque<NodeId> = VecDeque::new();

        visited[from as usize] = true;
        queue.push_back(from);

        while let Some(node) = queue.pop_front() {
            if node == to {
                let mut path = vec![to];
                let mut current = to;
                while let Some(prev) = parent[current as usize] {
                    path.push(prev);
                    current = prev;
                }
                path.reverse();
                return Some(path);
            }

            for &succ in &self.successors[node as usize] {
                if visited[succ as usize] || !allow(node, succ) {
                    continue;
                }
                visited[succ as usize] = true;
                parent[succ as usize] = Some(node);
                queue.push_back(succ);
            }
        }

        None
    }
}

impl Default for TaskGraph {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
