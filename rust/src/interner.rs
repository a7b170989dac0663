//! String interning for graph node lookups.
//!
//! Converts caller task ids to dense integer node ids so the graph can store
//! adjacency and timing data in plain vectors.

use rustc_hash::FxHashMap;

/// Interned node ID (u32 for compact storage and fast hashing).
pub type NodeId = u32;

/// Interner that maps task id strings to node ids.
///
/// Ids are handed out in insertion order starting from `first_id`, which lets
/// the graph reserve the low slots for its anchor nodes.
#[derive(Debug, Clone)]
pub struct NodeInterner {
    to_int: FxHashMap<String, NodeId>,
    from_int: Vec<String>,
    first_id: NodeId,
}

impl NodeInterner {
    /// Create a new interner whose first id is `first_id`.
    pub fn with_capacity(capacity: usize, first_id: NodeId) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
            first_id,
        }
    }

    /// Intern a string, returning its node id and whether it was newly added.
    pub fn intern(&mut self, s: &str) -> (NodeId, bool) {
        if let Some(&id) = self.to_int.get(s) {
            return (id, false);
        }
        let id = self.first_id + self.from_int.len() as NodeId;
        self.from_int.push(s.to_string());
        self.to_int.insert(s.to_string(), id);
        (id, true)
    }

    /// Get the node id for a string, if it exists.
    #[inline]
    pub fn get(&self, s: &str) -> Option<NodeId> {
        self.to_int.get(s).copied()
    }

    /// Get the string for a node id.
    #[inline]
    pub fn resolve(&self, id: NodeId) -> Option<&str> {
        id.checked_sub(self.first_id)
            .and_then(|offset| self.from_int.get(offset as usize))
            .map(|s| s.as_str())
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.from_int.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.from_int.is_empty()
    }
}
