#![forbid(unsafe_code)]

use crate::domain::{Guid, OwnershipEdge, merge_edge};
use rustc_hash::FxHashMap;

/// Ownership edges keyed by source. A source has at most one outgoing edge;
/// every write goes through [`merge_edge`].
#[derive(Debug, Default)]
pub struct EdgeTable {
    edges: FxHashMap<Guid, OwnershipEdge>,
}

impl EdgeTable {
    /// Record a claim for `source` and return the edge that results.
    pub fn claim(&mut self, source: Guid, incoming: OwnershipEdge) -> OwnershipEdge {
        let merged = merge_edge(self.edges.get(&source).copied(), incoming);
        self.edges.insert(source, merged);
        merged
    }

    pub fn get(&self, source: Guid) -> Option<&OwnershipEdge> {
        self.edges.get(&source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Guid, &OwnershipEdge)> {
        self.edges.iter().map(|(source, edge)| (*source, edge))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn take_all(&mut self) -> Vec<(Guid, OwnershipEdge)> {
        std::mem::take(&mut self.edges).into_iter().collect()
    }
}
