#![forbid(unsafe_code)]

use super::Guid;

/// Outgoing ownership claim of a single source node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipEdge {
    pub target: Guid,
    /// Among edges that could account for the same memory, the highest
    /// importance wins during aggregation.
    pub importance: u32,
    /// Whether a later soft claim may still replace this edge.
    pub overridable: bool,
}

impl OwnershipEdge {
    pub fn hard(target: Guid, importance: u32) -> Self {
        Self {
            target,
            importance,
            overridable: false,
        }
    }

    pub fn overridable(target: Guid, importance: u32) -> Self {
        Self {
            target,
            importance,
            overridable: true,
        }
    }
}

/// Resolve a new claim against the edge already recorded for its source.
///
/// A hard claim (`incoming.overridable == false`) always takes effect: it
/// retargets, keeps the higher importance and hardens the edge. A soft claim
/// behaves the same way while the existing edge is still overridable and
/// leaves the flag set; against a hard edge it changes nothing.
pub fn merge_edge(existing: Option<OwnershipEdge>, incoming: OwnershipEdge) -> OwnershipEdge {
    let Some(existing) = existing else {
        return incoming;
    };
    if incoming.overridable && !existing.overridable {
        return existing;
    }
    OwnershipEdge {
        target: incoming.target,
        importance: existing.importance.max(incoming.importance),
        overridable: incoming.overridable,
    }
}
