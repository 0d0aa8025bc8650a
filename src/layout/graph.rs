use std::collections::{BTreeMap, BTreeSet};

use crate::ir::{Room, RoomId};

use super::LayoutError;

/// Undirected required-adjacency graph. Edges are stored once, normalized to
/// `(low, high)` and sorted, so iteration order never depends on input order.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    neighbors: BTreeMap<RoomId, BTreeSet<RoomId>>,
    edges: Vec<(RoomId, RoomId)>,
}

impl AdjacencyGraph {
    pub fn new(rooms: &[Room], pairs: &[(RoomId, RoomId)]) -> Result<Self, LayoutError> {
        let known: BTreeSet<RoomId> = rooms.iter().map(|room| room.id).collect();
        let mut neighbors: BTreeMap<RoomId, BTreeSet<RoomId>> =
            known.iter().map(|id| (*id, BTreeSet::new())).collect();
        let mut edges: BTreeSet<(RoomId, RoomId)> = BTreeSet::new();

        for &(a, b) in pairs {
            for id in [a, b] {
                if !known.contains(&id) {
                    return Err(LayoutError::UnknownRoom { a, b, missing: id });
                }
            }
            if a == b {
                return Err(LayoutError::SelfAdjacency(a));
            }
            neighbors.entry(a).or_default().insert(b);
            neighbors.entry(b).or_default().insert(a);
            edges.insert((a.min(b), a.max(b)));
        }

        Ok(Self {
            neighbors,
            edges: edges.into_iter().collect(),
        })
    }

    pub fn degree(&self, id: RoomId) -> usize {
        self.neighbors.get(&id).map(BTreeSet::len).unwrap_or(0)
    }

    pub fn neighbors(&self, id: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.neighbors.get(&id).into_iter().flatten().copied()
    }

    pub fn edges(&self) -> &[(RoomId, RoomId)] {
        &self.edges
    }

    pub fn max_degree(&self) -> usize {
        self.neighbors.values().map(BTreeSet::len).max().unwrap_or(0)
    }
}
