use std::collections::BTreeMap;

use serde::Serialize;

use crate::geometry::Rect;
use crate::ir::RoomId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Original,
    Rotated,
}

impl Orientation {
    pub fn extent(self, width: f32, height: f32) -> (f32, f32) {
        match self {
            Orientation::Original => (width, height),
            Orientation::Rotated => (height, width),
        }
    }
}

/// A proposed, uncommitted placement for one room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub rect: Rect,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedRoom {
    pub rect: Rect,
    pub orientation: Orientation,
}

/// Working state of one search run. Keyed by room id so iteration is ordered.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    placed: BTreeMap<RoomId, PlacedRoom>,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, id: RoomId, candidate: Candidate) {
        self.placed.insert(
            id,
            PlacedRoom {
                rect: candidate.rect,
                orientation: candidate.orientation,
            },
        );
    }

    pub fn retract(&mut self, id: RoomId) -> Option<PlacedRoom> {
        self.placed.remove(&id)
    }

    pub fn get(&self, id: RoomId) -> Option<&PlacedRoom> {
        self.placed.get(&id)
    }

    pub fn rect(&self, id: RoomId) -> Option<Rect> {
        self.placed.get(&id).map(|placed| placed.rect)
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomId, &PlacedRoom)> + '_ {
        self.placed.iter().map(|(id, placed)| (*id, placed))
    }

    /// Owned copy of the placed rectangles, handed to candidate iterators so
    /// they never borrow the placement being mutated.
    pub fn snapshot(&self) -> Vec<(RoomId, Rect)> {
        self.placed
            .iter()
            .map(|(id, placed)| (*id, placed.rect))
            .collect()
    }
}

/// How the backtracking phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    AllPlaced,
    Exhausted,
    TimedOut,
}

#[derive(Debug, Clone)]
pub enum BacktrackOutcome {
    AllPlaced(Placement),
    Exhausted,
    /// Deadline hit; the partial placement is only kept for diagnostics.
    TimedOut { partial: Placement, expansions: usize },
}

impl BacktrackOutcome {
    pub fn status(&self) -> SearchStatus {
        match self {
            BacktrackOutcome::AllPlaced(_) => SearchStatus::AllPlaced,
            BacktrackOutcome::Exhausted => SearchStatus::Exhausted,
            BacktrackOutcome::TimedOut { .. } => SearchStatus::TimedOut,
        }
    }
}

/// Which phase produced the final layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMethod {
    Backtracking,
    Greedy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoomStatus {
    Placed { rect: Rect, orientation: Orientation },
    Unplaced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomPlacement {
    pub id: RoomId,
    pub name: String,
    #[serde(flatten)]
    pub status: RoomStatus,
}

impl RoomPlacement {
    pub fn rect(&self) -> Option<Rect> {
        match self.status {
            RoomStatus::Placed { rect, .. } => Some(rect),
            RoomStatus::Unplaced => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self.status, RoomStatus::Placed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdjacencyStatus {
    pub a: RoomId,
    pub b: RoomId,
    pub satisfied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjacencyStats {
    pub satisfied: usize,
    pub total: usize,
    pub ratio: f32,
}

/// Final layout handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementResult {
    /// Catalog order, one entry per room.
    pub rooms: Vec<RoomPlacement>,
    /// One entry per adjacency edge, sorted by `(a, b)`.
    pub adjacency: Vec<AdjacencyStatus>,
    pub order: Vec<RoomId>,
    pub method: PlacementMethod,
    pub backtracking: Option<SearchStatus>,
}

impl PlacementResult {
    pub fn placed_count(&self) -> usize {
        self.rooms.iter().filter(|room| room.is_placed()).count()
    }

    pub fn total_rooms(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_complete(&self) -> bool {
        self.placed_count() == self.total_rooms()
    }

    pub fn unplaced(&self) -> Vec<RoomId> {
        self.rooms
            .iter()
            .filter(|room| !room.is_placed())
            .map(|room| room.id)
            .collect()
    }

    pub fn room(&self, id: RoomId) -> Option<&RoomPlacement> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn rect_of(&self, id: RoomId) -> Option<Rect> {
        self.room(id).and_then(RoomPlacement::rect)
    }

    pub fn adjacency_stats(&self) -> AdjacencyStats {
        let total = self.adjacency.len();
        let satisfied = self.adjacency.iter().filter(|edge| edge.satisfied).count();
        let ratio = if total > 0 {
            satisfied as f32 / total as f32
        } else {
            1.0
        };
        AdjacencyStats {
            satisfied,
            total,
            ratio,
        }
    }

    pub fn summary(&self) -> String {
        let stats = self.adjacency_stats();
        format!(
            "Placed {}/{} rooms. Adjacency: {}/{} ({:.2})",
            self.placed_count(),
            self.total_rooms(),
            stats.satisfied,
            stats.total,
            stats.ratio
        )
    }
}
