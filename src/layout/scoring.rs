use crate::ir::RoomId;

use super::{AdjacencyGraph, Candidate, Placement, RegionSet};

pub const ADJACENCY_SHARE: f32 = 0.8;
pub const FIT_SHARE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub adjacency: f32,
    pub fit: f32,
}

impl Score {
    pub fn total(&self) -> f32 {
        ADJACENCY_SHARE * self.adjacency + FIT_SHARE * self.fit
    }
}

pub fn score_candidate(
    room_id: RoomId,
    candidate: &Candidate,
    placement: &Placement,
    graph: &AdjacencyGraph,
    regions: &RegionSet,
) -> Score {
    Score {
        adjacency: adjacency_term(room_id, candidate, placement, graph),
        fit: fit_term(candidate, regions),
    }
}

/// Share of already placed neighbours the candidate touches along an edge.
pub fn adjacency_term(
    room_id: RoomId,
    candidate: &Candidate,
    placement: &Placement,
    graph: &AdjacencyGraph,
) -> f32 {
    let mut placed = 0usize;
    let mut touching = 0usize;
    for neighbor in graph.neighbors(room_id) {
        let Some(rect) = placement.rect(neighbor) else {
            continue;
        };
        placed += 1;
        if candidate.rect.is_adjacent(&rect) {
            touching += 1;
        }
    }
    touching as f32 / placed.max(1) as f32
}

/// `area / (area + slack)`, where slack is the summed distance from the
/// candidate to the sides of its covering frame: the smallest region holding
/// it whole, or the bounds of the regions it straddles.
pub fn fit_term(candidate: &Candidate, regions: &RegionSet) -> f32 {
    let rect = &candidate.rect;
    let frame = match regions.smallest_containing(rect) {
        Some(idx) => regions.regions()[idx].rect,
        None => match regions.overlapping_bounds(rect) {
            Some(bounds) => bounds,
            None => return 0.0,
        },
    };
    let area = rect.area();
    let slack = rect.slack_within(&frame);
    if area + slack <= 0.0 {
        return 0.0;
    }
    (area / (area + slack)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::ir::{Region, Room};
    use crate::layout::Orientation;

    fn candidate(x1: f32, y1: f32, x2: f32, y2: f32) -> Candidate {
        Candidate {
            rect: Rect::new(x1, y1, x2, y2),
            orientation: Orientation::Original,
        }
    }

    #[test]
    fn snug_candidate_scores_full_fit() {
        let regions = RegionSet::new(&[Region::new(0.0, 0.0, 2.0, 3.0)]).unwrap();
        assert_eq!(fit_term(&candidate(0.0, 0.0, 2.0, 3.0), &regions), 1.0);
        let corner = fit_term(&candidate(0.0, 0.0, 1.0, 1.0), &regions);
        let middle = fit_term(&candidate(0.5, 1.0, 1.5, 2.0), &regions);
        // same slack sum either way: 1 + 2 horizontally and vertically
        assert!((corner - middle).abs() < 1e-6);
        assert!(corner < 1.0 && corner > 0.0);
    }

    #[test]
    fn adjacency_term_counts_placed_neighbours_only() {
        let rooms: Vec<Room> = (0..3).map(|id| Room::new(id, 1.0, 1.0)).collect();
        let graph = AdjacencyGraph::new(&rooms, &[(0, 1), (0, 2)]).unwrap();
        let mut placement = Placement::new();
        placement.commit(1, candidate(0.0, 0.0, 1.0, 1.0));
        let touching = candidate(1.0, 0.0, 2.0, 1.0);
        assert_eq!(adjacency_term(0, &touching, &placement, &graph), 1.0);

        placement.commit(2, candidate(5.0, 5.0, 6.0, 6.0));
        assert_eq!(adjacency_term(0, &touching, &placement, &graph), 0.5);

        let corner = candidate(1.0, 1.0, 2.0, 2.0);
        assert_eq!(adjacency_term(0, &corner, &placement, &graph), 0.0);
    }

    #[test]
    fn no_placed_neighbours_means_zero_adjacency() {
        let rooms = vec![Room::new(0, 1.0, 1.0)];
        let graph = AdjacencyGraph::new(&rooms, &[]).unwrap();
        let score = score_candidate(
            0,
            &candidate(0.0, 0.0, 1.0, 1.0),
            &Placement::new(),
            &graph,
            &RegionSet::new(&[Region::new(0.0, 0.0, 1.0, 1.0)]).unwrap(),
        );
        assert_eq!(score.adjacency, 0.0);
        assert!((score.total() - FIT_SHARE).abs() < 1e-6);
    }
}
