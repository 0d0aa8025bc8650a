use std::cmp::Ordering;

use crate::config::SortMethod;
use crate::ir::{Room, RoomId};

use super::AdjacencyGraph;

/// Placement order for `rooms`. Keys sort descending; equal keys fall back to
/// ascending room id so the order is total.
pub fn order_rooms(
    rooms: &[Room],
    graph: &AdjacencyGraph,
    method: SortMethod,
    adjacency_weight: f32,
    area_weight: f32,
) -> Vec<RoomId> {
    let max_degree = graph.max_degree().max(1) as f32;
    let max_area = rooms
        .iter()
        .map(Room::area)
        .fold(0.0f32, f32::max)
        .max(f32::MIN_POSITIVE);

    let mut keyed: Vec<(&Room, usize)> = rooms
        .iter()
        .map(|room| (room, graph.degree(room.id)))
        .collect();

    keyed.sort_by(|(a, deg_a), (b, deg_b)| {
        let primary = match method {
            SortMethod::Area => b.area().total_cmp(&a.area()),
            SortMethod::Adjacency => deg_b.cmp(deg_a),
            SortMethod::Hybrid => {
                let score = |room: &Room, degree: usize| {
                    adjacency_weight * degree as f32 / max_degree
                        + area_weight * room.area() / max_area
                };
                score(*b, *deg_b).total_cmp(&score(*a, *deg_a))
            }
            SortMethod::DegreeArea => deg_b
                .cmp(deg_a)
                .then_with(|| b.area().total_cmp(&a.area())),
        };
        match primary {
            Ordering::Equal => a.id.cmp(&b.id),
            other => other,
        }
    });

    keyed.into_iter().map(|(room, _)| room.id).collect()
}
