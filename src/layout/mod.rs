mod backtrack;
mod candidates;
mod error;
mod graph;
mod greedy;
mod ordering;
mod regions;
pub mod scoring;
mod types;
pub use backtrack::{Deadline, backtrack};
pub use candidates::{CandidateMode, Candidates, Pull, SearchContext};
pub use error::LayoutError;
pub use graph::AdjacencyGraph;
pub use greedy::{GreedyRun, place_greedy};
pub use ordering::order_rooms;
pub use regions::{RegionSet, h_shape_regions};
pub use types::*;

use crate::config::{Algorithm, PlacementConfig};
use crate::ir::{Region, Room, RoomId, Scenario};
use std::collections::{BTreeMap, BTreeSet};

/// Places `rooms` inside the union of `regions`, trying to make every pair in
/// `adjacency_pairs` share a wall.
///
/// Input is validated up front; that is the only way this fails. Depending on
/// `config.algorithm` an exact backtracking phase runs first under
/// `config.timeout_seconds`, and the greedy placer takes over when it times out
/// or exhausts its search space. Each phase builds its own placement.
pub fn generate_layout(
    rooms: &[Room],
    regions: &[Region],
    adjacency_pairs: &[(RoomId, RoomId)],
    config: &PlacementConfig,
) -> Result<PlacementResult, LayoutError> {
    validate_config(config)?;
    validate_rooms(rooms)?;
    let region_set = RegionSet::new(regions)?;
    let graph = AdjacencyGraph::new(rooms, adjacency_pairs)?;

    let order = order_rooms(
        rooms,
        &graph,
        config.sort_method,
        config.adjacency_weight,
        config.area_weight,
    );
    log::debug!("placement order ({}): {:?}", config.sort_method, order);

    let catalog: BTreeMap<RoomId, &Room> = rooms.iter().map(|room| (room.id, room)).collect();
    let ctx = SearchContext {
        regions: &region_set,
        graph: &graph,
        step: config.step,
        allow_rotation: config.allow_rotation,
    };

    let mut search_status = None;
    if config.algorithm == Algorithm::BacktrackingThenGreedy {
        let deadline = Deadline::from_seconds(config.timeout_seconds);
        let outcome = backtrack(&ctx, &catalog, &order, &deadline);
        search_status = Some(outcome.status());
        match outcome {
            BacktrackOutcome::AllPlaced(placement) => {
                log::info!("backtracking placed all {} rooms", placement.len());
                return Ok(finalize(
                    rooms,
                    &graph,
                    &placement,
                    order,
                    PlacementMethod::Backtracking,
                    search_status,
                ));
            }
            BacktrackOutcome::Exhausted => {
                log::info!("backtracking found no complete placement, falling back to greedy");
            }
            BacktrackOutcome::TimedOut {
                partial,
                expansions,
            } => {
                log::warn!(
                    "backtracking timed out after {:.1}s ({} expansions, {} rooms placed); falling back to greedy",
                    config.timeout_seconds,
                    expansions,
                    partial.len()
                );
            }
        }
    }

    let run = place_greedy(&ctx, &catalog, &order);
    if !run.unplaced.is_empty() {
        log::warn!(
            "greedy placement left {} of {} rooms unplaced: {:?}",
            run.unplaced.len(),
            rooms.len(),
            run.unplaced
        );
    }
    log::debug!("greedy scored {} candidates", run.evaluations);
    Ok(finalize(
        rooms,
        &graph,
        &run.placement,
        order,
        PlacementMethod::Greedy,
        search_status,
    ))
}

/// [`generate_layout`] over a parsed scenario.
pub fn layout_scenario(
    scenario: &Scenario,
    config: &PlacementConfig,
) -> Result<PlacementResult, LayoutError> {
    generate_layout(
        &scenario.rooms,
        &scenario.regions,
        &scenario.adjacency,
        config,
    )
}

fn validate_config(config: &PlacementConfig) -> Result<(), LayoutError> {
    if !config.step.is_finite() || config.step <= 0.0 {
        return Err(LayoutError::InvalidConfig(format!(
            "step must be positive, got {}",
            config.step
        )));
    }
    if !config.timeout_seconds.is_finite() || config.timeout_seconds < 0.0 {
        return Err(LayoutError::InvalidConfig(format!(
            "timeout must be a non-negative number of seconds, got {}",
            config.timeout_seconds
        )));
    }
    for (name, weight) in [
        ("adjacency_weight", config.adjacency_weight),
        ("area_weight", config.area_weight),
    ] {
        if !weight.is_finite() {
            return Err(LayoutError::InvalidConfig(format!(
                "{name} must be finite, got {weight}"
            )));
        }
    }
    Ok(())
}

fn validate_rooms(rooms: &[Room]) -> Result<(), LayoutError> {
    let mut seen = BTreeSet::new();
    for room in rooms {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(room.width) || !valid(room.height) {
            return Err(LayoutError::NonPositiveDimension {
                id: room.id,
                width: room.width,
                height: room.height,
            });
        }
        if !seen.insert(room.id) {
            return Err(LayoutError::DuplicateRoom(room.id));
        }
    }
    Ok(())
}

fn finalize(
    rooms: &[Room],
    graph: &AdjacencyGraph,
    placement: &Placement,
    order: Vec<RoomId>,
    method: PlacementMethod,
    backtracking: Option<SearchStatus>,
) -> PlacementResult {
    let rooms_out = rooms
        .iter()
        .map(|room| RoomPlacement {
            id: room.id,
            name: room.display_name(),
            status: match placement.get(room.id) {
                Some(placed) => RoomStatus::Placed {
                    rect: placed.rect,
                    orientation: placed.orientation,
                },
                None => RoomStatus::Unplaced,
            },
        })
        .collect();

    let adjacency = graph
        .edges()
        .iter()
        .map(|&(a, b)| AdjacencyStatus {
            a,
            b,
            satisfied: match (placement.rect(a), placement.rect(b)) {
                (Some(ra), Some(rb)) => ra.is_adjacent(&rb),
                _ => false,
            },
        })
        .collect();

    let result = PlacementResult {
        rooms: rooms_out,
        adjacency,
        order,
        method,
        backtracking,
    };
    log::info!("{}", result.summary());
    result
}
