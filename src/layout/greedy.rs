use std::collections::BTreeMap;

use crate::ir::{Room, RoomId};

use super::scoring::score_candidate;
use super::{Candidate, Placement, SearchContext};

#[derive(Debug, Clone, Default)]
pub struct GreedyRun {
    pub placement: Placement,
    pub unplaced: Vec<RoomId>,
    pub evaluations: usize,
}

/// Single pass over `order`: every room takes its best-scoring candidate, or
/// is recorded as unplaced when it has none. Nothing is ever undone.
pub fn place_greedy<'a>(
    ctx: &SearchContext<'a>,
    catalog: &BTreeMap<RoomId, &'a Room>,
    order: &[RoomId],
) -> GreedyRun {
    let mut run = GreedyRun::default();

    for &id in order {
        let Some(&room) = catalog.get(&id) else {
            run.unplaced.push(id);
            continue;
        };
        let mut best: Option<(f32, Candidate)> = None;
        for candidate in ctx.candidates(room, &run.placement) {
            run.evaluations += 1;
            let score = score_candidate(id, &candidate, &run.placement, ctx.graph, ctx.regions)
                .total();
            // strict comparison keeps the earliest candidate on ties
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, candidate));
            }
        }
        match best {
            Some((score, candidate)) => {
                log::debug!(
                    "greedy: room {} at ({}, {}) {:?} score {:.3}",
                    id,
                    candidate.rect.x1,
                    candidate.rect.y1,
                    candidate.orientation,
                    score
                );
                run.placement.commit(id, candidate);
            }
            None => {
                log::debug!("greedy: room {id} has no legal candidate");
                run.unplaced.push(id);
            }
        }
    }

    run
}
