use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::ir::{Room, RoomId};

use super::{BacktrackOutcome, Candidates, Placement, Pull, SearchContext};

/// Wall-clock budget measured on the monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    /// Budgets too large for a `Duration` never expire.
    pub fn from_seconds(seconds: f32) -> Self {
        let budget = Duration::try_from_secs_f32(seconds.max(0.0)).unwrap_or(Duration::MAX);
        Self::after(budget)
    }

    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.budget
    }
}

struct Frame<'a> {
    room: RoomId,
    candidates: Candidates<'a>,
    committed: bool,
}

/// Depth-first search for a placement of every room in `order`, returning
/// the first complete assignment found.
///
/// The recursion is unrolled onto an explicit stack; each frame owns the
/// candidate iterator of its room and remembers whether it currently has a
/// tentative commit. The deadline is checked before every candidate
/// expansion and periodically while a frame scans rejected slots.
pub fn backtrack<'a>(
    ctx: &SearchContext<'a>,
    catalog: &BTreeMap<RoomId, &'a Room>,
    order: &[RoomId],
    deadline: &Deadline,
) -> BacktrackOutcome {
    let mut placement = Placement::new();
    let mut expansions = 0usize;

    if deadline.expired() {
        return BacktrackOutcome::TimedOut {
            partial: placement,
            expansions,
        };
    }
    let Some(&first) = order.first() else {
        return BacktrackOutcome::AllPlaced(placement);
    };
    let Some(&first_room) = catalog.get(&first) else {
        return BacktrackOutcome::Exhausted;
    };

    let mut stack: Vec<Frame<'a>> = vec![Frame {
        room: first,
        candidates: ctx.candidates(first_room, &placement),
        committed: false,
    }];

    loop {
        let depth = stack.len();
        let Some(frame) = stack.last_mut() else {
            log::debug!("backtracking exhausted after {expansions} expansions");
            return BacktrackOutcome::Exhausted;
        };
        if frame.committed {
            placement.retract(frame.room);
            frame.committed = false;
        }
        if deadline.expired() {
            log::debug!(
                "backtracking deadline hit at depth {depth} after {expansions} expansions"
            );
            return BacktrackOutcome::TimedOut {
                partial: placement,
                expansions,
            };
        }

        let candidate = match frame.candidates.pull(deadline) {
            Pull::Ready(candidate) => candidate,
            Pull::Exhausted => {
                stack.pop();
                continue;
            }
            Pull::Expired => {
                log::debug!(
                    "backtracking deadline hit scanning room {} after {expansions} expansions",
                    frame.room
                );
                return BacktrackOutcome::TimedOut {
                    partial: placement,
                    expansions,
                };
            }
        };
        expansions += 1;
        placement.commit(frame.room, candidate);
        frame.committed = true;

        if depth == order.len() {
            log::debug!("backtracking placed every room after {expansions} expansions");
            return BacktrackOutcome::AllPlaced(placement);
        }

        let next = order[depth];
        let Some(&room) = catalog.get(&next) else {
            return BacktrackOutcome::Exhausted;
        };
        stack.push(Frame {
            room: next,
            candidates: ctx.candidates(room, &placement),
            committed: false,
        });
    }
}
