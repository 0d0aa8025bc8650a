use std::collections::HashSet;

use crate::geometry::{EPS, Rect};
use crate::ir::{Room, RoomId};

use super::{AdjacencyGraph, Candidate, Deadline, Orientation, Placement, RegionSet};

/// Raw slots examined between two deadline checks in [`Candidates::pull`].
const DEADLINE_STRIDE: usize = 64;

/// Read-only inputs shared by every candidate sequence of a run.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    pub regions: &'a RegionSet,
    pub graph: &'a AdjacencyGraph,
    pub step: f32,
    pub allow_rotation: bool,
}

impl<'a> SearchContext<'a> {
    pub fn orientations(&self, room: &Room) -> Vec<Orientation> {
        let mut out = vec![Orientation::Original];
        if self.allow_rotation && room.rotatable && (room.width - room.height).abs() > EPS {
            out.push(Orientation::Rotated);
        }
        out
    }

    /// Fresh candidate sequence for `room` against the current placement.
    pub fn candidates(&self, room: &'a Room, placement: &Placement) -> Candidates<'a> {
        let anchors: Vec<Rect> = self
            .graph
            .neighbors(room.id)
            .filter_map(|id| placement.rect(id))
            .collect();
        let cursor = if anchors.is_empty() {
            Cursor::grid_start()
        } else {
            Cursor::slide_start()
        };
        Candidates {
            room,
            regions: self.regions,
            step: self.step,
            orientations: self.orientations(room),
            placed: placement.snapshot(),
            extent: self.regions.bounds(),
            anchors,
            cursor,
            yielded: false,
            seen: HashSet::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateMode {
    /// Sliding along the sides of already placed neighbours.
    Adjacency,
    /// Sampling every region on a regular grid.
    Grid,
    Finished,
}

/// One step of a deadline-aware pull from [`Candidates`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pull {
    Ready(Candidate),
    Exhausted,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    West,
    East,
    North,
    South,
}

const SIDES: [Side; 4] = [Side::West, Side::East, Side::North, Side::South];

#[derive(Debug, Clone, Copy)]
enum Cursor {
    Slide {
        anchor: usize,
        side: usize,
        orient: usize,
        index: usize,
    },
    Grid {
        region: usize,
        orient: usize,
        row: usize,
        col: usize,
    },
    Done,
}

impl Cursor {
    fn slide_start() -> Self {
        Cursor::Slide {
            anchor: 0,
            side: 0,
            orient: 0,
            index: 0,
        }
    }

    fn grid_start() -> Self {
        Cursor::Grid {
            region: 0,
            orient: 0,
            row: 0,
            col: 0,
        }
    }
}

/// Lazy, finite sequence of legal placements for one room.
///
/// Order is neighbour, side (west, east, north, south), orientation, then
/// offset (zig-zag outwards from the neighbour's corner) while seeking
/// adjacency; region, orientation, row, then column while grid sampling.
/// Grid origins cover each region's whole bounding box, so a room may hang
/// over into a neighbouring region. Every yielded candidate lies inside the
/// region set and overlaps no placed room. If adjacency seeking produces
/// nothing at all, the sequence carries on with grid sampling.
#[derive(Debug)]
pub struct Candidates<'a> {
    room: &'a Room,
    regions: &'a RegionSet,
    step: f32,
    orientations: Vec<Orientation>,
    placed: Vec<(RoomId, Rect)>,
    extent: Option<Rect>,
    anchors: Vec<Rect>,
    cursor: Cursor,
    yielded: bool,
    seen: HashSet<(i64, i64, Orientation)>,
}

impl<'a> Candidates<'a> {
    pub fn mode(&self) -> CandidateMode {
        match self.cursor {
            Cursor::Slide { .. } => CandidateMode::Adjacency,
            Cursor::Grid { .. } => CandidateMode::Grid,
            Cursor::Done => CandidateMode::Finished,
        }
    }

    pub fn room_id(&self) -> RoomId {
        self.room.id
    }

    /// Next candidate, giving up with [`Pull::Expired`] once `deadline`
    /// passes, even in the middle of a long run of rejected slots.
    pub fn pull(&mut self, deadline: &Deadline) -> Pull {
        self.advance(Some(deadline))
    }

    fn advance(&mut self, deadline: Option<&Deadline>) -> Pull {
        let mut scanned = 0usize;
        loop {
            if let Some(deadline) = deadline
                && scanned % DEADLINE_STRIDE == 0
                && deadline.expired()
            {
                return Pull::Expired;
            }
            scanned += 1;

            let raw = match self.cursor {
                Cursor::Slide { .. } => self.next_slide(),
                Cursor::Grid { .. } => self.next_grid(),
                Cursor::Done => return Pull::Exhausted,
            };
            match raw {
                Some(candidate) => {
                    if self.accept(&candidate) {
                        self.yielded = true;
                        return Pull::Ready(candidate);
                    }
                }
                None => {
                    self.cursor = match self.cursor {
                        Cursor::Slide { .. } if !self.yielded => {
                            log::debug!(
                                "room {}: no slot beside placed neighbours, sampling regions",
                                self.room.id
                            );
                            Cursor::grid_start()
                        }
                        _ => Cursor::Done,
                    };
                }
            }
        }
    }

    fn accept(&mut self, candidate: &Candidate) -> bool {
        let rect = &candidate.rect;
        if let Some(extent) = &self.extent
            && !extent.contains_rect(rect)
        {
            return false;
        }
        if self.placed.iter().any(|(_, placed)| placed.overlaps(rect)) {
            return false;
        }
        if !self.regions.contains(rect) {
            return false;
        }
        let key = (quantize(rect.x1), quantize(rect.y1), candidate.orientation);
        self.seen.insert(key)
    }

    fn next_slide(&mut self) -> Option<Candidate> {
        loop {
            let Cursor::Slide {
                anchor,
                side,
                orient,
                index,
            } = &mut self.cursor
            else {
                return None;
            };
            let anchor_rect = *self.anchors.get(*anchor)?;
            let orientation = self.orientations[*orient];
            let (w, h) = orientation.extent(self.room.width, self.room.height);
            let side_kind = SIDES[*side];
            let (target_len, anchor_len) = match side_kind {
                Side::West | Side::East => (h, anchor_rect.height()),
                Side::North | Side::South => (w, anchor_rect.width()),
            };
            // generous bounds; the shared-edge test below trims the ends
            let k_min = (-target_len / self.step).floor() as i64;
            let k_max = (anchor_len / self.step).ceil() as i64;
            let limit = 2 * k_max.max(-k_min);

            if *index as i64 > limit {
                *index = 0;
                *orient += 1;
                if *orient == self.orientations.len() {
                    *orient = 0;
                    *side += 1;
                    if *side == SIDES.len() {
                        *side = 0;
                        *anchor += 1;
                    }
                }
                continue;
            }

            let k = zigzag(*index);
            *index += 1;
            if k < k_min || k > k_max {
                continue;
            }
            let offset = k as f32 * self.step;
            let rect = match side_kind {
                Side::West => Rect::from_origin(anchor_rect.x1 - w, anchor_rect.y1 + offset, w, h),
                Side::East => Rect::from_origin(anchor_rect.x2, anchor_rect.y1 + offset, w, h),
                Side::North => Rect::from_origin(anchor_rect.x1 + offset, anchor_rect.y2, w, h),
                Side::South => Rect::from_origin(anchor_rect.x1 + offset, anchor_rect.y1 - h, w, h),
            };
            if !rect.is_adjacent(&anchor_rect) {
                continue;
            }
            return Some(Candidate { rect, orientation });
        }
    }

    fn next_grid(&mut self) -> Option<Candidate> {
        loop {
            let Cursor::Grid {
                region,
                orient,
                row,
                col,
            } = &mut self.cursor
            else {
                return None;
            };
            let bounds = self.regions.regions().get(*region)?.rect;
            let orientation = self.orientations[*orient];
            let (w, h) = orientation.extent(self.room.width, self.room.height);
            let rows = origin_slots(bounds.height(), self.step);
            let cols = origin_slots(bounds.width(), self.step);

            if *row >= rows || cols == 0 {
                *row = 0;
                *col = 0;
                *orient += 1;
                if *orient == self.orientations.len() {
                    *orient = 0;
                    *region += 1;
                }
                continue;
            }
            if *col >= cols {
                *col = 0;
                *row += 1;
                continue;
            }

            let x = bounds.x1 + *col as f32 * self.step;
            let y = bounds.y1 + *row as f32 * self.step;
            *col += 1;
            return Some(Candidate {
                rect: Rect::from_origin(x, y, w, h),
                orientation,
            });
        }
    }
}

impl Iterator for Candidates<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        match self.advance(None) {
            Pull::Ready(candidate) => Some(candidate),
            Pull::Exhausted | Pull::Expired => None,
        }
    }
}

/// 0, 1, -1, 2, -2, ...
fn zigzag(index: usize) -> i64 {
    let index = index as i64;
    if index % 2 == 1 {
        (index + 1) / 2
    } else {
        -(index / 2)
    }
}

/// Number of `step`-spaced origins strictly inside a span.
fn origin_slots(span: f32, step: f32) -> usize {
    ((span - EPS) / step).ceil().max(1.0) as usize
}

fn quantize(value: f32) -> i64 {
    (value * 1000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Region;

    fn regions(list: &[(f32, f32, f32, f32)]) -> RegionSet {
        let regions: Vec<Region> = list
            .iter()
            .map(|&(x1, y1, x2, y2)| Region::new(x1, y1, x2, y2))
            .collect();
        RegionSet::new(&regions).unwrap()
    }

    #[test]
    fn zigzag_walks_outwards() {
        let seq: Vec<i64> = (0..5).map(zigzag).collect();
        assert_eq!(seq, vec![0, 1, -1, 2, -2]);
    }

    #[test]
    fn grid_mode_enumerates_rows_then_columns() {
        let regions = regions(&[(0.0, 0.0, 3.0, 2.0)]);
        let rooms = vec![Room::new(0, 2.0, 1.0).fixed()];
        let graph = AdjacencyGraph::new(&rooms, &[]).unwrap();
        let ctx = SearchContext {
            regions: &regions,
            graph: &graph,
            step: 1.0,
            allow_rotation: true,
        };
        let placement = Placement::new();
        let iter = ctx.candidates(&rooms[0], &placement);
        assert_eq!(iter.mode(), CandidateMode::Grid);
        let origins: Vec<(f32, f32)> = iter.map(|c| (c.rect.x1, c.rect.y1)).collect();
        assert_eq!(origins, vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    }

    #[test]
    fn rotation_adds_second_orientation() {
        let regions = regions(&[(0.0, 0.0, 2.0, 2.0)]);
        let rooms = vec![Room::new(0, 2.0, 1.0)];
        let graph = AdjacencyGraph::new(&rooms, &[]).unwrap();
        let ctx = SearchContext {
            regions: &regions,
            graph: &graph,
            step: 1.0,
            allow_rotation: true,
        };
        let placement = Placement::new();
        let rotated = ctx
            .candidates(&rooms[0], &placement)
            .filter(|c| c.orientation == Orientation::Rotated)
            .count();
        assert_eq!(rotated, 2);

        let square = Room::new(1, 2.0, 2.0);
        assert_eq!(ctx.orientations(&square), vec![Orientation::Original]);
    }

    #[test]
    fn overlapping_regions_do_not_repeat_candidates() {
        let regions = regions(&[(0.0, 0.0, 2.0, 1.0), (0.0, 0.0, 2.0, 1.0)]);
        let rooms = vec![Room::new(0, 1.0, 1.0)];
        let graph = AdjacencyGraph::new(&rooms, &[]).unwrap();
        let ctx = SearchContext {
            regions: &regions,
            graph: &graph,
            step: 1.0,
            allow_rotation: true,
        };
        assert_eq!(ctx.candidates(&rooms[0], &Placement::new()).count(), 2);
    }

    #[test]
    fn adjacency_mode_hugs_the_placed_neighbour() {
        let regions = regions(&[(0.0, 0.0, 10.0, 10.0)]);
        let rooms = vec![Room::new(0, 2.0, 2.0), Room::new(1, 1.0, 2.0).fixed()];
        let graph = AdjacencyGraph::new(&rooms, &[(0, 1)]).unwrap();
        let ctx = SearchContext {
            regions: &regions,
            graph: &graph,
            step: 1.0,
            allow_rotation: true,
        };
        let mut placement = Placement::new();
        placement.commit(
            0,
            Candidate {
                rect: Rect::new(4.0, 4.0, 6.0, 6.0),
                orientation: Orientation::Original,
            },
        );
        let iter = ctx.candidates(&rooms[1], &placement);
        assert_eq!(iter.mode(), CandidateMode::Adjacency);
        let anchor = Rect::new(4.0, 4.0, 6.0, 6.0);
        let all: Vec<Candidate> = iter.collect();
        assert!(!all.is_empty());
        assert!(all.iter().all(|c| c.rect.is_adjacent(&anchor)));
        assert!(all.iter().all(|c| !c.rect.overlaps(&anchor)));
        // first candidate is flush with the neighbour's west side, aligned
        assert_eq!(all[0].rect, Rect::new(3.0, 4.0, 4.0, 6.0));
        // west side: offsets 0, +1, -1 share an edge; +2 and -2 only touch a corner
        let west: Vec<f32> = all
            .iter()
            .filter(|c| c.rect.x2 == 4.0)
            .map(|c| c.rect.y1)
            .collect();
        assert_eq!(west, vec![4.0, 5.0, 3.0]);
    }

    #[test]
    fn boxed_in_neighbour_falls_back_to_grid() {
        let regions = regions(&[(0.0, 0.0, 2.0, 2.0), (5.0, 0.0, 7.0, 2.0)]);
        let rooms = vec![Room::new(0, 2.0, 2.0), Room::new(1, 2.0, 2.0)];
        let graph = AdjacencyGraph::new(&rooms, &[(0, 1)]).unwrap();
        let ctx = SearchContext {
            regions: &regions,
            graph: &graph,
            step: 1.0,
            allow_rotation: false,
        };
        let mut placement = Placement::new();
        placement.commit(
            0,
            Candidate {
                rect: Rect::new(0.0, 0.0, 2.0, 2.0),
                orientation: Orientation::Original,
            },
        );
        let all: Vec<Candidate> = ctx.candidates(&rooms[1], &placement).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].rect, Rect::new(5.0, 0.0, 7.0, 2.0));
    }

    #[test]
    fn grid_origins_reach_across_a_seam() {
        let regions = regions(&[(0.0, 0.0, 5.0, 10.0), (5.0, 4.0, 10.0, 7.0)]);
        let rooms = vec![Room::new(0, 7.0, 3.0).fixed()];
        let graph = AdjacencyGraph::new(&rooms, &[]).unwrap();
        let ctx = SearchContext {
            regions: &regions,
            graph: &graph,
            step: 1.0,
            allow_rotation: true,
        };
        let origins: Vec<(f32, f32)> = ctx
            .candidates(&rooms[0], &Placement::new())
            .map(|c| (c.rect.x1, c.rect.y1))
            .collect();
        assert_eq!(origins, vec![(0.0, 4.0), (1.0, 4.0), (2.0, 4.0), (3.0, 4.0)]);
    }

    #[test]
    fn each_side_tries_every_orientation_before_the_next() {
        let regions = regions(&[(0.0, 0.0, 10.0, 10.0)]);
        let rooms = vec![Room::new(0, 2.0, 2.0), Room::new(1, 2.0, 1.0)];
        let graph = AdjacencyGraph::new(&rooms, &[(0, 1)]).unwrap();
        let ctx = SearchContext {
            regions: &regions,
            graph: &graph,
            step: 1.0,
            allow_rotation: true,
        };
        let mut placement = Placement::new();
        placement.commit(
            0,
            Candidate {
                rect: Rect::new(4.0, 4.0, 6.0, 6.0),
                orientation: Orientation::Original,
            },
        );
        let all: Vec<Candidate> = ctx.candidates(&rooms[1], &placement).collect();
        let west: Vec<usize> = (0..all.len()).filter(|&i| all[i].rect.x2 == 4.0).collect();
        let first_east = all.iter().position(|c| c.rect.x1 == 6.0).unwrap();
        assert!(west.iter().all(|&i| i < first_east));
        assert_eq!(all[0].orientation, Orientation::Original);
        assert!(west.iter().any(|&i| all[i].orientation == Orientation::Rotated));
    }

    #[test]
    fn pull_stops_once_the_deadline_passes() {
        let regions = regions(&[(0.0, 0.0, 4.0, 4.0)]);
        let rooms = vec![Room::new(0, 1.0, 1.0)];
        let graph = AdjacencyGraph::new(&rooms, &[]).unwrap();
        let ctx = SearchContext {
            regions: &regions,
            graph: &graph,
            step: 1.0,
            allow_rotation: true,
        };
        let placement = Placement::new();
        let mut expired = ctx.candidates(&rooms[0], &placement);
        let spent = Deadline::after(std::time::Duration::ZERO);
        assert_eq!(expired.pull(&spent), Pull::Expired);

        let mut open = ctx.candidates(&rooms[0], &placement);
        let plenty = Deadline::from_seconds(60.0);
        let pulled: Vec<Candidate> = std::iter::from_fn(|| match open.pull(&plenty) {
            Pull::Ready(candidate) => Some(candidate),
            Pull::Exhausted | Pull::Expired => None,
        })
        .collect();
        let iterated: Vec<Candidate> = ctx.candidates(&rooms[0], &placement).collect();
        assert_eq!(pulled, iterated);
        assert_eq!(pulled.len(), 16);
        assert_eq!(open.pull(&plenty), Pull::Exhausted);
    }

    #[test]
    fn full_region_yields_nothing() {
        let regions = regions(&[(0.0, 0.0, 2.0, 2.0)]);
        let rooms = vec![Room::new(0, 2.0, 2.0), Room::new(1, 1.0, 1.0)];
        let graph = AdjacencyGraph::new(&rooms, &[]).unwrap();
        let ctx = SearchContext {
            regions: &regions,
            graph: &graph,
            step: 1.0,
            allow_rotation: true,
        };
        let mut placement = Placement::new();
        placement.commit(
            0,
            Candidate {
                rect: Rect::new(0.0, 0.0, 2.0, 2.0),
                orientation: Orientation::Original,
            },
        );
        let mut iter = ctx.candidates(&rooms[1], &placement);
        assert!(iter.next().is_none());
        assert_eq!(iter.mode(), CandidateMode::Finished);
    }
}
