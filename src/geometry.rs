use serde::{Deserialize, Serialize};

/// Tolerance used for every coordinate comparison. Region corners derived from
/// fractional H-shape parameters are not exactly representable.
pub const EPS: f32 = 1e-4;

/// Axis-aligned rectangle stored as its two corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_origin(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// True when the corners are finite and strictly ordered on both axes.
    pub fn is_well_formed(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|v| v.is_finite())
            && self.x1 < self.x2
            && self.y1 < self.y2
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x1 >= self.x1 - EPS
            && other.y1 >= self.y1 - EPS
            && other.x2 <= self.x2 + EPS
            && other.y2 <= self.y2 + EPS
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x1 - EPS && x <= self.x2 + EPS && y >= self.y1 - EPS && y <= self.y2 + EPS
    }

    /// Positive-area intersection. Rectangles that only touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let overlap_x = self.x2.min(other.x2) - self.x1.max(other.x1);
        let overlap_y = self.y2.min(other.y2) - self.y1.max(other.y1);
        overlap_x > EPS && overlap_y > EPS
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let rect = Rect::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        (rect.width() > EPS && rect.height() > EPS).then_some(rect)
    }

    pub fn union_bounds(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x1.min(other.x1),
            self.y1.min(other.y1),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }

    /// Length of the boundary segment shared with `other`. Zero when the
    /// rectangles are apart, overlap, or touch only at a corner.
    pub fn shared_edge_length(&self, other: &Rect) -> f32 {
        if self.overlaps(other) {
            return 0.0;
        }
        let vertical_contact =
            (self.x2 - other.x1).abs() <= EPS || (other.x2 - self.x1).abs() <= EPS;
        let horizontal_contact =
            (self.y2 - other.y1).abs() <= EPS || (other.y2 - self.y1).abs() <= EPS;
        let span_y = self.y2.min(other.y2) - self.y1.max(other.y1);
        let span_x = self.x2.min(other.x2) - self.x1.max(other.x1);
        let mut shared = 0.0f32;
        if vertical_contact && span_y > EPS {
            shared = shared.max(span_y);
        }
        if horizontal_contact && span_x > EPS {
            shared = shared.max(span_x);
        }
        shared
    }

    pub fn is_adjacent(&self, other: &Rect) -> bool {
        self.shared_edge_length(other) > EPS
    }

    /// Sum of the four distances from `self` to the sides of `frame`.
    pub fn slack_within(&self, frame: &Rect) -> f32 {
        (self.x1 - frame.x1).max(0.0)
            + (frame.x2 - self.x2).max(0.0)
            + (self.y1 - frame.y1).max(0.0)
            + (frame.y2 - self.y2).max(0.0)
    }
}
