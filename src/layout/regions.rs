use crate::geometry::{EPS, Rect};
use crate::ir::Region;

use super::LayoutError;

/// Ordered, possibly overlapping regions whose union is the legal floor area.
#[derive(Debug, Clone)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    pub fn new(regions: &[Region]) -> Result<Self, LayoutError> {
        for (index, region) in regions.iter().enumerate() {
            let r = region.rect;
            if !r.is_well_formed() {
                return Err(LayoutError::DegenerateRegion {
                    index,
                    x1: r.x1,
                    y1: r.y1,
                    x2: r.x2,
                    y2: r.y2,
                });
            }
        }
        Ok(Self {
            regions: regions.to_vec(),
        })
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.regions.iter().map(|region| &region.rect)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when every part of `rect` is covered by at least one region,
    /// either a single region or several across a seam.
    pub fn contains(&self, rect: &Rect) -> bool {
        if self.rects().any(|region| region.contains_rect(rect)) {
            return true;
        }
        self.covers_by_union(rect)
    }

    /// Index of the smallest single region holding `rect`.
    pub fn smallest_containing(&self, rect: &Rect) -> Option<usize> {
        self.rects()
            .enumerate()
            .filter(|(_, region)| region.contains_rect(rect))
            .min_by(|(ia, a), (ib, b)| a.area().total_cmp(&b.area()).then(ia.cmp(ib)))
            .map(|(idx, _)| idx)
    }

    /// Bounding box of every region sharing area with `rect`.
    pub fn overlapping_bounds(&self, rect: &Rect) -> Option<Rect> {
        self.rects()
            .filter(|region| region.overlaps(rect))
            .fold(None, |acc: Option<Rect>, region| {
                Some(match acc {
                    Some(bounds) => bounds.union_bounds(region),
                    None => *region,
                })
            })
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.rects().fold(None, |acc: Option<Rect>, region| {
            Some(match acc {
                Some(bounds) => bounds.union_bounds(region),
                None => *region,
            })
        })
    }

    fn covers_by_union(&self, rect: &Rect) -> bool {
        let clipped: Vec<Rect> = self
            .rects()
            .filter_map(|region| region.intersection(rect))
            .collect();
        if clipped.is_empty() {
            return false;
        }
        let total: f32 = clipped.iter().map(Rect::area).sum();
        if total + EPS < rect.area() {
            return false;
        }

        let xs = breakpoints(rect.x1, rect.x2, clipped.iter().flat_map(|r| [r.x1, r.x2]));
        let ys = breakpoints(rect.y1, rect.y2, clipped.iter().flat_map(|r| [r.y1, r.y2]));
        for xw in xs.windows(2) {
            let cx = (xw[0] + xw[1]) * 0.5;
            for yw in ys.windows(2) {
                let cy = (yw[0] + yw[1]) * 0.5;
                if !clipped.iter().any(|r| r.contains_point(cx, cy)) {
                    return false;
                }
            }
        }
        true
    }
}

fn breakpoints(lo: f32, hi: f32, edges: impl Iterator<Item = f32>) -> Vec<f32> {
    let mut points: Vec<f32> = std::iter::once(lo)
        .chain(edges.filter(|v| *v > lo + EPS && *v < hi - EPS))
        .chain(std::iter::once(hi))
        .collect();
    points.sort_by(f32::total_cmp);
    points.dedup_by(|a, b| (*a - *b).abs() <= EPS);
    points
}

/// Regions for an H-shaped footprint: two full-height wings joined by a
/// centred corridor, plus four corner regions that straddle each
/// wing/corridor junction above and below the corridor.
pub fn h_shape_regions(
    total_width: f32,
    total_height: f32,
    corridor_width: f32,
) -> Result<Vec<Region>, LayoutError> {
    let all_finite = [total_width, total_height, corridor_width]
        .iter()
        .all(|v| v.is_finite());
    if !all_finite || total_width <= 0.0 || total_height <= 0.0 {
        return Err(LayoutError::InvalidHShape(format!(
            "total size must be positive, got {total_width}x{total_height}"
        )));
    }
    if corridor_width <= 0.0 || corridor_width >= total_height {
        return Err(LayoutError::InvalidHShape(format!(
            "corridor width {corridor_width} must be within (0, {total_height})"
        )));
    }

    let wing = total_width / 3.0;
    let corridor_y = (total_height - corridor_width) / 2.0;
    let corridor_top = corridor_y + corridor_width;
    let w = total_width;
    let h = total_height;

    Ok(vec![
        Region::new(0.0, 0.0, wing, h).named("Left Wing"),
        Region::new(wing, corridor_y, w - wing, corridor_top).named("Corridor"),
        Region::new(w - wing, 0.0, w, h).named("Right Wing"),
        Region::new(wing * 0.7, corridor_top, wing * 1.3, h).named("Upper Left Corner"),
        Region::new(wing * 0.7, 0.0, wing * 1.3, corridor_y).named("Lower Left Corner"),
        Region::new(w - wing * 1.3, corridor_top, w - wing * 0.7, h).named("Upper Right Corner"),
        Region::new(w - wing * 1.3, 0.0, w - wing * 0.7, corridor_y).named("Lower Right Corner"),
    ])
}
