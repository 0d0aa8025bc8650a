use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

pub type RoomId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: Option<String>,
    pub width: f32,
    pub height: f32,
    pub rotatable: bool,
}

impl Room {
    pub fn new(id: RoomId, width: f32, height: f32) -> Self {
        Self {
            id,
            name: None,
            width,
            height,
            rotatable: true,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn fixed(mut self) -> Self {
        self.rotatable = false;
        self
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Room {}", self.id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub rect: Rect,
    pub name: Option<String>,
}

impl Region {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            rect: Rect::new(x1, y1, x2, y2),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            format!(
                "Region ({},{})-({},{})",
                self.rect.x1, self.rect.y1, self.rect.x2, self.rect.y2
            )
        })
    }
}

/// Canned adjacency structures over the catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjacencyPattern {
    /// Each room touches the next one.
    Linear,
    /// The first room touches every other room.
    Hub,
    /// Rooms laid out row-major on a square-ish grid touch their right and
    /// lower neighbours.
    Grid,
}

impl AdjacencyPattern {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "linear" | "chain" => Some(Self::Linear),
            "hub" | "star" => Some(Self::Hub),
            "grid" => Some(Self::Grid),
            _ => None,
        }
    }

    pub fn edges(self, ids: &[RoomId]) -> Vec<(RoomId, RoomId)> {
        let n = ids.len();
        let mut edges = Vec::new();
        match self {
            Self::Linear => {
                for pair in ids.windows(2) {
                    edges.push((pair[0], pair[1]));
                }
            }
            Self::Hub => {
                if let Some((&hub, rest)) = ids.split_first() {
                    for &other in rest {
                        edges.push((hub, other));
                    }
                }
            }
            Self::Grid => {
                let side = (n as f64).sqrt().floor().max(1.0) as usize;
                for i in 0..n {
                    if (i + 1) % side != 0 && i + 1 < n {
                        edges.push((ids[i], ids[i + 1]));
                    }
                    if i + side < n {
                        edges.push((ids[i], ids[i + side]));
                    }
                }
            }
        }
        edges
    }
}

/// Everything a placement run needs besides configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    pub rooms: Vec<Room>,
    pub regions: Vec<Region>,
    pub adjacency: Vec<(RoomId, RoomId)>,
}

impl Scenario {
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.iter().map(|room| room.id).collect()
    }

    pub fn apply_pattern(&mut self, pattern: AdjacencyPattern) {
        let ids = self.room_ids();
        self.adjacency.extend(pattern.edges(&ids));
    }
}
