use thiserror::Error;

use crate::ir::RoomId;

/// Input rejected before any search starts. Every other way a run can end is
/// an outcome carried on the result, not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("room {id} has non-positive dimensions {width}x{height}")]
    NonPositiveDimension { id: RoomId, width: f32, height: f32 },
    #[error("room id {0} is defined more than once")]
    DuplicateRoom(RoomId),
    #[error("adjacency ({a}, {b}) references unknown room {missing}")]
    UnknownRoom { a: RoomId, b: RoomId, missing: RoomId },
    #[error("room {0} cannot be adjacent to itself")]
    SelfAdjacency(RoomId),
    #[error("region {index} ({x1},{y1})-({x2},{y2}) is degenerate")]
    DegenerateRegion {
        index: usize,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    #[error("invalid H-shape parameters: {0}")]
    InvalidHShape(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
