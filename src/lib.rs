#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod geometry;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Algorithm, PlacementConfig, Preset, SortMethod};
pub use geometry::Rect;
pub use ir::{AdjacencyPattern, Region, Room, RoomId, Scenario};
pub use layout::{LayoutError, PlacementResult, generate_layout, h_shape_regions, layout_scenario};
