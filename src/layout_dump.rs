use crate::config::PlacementConfig;
use crate::ir::{Region, RoomId};
use crate::layout::{AdjacencyStats, Orientation, PlacementResult, RoomStatus};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub summary: String,
    pub method: String,
    pub backtracking: Option<String>,
    pub config: PlacementConfig,
    pub bounds: Option<[f32; 4]>,
    pub regions: Vec<RegionDump>,
    pub rooms: Vec<RoomDump>,
    pub adjacency: Vec<AdjacencyDump>,
    pub stats: AdjacencyStats,
    pub order: Vec<RoomId>,
}

#[derive(Debug, Serialize)]
pub struct RegionDump {
    pub index: usize,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct RoomDump {
    pub id: RoomId,
    pub name: String,
    pub placed: bool,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub rotated: bool,
}

#[derive(Debug, Serialize)]
pub struct AdjacencyDump {
    pub a: RoomId,
    pub b: RoomId,
    pub satisfied: bool,
}

impl LayoutDump {
    pub fn from_result(
        result: &PlacementResult,
        regions: &[Region],
        config: &PlacementConfig,
    ) -> Self {
        let region_dumps = regions
            .iter()
            .enumerate()
            .map(|(index, region)| RegionDump {
                index,
                name: region.display_name(),
                x: region.rect.x1,
                y: region.rect.y1,
                width: region.rect.width(),
                height: region.rect.height(),
            })
            .collect();

        let rooms = result
            .rooms
            .iter()
            .map(|room| match room.status {
                RoomStatus::Placed { rect, orientation } => RoomDump {
                    id: room.id,
                    name: room.name.clone(),
                    placed: true,
                    x: Some(rect.x1),
                    y: Some(rect.y1),
                    width: Some(rect.width()),
                    height: Some(rect.height()),
                    rotated: orientation == Orientation::Rotated,
                },
                RoomStatus::Unplaced => RoomDump {
                    id: room.id,
                    name: room.name.clone(),
                    placed: false,
                    x: None,
                    y: None,
                    width: None,
                    height: None,
                    rotated: false,
                },
            })
            .collect();

        let adjacency = result
            .adjacency
            .iter()
            .map(|edge| AdjacencyDump {
                a: edge.a,
                b: edge.b,
                satisfied: edge.satisfied,
            })
            .collect();

        let bounds = regions
            .iter()
            .map(|region| region.rect)
            .reduce(|acc, rect| acc.union_bounds(&rect))
            .map(|rect| [rect.x1, rect.y1, rect.x2, rect.y2]);

        LayoutDump {
            summary: result.summary(),
            method: format!("{:?}", result.method).to_lowercase(),
            backtracking: result.backtracking.map(|status| format!("{status:?}")),
            config: config.clone(),
            bounds,
            regions: region_dumps,
            rooms,
            adjacency,
            stats: result.adjacency_stats(),
            order: result.order.clone(),
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    result: &PlacementResult,
    regions: &[Region],
    config: &PlacementConfig,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_result(result, regions, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

/// Same dump as [`write_layout_dump`], to any writer.
pub fn print_layout_dump<W: Write>(
    writer: W,
    result: &PlacementResult,
    regions: &[Region],
    config: &PlacementConfig,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_result(result, regions, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
