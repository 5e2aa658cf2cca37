//! Static two-column grid used on compact viewports.
//!
//! No probing and no interaction: tiles crop to a fixed aspect that
//! alternates by position, and fade/scale in with a staggered delay.

use crate::config::CanvasConfig;
use crate::id::ImageId;
use crate::model::ImageRecord;
use serde::Serialize;

pub const GRID_COLUMNS: u32 = 2;

/// Entrance scale of a tile before it is revealed.
pub const HIDDEN_SCALE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TileAspect {
    /// 4:5 portrait crop.
    Portrait,
    Square,
}

impl TileAspect {
    /// Every third tile (starting with the first) is portrait.
    pub fn for_index(index: usize) -> Self {
        if index % 3 == 0 {
            TileAspect::Portrait
        } else {
            TileAspect::Square
        }
    }

    /// Height over width.
    pub fn ratio(self) -> f64 {
        match self {
            TileAspect::Portrait => 5.0 / 4.0,
            TileAspect::Square => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridTile {
    pub id: ImageId,
    pub url: String,
    pub alt: String,
    pub column: u32,
    pub row: u32,
    pub aspect: TileAspect,
    pub reveal_delay_ms: u32,
    /// Entrance state: tiles render transparent at [`HIDDEN_SCALE`] until
    /// revealed, then transition to full opacity at scale 1.
    pub visible: bool,
    pub scale: f64,
}

pub fn compact_tiles(
    records: &[ImageRecord],
    config: &CanvasConfig,
    revealed: bool,
) -> Vec<GridTile> {
    let scale = if revealed { 1.0 } else { HIDDEN_SCALE };
    records
        .iter()
        .enumerate()
        .map(|(i, record)| GridTile {
            id: record.id,
            url: record.url.clone(),
            alt: record.alt_or_default().to_string(),
            column: i as u32 % GRID_COLUMNS,
            row: i as u32 / GRID_COLUMNS,
            aspect: TileAspect::for_index(i),
            reveal_delay_ms: i as u32 * config.reveal_stagger_ms,
            visible: revealed,
            scale,
        })
        .collect()
}
