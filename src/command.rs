use crate::spatial::FlipBits;
use macroquad::math::{IVec2, UVec2};

/// Request to put one tile into a layer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    /// Anchor cell in the editor's Y-down cell space (one cell per pixel).
    pub cell: IVec2,
    /// Tile id within the layer instance's tileset.
    pub tile_id: i64,
    /// Mirroring to apply.
    pub flips: FlipBits,
    /// Cells covered, starting at `cell`.
    pub footprint: UVec2,
}

impl TilePlacement {
    /// Placement of `tile_id` at `cell`.
    pub fn new(cell: IVec2, tile_id: i64, flips: FlipBits, footprint: UVec2) -> Self {
        TilePlacement {
            cell,
            tile_id,
            flips,
            footprint,
        }
    }
}
