use macroquad::math::Rect;

/// Tileset entry of a project's `defs.tilesets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetDefinition {
    /// Tileset name, also the prefix of every tile identifier.
    pub identifier: String,
    /// Project-unique id referenced by layer instances.
    pub uid: i64,
    /// Sheet image path relative to the project file.
    pub rel_path: String,
    /// Sheet width in pixels.
    pub px_wid: u32,
    /// Sheet height in pixels.
    pub px_hei: u32,
    /// Square tile size in pixels.
    pub tile_grid_size: u32,
    /// Gap between tiles in pixels.
    pub spacing: u32,
    /// Border around the grid in pixels.
    pub padding: u32,
}

/// One addressable tile of a sliced sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSlice {
    /// Dense, 0-based id in scan order.
    pub tile_id: u32,
    /// Source rectangle with a bottom-left origin.
    pub rect: Rect,
}

/// Name under which tile `tile_id` of `tileset` is sliced and persisted.
pub fn tile_identifier(tileset: &str, tile_id: i64) -> String {
    format!("{tileset}_{tile_id}")
}

/// Slice a `px_wid` x `px_hei` sheet into square tiles.
///
/// Rows are scanned top to bottom and columns left to right as stored in the
/// image, so ids follow the editor's numbering. Rectangles are flipped
/// vertically for a Y-up consumer.
pub fn grid_slices(
    px_wid: u32,
    px_hei: u32,
    tile_grid_size: u32,
    spacing: u32,
    padding: u32,
) -> Vec<GridSlice> {
    let mut out = Vec::new();
    if tile_grid_size == 0 {
        return out;
    }

    let (w, h) = (i64::from(px_wid), i64::from(px_hei));
    let (g, s, p) = (
        i64::from(tile_grid_size),
        i64::from(spacing),
        i64::from(padding),
    );
    let step = (g + s) as usize;

    let mut tile_id = 0u32;
    for y in (p..=h - g - p).step_by(step) {
        for x in (p..=w - g - p).step_by(step) {
            out.push(GridSlice {
                tile_id,
                rect: Rect::new(x as f32, (h - y - g) as f32, g as f32, g as f32),
            });
            tile_id += 1;
        }
    }
    out
}

impl TilesetDefinition {
    /// Slices of this tileset's sheet.
    pub fn slices(&self) -> Vec<GridSlice> {
        grid_slices(
            self.px_wid,
            self.px_hei,
            self.tile_grid_size,
            self.spacing,
            self.padding,
        )
    }

    /// Number of tiles the sheet holds.
    pub fn tile_count(&self) -> usize {
        self.slices().len()
    }

    /// Persisted name of one tile.
    pub fn tile_identifier(&self, tile_id: i64) -> String {
        tile_identifier(&self.identifier, tile_id)
    }
}
