use crate::registry::TileHandle;
use crate::spatial::LayerStack;
use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};

/// Render structure of one imported level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// `<level identifier>_<level uid>`.
    pub name: String,
    pub grids: Vec<GridNode>,
}

/// All stacked tilemaps of one layer instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridNode {
    pub name: String,
    /// Grid position in engine units.
    pub offset: [f32; 2],
    /// Edge length of one cell (one source pixel) in engine units.
    pub cell_size: f32,
    pub tilemaps: Vec<TilemapNode>,
}

/// One stack layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilemapNode {
    pub name: String,
    /// Higher values are drawn on top.
    pub sorting_order: i32,
    /// Chunk culling bounds in cells.
    pub culling_bounds: [f32; 2],
    pub tiles: Vec<TileRecord>,
}

/// A tile at a stored (Y-up) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub x: i32,
    pub y: i32,
    pub tile: String,
    /// Column-major symmetry matrix.
    pub transform: [[f32; 4]; 4],
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Scene {
            name: name.into(),
            grids: Vec::new(),
        }
    }

    pub fn grid(&self, name: &str) -> Option<&GridNode> {
        self.grids.iter().find(|g| g.name == name)
    }

    /// Add `grid`, replacing an earlier grid of the same name in place.
    pub fn upsert_grid(&mut self, grid: GridNode) {
        match self.grids.iter_mut().find(|g| g.name == grid.name) {
            Some(existing) => *existing = grid,
            None => self.grids.push(grid),
        }
    }

    pub fn tile_count(&self) -> usize {
        self.grids
            .iter()
            .flat_map(|g| &g.tilemaps)
            .map(|t| t.tiles.len())
            .sum()
    }
}

impl GridNode {
    /// Turn a resolved stack into tilemaps named `Tilemap_<base>_<i>`.
    ///
    /// Stack layer `i` gets sorting order `-(sort_base + i)`, so deeper layers
    /// draw below shallower ones and the whole stack sits below anything that
    /// used a smaller base.
    pub fn from_stack(
        base_name: &str,
        offset: Vec2,
        cell_size: f32,
        culling: f32,
        stack: &LayerStack<TileHandle>,
        sort_base: i32,
    ) -> Self {
        let tilemaps = stack
            .layers()
            .iter()
            .enumerate()
            .map(|(i, layer)| TilemapNode {
                name: format!("Tilemap_{base_name}_{i}"),
                sorting_order: -(sort_base + i as i32),
                culling_bounds: [culling, culling],
                tiles: layer
                    .iter()
                    .map(|(key, occ)| TileRecord {
                        x: key.x,
                        y: key.y,
                        tile: occ.tile.name.clone(),
                        transform: occ.flips.transform().to_cols_array_2d(),
                    })
                    .collect(),
            })
            .collect();

        GridNode {
            name: format!("Grid_{base_name}"),
            offset: offset.to_array(),
            cell_size,
            tilemaps,
        }
    }
}
