// src/ir_map.rs
use crate::command::TilePlacement;
use crate::tileset::TilesetDefinition;
use macroquad::math::{uvec2, IVec2, UVec2};

/// Export dialect a project was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVariant {
    /// Layer instances name their tileset uid directly.
    Ldtk,
    /// Tileset uids come from the layer definitions, matched by identifier.
    Led,
}

/// Canonical, format-agnostic project.
#[derive(Debug, Clone)]
pub struct IrProject {
    pub variant: FormatVariant,
    pub tilesets: Vec<TilesetDefinition>,
    pub levels: Vec<IrLevel>, // import order: array order
}

#[derive(Debug, Clone)]
pub struct IrLevel {
    pub identifier: String,
    pub uid: i64,
    pub px_wid: i32,
    pub px_hei: i32,
    pub layers: Vec<IrLayerInstance>, // data order
}

impl IrLevel {
    /// Name of the scene produced for this level.
    pub fn scene_name(&self) -> String {
        format!("{}_{}", self.identifier, self.uid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrLayerKind {
    IntGrid,
    AutoLayer,
    Tiles,
    Entities,
    Unknown(String),
}

impl IrLayerKind {
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "IntGrid" => IrLayerKind::IntGrid,
            "AutoLayer" => IrLayerKind::AutoLayer,
            "Tiles" => IrLayerKind::Tiles,
            "Entities" => IrLayerKind::Entities,
            other => IrLayerKind::Unknown(other.to_owned()),
        }
    }

    pub fn type_tag(&self) -> &str {
        match self {
            IrLayerKind::IntGrid => "IntGrid",
            IrLayerKind::AutoLayer => "AutoLayer",
            IrLayerKind::Tiles => "Tiles",
            IrLayerKind::Entities => "Entities",
            IrLayerKind::Unknown(tag) => tag,
        }
    }

    /// Whether instances of this kind carry tiles.
    pub fn has_tiles(&self) -> bool {
        matches!(
            self,
            IrLayerKind::IntGrid | IrLayerKind::AutoLayer | IrLayerKind::Tiles
        )
    }
}

#[derive(Debug, Clone)]
pub struct IrLayerInstance {
    pub identifier: String,
    pub kind: IrLayerKind,
    pub c_wid: i32,
    pub c_hei: i32,
    pub grid_size: i32,
    pub px_offset: IVec2,
    /// `None` when the export links the layer to no tileset.
    pub tileset_uid: Option<i64>,
    /// Priority order: earlier placements end up on top.
    pub placements: Vec<TilePlacement>,
}

impl IrLayerInstance {
    /// `<type>_<identifier>`, the stem of every node built for this layer.
    pub fn base_name(&self) -> String {
        format!("{}_{}", self.kind.type_tag(), self.identifier)
    }

    /// Footprint of one tile: a square of `grid_size` one-pixel cells.
    pub fn tile_footprint(&self) -> UVec2 {
        let size = self.grid_size.max(1) as u32;
        uvec2(size, size)
    }
}
