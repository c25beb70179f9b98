#![warn(missing_docs)]

//! LDtk / LEd project importer producing stacked, Y-up tile grids.
//!
//! A project is decoded into a format-agnostic IR, its tilesets are sliced
//! through a [`SpriteSheetSink`], and every layer instance is resolved into
//! at most [`ImportConfig::max_layers`] non-overlapping tile grids before the
//! level scene is handed to an [`AssetStore`].

mod command;
mod config;
mod error;
#[allow(missing_docs)]
mod ir_map;
#[allow(missing_docs)]
mod layer;
#[allow(missing_docs)]
mod level;
mod loader {
    pub mod json_loader;
    mod ldtk;
    mod led;
}
#[allow(missing_docs)]
mod importer;
#[allow(missing_docs)]
mod registry;
#[allow(missing_docs)]
mod render;
#[allow(missing_docs)]
pub mod sink;
mod spatial;
mod tileset;

pub use command::TilePlacement;
pub use config::{ImportConfig, DEFAULT_MAX_LAYERS, MAX_LAYERS_LIMIT};
pub use error::{ErrorKind, ImportError};
pub use importer::{ImportReport, Importer};
pub use ir_map::{FormatVariant, IrLayerInstance, IrLayerKind, IrLevel, IrProject};
pub use layer::{import_layer, LayerOutcome, SkipReason};
pub use level::{assemble, import_level, Assembly, LevelReport, FIRST_SORT_ORDER};
pub use loader::json_loader::{
    decode_project_file, decode_project_str, SUPPORTED_LDTK, SUPPORTED_LED,
};
pub use registry::{ImportedTileset, TileAsset, TileHandle, TilesetRegistry};
pub use render::{GridNode, Scene, TileRecord, TilemapNode};
pub use sink::{AssetStore, LoadedSheet, NoPrompt, Prompt, SliceHandle, SliceRegion, SpriteSheetSink};
pub use spatial::{place_all, CellKey, FlipBits, LayerStack, Occupant, StackLayer, FLIP_X, FLIP_Y};
pub use tileset::{grid_slices, tile_identifier, GridSlice, TilesetDefinition};
