//! LEd dialect: layer instances find their tileset through the layer
//! definition sharing their identifier.

use super::json_loader::JsonTileset;
use crate::command::TilePlacement;
use crate::ir_map::*;
use crate::spatial::FlipBits;
use macroquad::math::ivec2;
use serde::Deserialize;

#[derive(Deserialize)]
pub(super) struct LedProject {
    defs: LedDefs,
    #[serde(default)]
    levels: Vec<LedLevel>,
}

#[derive(Deserialize)]
struct LedDefs {
    #[serde(default)]
    tilesets: Vec<JsonTileset>,
    #[serde(default)]
    layers: Vec<LedLayerDef>,
}

#[derive(Deserialize)]
struct LedLayerDef {
    identifier: String,
    #[serde(rename = "autoTilesetDefUid", default)]
    auto_tileset_def_uid: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedLevel {
    identifier: String,
    uid: i64,
    #[serde(default)]
    px_wid: i32,
    #[serde(default)]
    px_hei: i32,
    #[serde(default)]
    layer_instances: Vec<LedLayerInstance>,
}

#[derive(Deserialize)]
struct LedLayerInstance {
    #[serde(rename = "__identifier")]
    identifier: String,
    #[serde(rename = "__type")]
    kind: String,
    #[serde(rename = "__cWid", default)]
    c_wid: i32,
    #[serde(rename = "__cHei", default)]
    c_hei: i32,
    #[serde(rename = "__gridSize")]
    grid_size: i32,
    #[serde(rename = "pxOffsetX", default)]
    px_offset_x: i32,
    #[serde(rename = "pxOffsetY", default)]
    px_offset_y: i32,
    #[serde(rename = "gridTiles", default)]
    grid_tiles: Vec<LedTile>,
    #[serde(rename = "autoTiles", default)]
    auto_tiles: Vec<LedAutoTile>,
}

#[derive(Deserialize)]
struct LedTile {
    #[serde(rename = "tileId")]
    tile_id: i64,
    #[serde(rename = "__x")]
    x: i32,
    #[serde(rename = "__y")]
    y: i32,
}

#[derive(Deserialize)]
struct LedAutoTile {
    #[serde(default)]
    results: Vec<LedAutoResult>,
}

/// One rule match; all its tiles share the flips.
#[derive(Deserialize)]
struct LedAutoResult {
    #[serde(default)]
    flips: i64,
    #[serde(default)]
    tiles: Vec<LedTile>,
}

fn tileset_for(defs: &[LedLayerDef], identifier: &str) -> Option<i64> {
    let Some(def) = defs.iter().find(|d| d.identifier == identifier) else {
        log::warn!("Matching layer with identifier \"{identifier}\" not found in dataset.");
        return None;
    };
    def.auto_tileset_def_uid.filter(|uid| *uid >= 0)
}

impl LedLayerInstance {
    fn into_ir(self, defs: &[LedLayerDef]) -> IrLayerInstance {
        let mut layer = IrLayerInstance {
            tileset_uid: tileset_for(defs, &self.identifier),
            identifier: self.identifier,
            kind: IrLayerKind::from_type_tag(&self.kind),
            c_wid: self.c_wid,
            c_hei: self.c_hei,
            grid_size: self.grid_size,
            px_offset: ivec2(self.px_offset_x, self.px_offset_y),
            placements: Vec::new(),
        };
        let footprint = layer.tile_footprint();

        // grid tiles carry no flips
        let grid = self
            .grid_tiles
            .iter()
            .map(|t| (t, FlipBits::NONE));
        let auto = self
            .auto_tiles
            .iter()
            .flat_map(|rule| &rule.results)
            .flat_map(|result| {
                let flips = FlipBits::from_raw(result.flips);
                result.tiles.iter().map(move |t| (t, flips))
            });

        layer.placements = grid
            .chain(auto)
            .map(|(t, flips)| TilePlacement::new(ivec2(t.x, t.y), t.tile_id, flips, footprint))
            .collect();
        layer
    }
}

impl LedProject {
    pub(super) fn into_ir(self) -> IrProject {
        let LedDefs { tilesets, layers } = self.defs;
        IrProject {
            variant: FormatVariant::Led,
            tilesets: tilesets.into_iter().map(Into::into).collect(),
            levels: self
                .levels
                .into_iter()
                .map(|level| IrLevel {
                    identifier: level.identifier,
                    uid: level.uid,
                    px_wid: level.px_wid,
                    px_hei: level.px_hei,
                    layers: level
                        .layer_instances
                        .into_iter()
                        .map(|li| li.into_ir(&layers))
                        .collect(),
                })
                .collect(),
        }
    }
}
