//! LDtk dialect: every layer instance names its tileset uid.

use super::json_loader::JsonTileset;
use crate::command::TilePlacement;
use crate::ir_map::*;
use crate::spatial::FlipBits;
use macroquad::math::ivec2;
use serde::Deserialize;

#[derive(Deserialize)]
pub(super) struct LdtkProject {
    defs: LdtkDefs,
    #[serde(default)]
    levels: Vec<LdtkLevel>,
}

#[derive(Deserialize)]
struct LdtkDefs {
    #[serde(default)]
    tilesets: Vec<JsonTileset>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LdtkLevel {
    identifier: String,
    uid: i64,
    #[serde(default)]
    px_wid: i32,
    #[serde(default)]
    px_hei: i32,
    #[serde(default)]
    layer_instances: Option<Vec<LdtkLayerInstance>>,
}

#[derive(Deserialize)]
struct LdtkLayerInstance {
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
    #[serde(rename = "__tilesetDefUid", default)]
    tileset_def_uid: Option<i64>,
    #[serde(rename = "pxOffsetX", default)]
    px_offset_x: i32,
    #[serde(rename = "pxOffsetY", default)]
    px_offset_y: i32,
    #[serde(rename = "gridTiles", default)]
    grid_tiles: Vec<LdtkTile>,
    #[serde(rename = "autoLayerTiles", default)]
    auto_layer_tiles: Vec<LdtkTile>,
}

#[derive(Deserialize)]
struct LdtkTile {
    /// flip bits
    #[serde(default)]
    f: i64,
    /// pixel position `[x, y]`
    px: [i32; 2],
    /// tile id
    t: i64,
}

impl LdtkLayerInstance {
    fn into_ir(self) -> IrLayerInstance {
        let mut layer = IrLayerInstance {
            identifier: self.identifier,
            kind: IrLayerKind::from_type_tag(&self.kind),
            c_wid: self.c_wid,
            c_hei: self.c_hei,
            grid_size: self.grid_size,
            px_offset: ivec2(self.px_offset_x, self.px_offset_y),
            tileset_uid: self.tileset_def_uid,
            placements: Vec::with_capacity(self.grid_tiles.len() + self.auto_layer_tiles.len()),
        };
        let footprint = layer.tile_footprint();

        // auto tiles are drawn first, hand-placed tiles win collisions
        layer.placements.extend(
            self.grid_tiles
                .iter()
                .chain(&self.auto_layer_tiles)
                .map(|tile| {
                    TilePlacement::new(
                        ivec2(tile.px[0], tile.px[1]),
                        tile.t,
                        FlipBits::from_raw(tile.f),
                        footprint,
                    )
                }),
        );
        layer
    }
}

impl LdtkProject {
    pub(super) fn into_ir(self) -> IrProject {
        IrProject {
            variant: FormatVariant::Ldtk,
            tilesets: self.defs.tilesets.into_iter().map(Into::into).collect(),
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
                        .unwrap_or_default()
                        .into_iter()
                        .map(LdtkLayerInstance::into_ir)
                        .collect(),
                })
                .collect(),
        }
    }
}
