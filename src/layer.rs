use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::ir_map::{IrLayerInstance, IrLayerKind};
use crate::registry::TilesetRegistry;
use crate::render::GridNode;
use crate::sink::AssetStore;
use crate::spatial::place_all;

/// Why a layer instance produced no grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Tile-bearing layer without a registered tileset.
    NoTileset,
    /// Entity layers are not imported.
    Entities,
    /// Unrecognized `__type`.
    UnknownType(String),
}

/// Result of importing one layer instance.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerOutcome {
    Imported {
        grid: GridNode,
        placed: usize,
        dropped: usize,
    },
    Skipped(SkipReason),
}

/// Resolve one layer instance into a grid node.
///
/// `sort_order` is the running counter shared by all layer instances of a
/// level; it advances by `max_layers` for every imported layer instance.
pub fn import_layer(
    layer: &IrLayerInstance,
    registry: &mut TilesetRegistry,
    store: &mut dyn AssetStore,
    config: &ImportConfig,
    sort_order: &mut i32,
) -> Result<LayerOutcome, ImportError> {
    match &layer.kind {
        IrLayerKind::Entities => {
            log::warn!(
                "Layer instance \"{}\" has type \"Entities\", but entities are not supported. Layer instance will be skipped.",
                layer.identifier
            );
            return Ok(LayerOutcome::Skipped(SkipReason::Entities));
        }
        IrLayerKind::Unknown(tag) => {
            log::warn!(
                "Layer instance \"{}\" has unknown type \"{tag}\". Layer instance will be skipped.",
                layer.identifier
            );
            return Ok(LayerOutcome::Skipped(SkipReason::UnknownType(tag.clone())));
        }
        IrLayerKind::IntGrid | IrLayerKind::AutoLayer | IrLayerKind::Tiles => {}
    }

    let Some(tileset) = layer.tileset_uid.and_then(|uid| registry.get_mut(uid)) else {
        log::warn!(
            "Layer instance \"{}\" has type \"{}\", but no matching tileset (uid {:?}) has been found. Layer instance will be skipped.",
            layer.identifier,
            layer.kind.type_tag(),
            layer.tileset_uid
        );
        return Ok(LayerOutcome::Skipped(SkipReason::NoTileset));
    };

    let stack = place_all(&layer.placements, config.max_layers, |cmd| {
        tileset.tile(cmd.tile_id, store)
    })?;

    let next_sort_order = i32::try_from(config.max_layers)
        .ok()
        .and_then(|step| sort_order.checked_add(step))
        .ok_or_else(|| {
            ImportError::InvalidConfig(format!(
                "sorting order overflows at layer instance \"{}\" ({} stack layers each)",
                layer.identifier, config.max_layers
            ))
        })?;

    let ppu = config.pixels_per_unit as f32;
    let grid = GridNode::from_stack(
        &layer.base_name(),
        layer.px_offset.as_vec2() / ppu,
        1.0 / ppu,
        (layer.grid_size + 1) as f32,
        &stack,
        *sort_order,
    );
    *sort_order = next_sort_order;

    if stack.dropped() > 0 {
        log::debug!(
            "Layer instance \"{}\": {} tiles did not fit into {} stack layers",
            layer.identifier,
            stack.dropped(),
            config.max_layers
        );
    }

    Ok(LayerOutcome::Imported {
        placed: stack.tile_count(),
        dropped: stack.dropped(),
        grid,
    })
}

