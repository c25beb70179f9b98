use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::ir_map::{IrLayerInstance, IrLevel};
use crate::layer::{import_layer, LayerOutcome};
use crate::registry::TilesetRegistry;
use crate::render::{GridNode, Scene};
use crate::sink::AssetStore;

/// Sort order the first layer instance of a level starts from.
pub const FIRST_SORT_ORDER: i32 = 1;

/// Grids built from a run of layer instances.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Assembly {
    pub grids: Vec<GridNode>,
    /// Counter value for whatever comes after these layer instances.
    pub next_sort_order: i32,
    pub imported_layers: usize,
    pub skipped_layers: usize,
    pub placed_tiles: usize,
    pub dropped_tiles: usize,
}

/// Summary of one imported level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelReport {
    pub scene: String,
    pub imported_layers: usize,
    pub skipped_layers: usize,
    pub placed_tiles: usize,
    pub dropped_tiles: usize,
}

/// Import `layers` in order, threading the sort-order counter through them.
///
/// A failing layer instance aborts the run with an error naming `level` and
/// the layer instance.
pub fn assemble(
    level: &str,
    layers: &[IrLayerInstance],
    registry: &mut TilesetRegistry,
    store: &mut dyn AssetStore,
    config: &ImportConfig,
    starting_sort_order: i32,
) -> Result<Assembly, ImportError> {
    let mut out = Assembly {
        next_sort_order: starting_sort_order,
        ..Assembly::default()
    };

    for layer in layers {
        let outcome = import_layer(layer, registry, store, config, &mut out.next_sort_order)
            .map_err(|source| {
                log::error!(
                    "Failed to import layer instance \"{}\" in level \"{level}\".",
                    layer.identifier
                );
                ImportError::Layer {
                    level: level.to_owned(),
                    layer: layer.identifier.clone(),
                    source: Box::new(source),
                }
            })?;

        match outcome {
            LayerOutcome::Imported {
                grid,
                placed,
                dropped,
            } => {
                log::info!(
                    "Imported layer instance \"{}\" in level \"{level}\" successfully.",
                    layer.identifier
                );
                out.imported_layers += 1;
                out.placed_tiles += placed;
                out.dropped_tiles += dropped;
                out.grids.push(grid);
            }
            LayerOutcome::Skipped(_) => out.skipped_layers += 1,
        }
    }
    Ok(out)
}

/// Assemble a level into its scene and commit it.
pub fn import_level(
    level: &IrLevel,
    registry: &mut TilesetRegistry,
    store: &mut dyn AssetStore,
    config: &ImportConfig,
) -> Result<LevelReport, ImportError> {
    let assembly = assemble(
        &level.identifier,
        &level.layers,
        registry,
        store,
        config,
        FIRST_SORT_ORDER,
    )?;

    let mut scene = Scene::new(level.scene_name());
    for grid in assembly.grids {
        scene.upsert_grid(grid);
    }
    store.commit_scene(&scene)?;

    Ok(LevelReport {
        scene: scene.name,
        imported_layers: assembly.imported_layers,
        skipped_layers: assembly.skipped_layers,
        placed_tiles: assembly.placed_tiles,
        dropped_tiles: assembly.dropped_tiles,
    })
}
