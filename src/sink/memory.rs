//! In-process sinks; nothing touches the disk.

use super::{AssetStore, LoadedSheet, SliceHandle, SliceRegion, SpriteSheetSink};
use crate::error::ImportError;
use crate::registry::TileAsset;
use crate::render::Scene;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Records every committed asset. Source images are "found" when registered
/// with [`MemoryAssets::with_sheet`].
#[derive(Debug, Default)]
pub struct MemoryAssets {
    /// Known source images and their pixel size.
    pub sheets: HashMap<PathBuf, (u32, u32)>,
    /// Committed tiles with their directory.
    pub tiles: Vec<(String, TileAsset)>,
    pub scenes: Vec<Scene>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.sheets.insert(path.into(), (width, height));
        self
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.name == name)
    }
}

impl SpriteSheetSink for MemoryAssets {
    fn import_sheet(&mut self, source: &Path, name: &str) -> Result<LoadedSheet, ImportError> {
        let (width, height) =
            self.sheets
                .get(source)
                .copied()
                .ok_or_else(|| ImportError::ResourceMissing {
                    path: source.to_path_buf(),
                })?;
        Ok(LoadedSheet {
            path: PathBuf::from(format!("{name}.png")),
            width,
            height,
        })
    }

    fn slice(
        &mut self,
        sheet: &LoadedSheet,
        regions: &[SliceRegion],
    ) -> Result<Vec<SliceHandle>, ImportError> {
        Ok(regions
            .iter()
            .map(|r| SliceHandle {
                name: r.name.clone(),
                sheet: sheet.path.clone(),
                rect: r.rect,
            })
            .collect())
    }

    fn exists(&self, source: &Path) -> bool {
        self.sheets.contains_key(source)
    }
}

impl AssetStore for MemoryAssets {
    fn commit_tile(&mut self, dir: &str, tile: &TileAsset) -> Result<(), ImportError> {
        self.tiles.push((dir.to_owned(), tile.clone()));
        Ok(())
    }

    fn commit_scene(&mut self, scene: &Scene) -> Result<(), ImportError> {
        self.scenes.push(scene.clone());
        Ok(())
    }
}
