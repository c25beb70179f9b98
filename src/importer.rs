//! Whole-project import: tilesets first, then every level.

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::ir_map::{IrLevel, IrProject};
use crate::level::{import_level, LevelReport};
use crate::loader::json_loader::decode_project_file;
use crate::registry::TilesetRegistry;
use crate::sink::{AssetStore, Prompt, SliceRegion, SpriteSheetSink};
use crate::tileset::TilesetDefinition;
use std::path::{Path, PathBuf};

/// What one import run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Identifiers of the imported tilesets, in project order.
    pub tilesets: Vec<String>,
    pub levels: Vec<LevelReport>,
}

impl ImportReport {
    /// Tiles that did not fit into any stack layer, over all levels.
    pub fn dropped_tiles(&self) -> usize {
        self.levels.iter().map(|l| l.dropped_tiles).sum()
    }
}

/// Drives one project import against a set of sinks.
///
/// `assets` receives sprite sheets, tiles and scenes; `prompt` is asked for
/// sheets that cannot be found next to the project file. Overwrite questions
/// are the sink's own business (see [`FsAssets::with_prompt`]).
///
/// [`FsAssets::with_prompt`]: crate::sink::fs::FsAssets::with_prompt
pub struct Importer<'a, S: SpriteSheetSink + AssetStore> {
    config: &'a ImportConfig,
    assets: &'a mut S,
    prompt: &'a mut dyn Prompt,
    registry: TilesetRegistry,
}

impl<'a, S: SpriteSheetSink + AssetStore> Importer<'a, S> {
    pub fn new(config: &'a ImportConfig, assets: &'a mut S, prompt: &'a mut dyn Prompt) -> Self {
        Importer {
            config,
            assets,
            prompt,
            registry: TilesetRegistry::new(),
        }
    }

    /// Tilesets registered so far.
    pub fn registry(&self) -> &TilesetRegistry {
        &self.registry
    }

    /// Read and import the project at `path`.
    pub fn import_file(&mut self, path: &Path) -> Result<ImportReport, ImportError> {
        self.config.validate()?;
        let project = decode_project_file(path)?;
        let json_dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.import_project(&project, json_dir)
    }

    /// Import an already decoded project. Sheet paths are resolved against
    /// `json_dir`.
    pub fn import_project(
        &mut self,
        project: &IrProject,
        json_dir: &Path,
    ) -> Result<ImportReport, ImportError> {
        self.config.validate()?;
        let mut report = ImportReport::default();

        for def in &project.tilesets {
            match self.import_tileset(def, json_dir) {
                Ok(()) => {
                    log::info!("Imported tileset \"{}\" successfully.", def.identifier);
                    report.tilesets.push(def.identifier.clone());
                }
                Err(e) => {
                    log::error!("Failed to import tileset \"{}\": {e}", def.identifier);
                    return Err(e.in_tileset(&def.identifier));
                }
            }
        }

        for level in &project.levels {
            report.levels.push(self.run_level(level)?);
        }
        Ok(report)
    }

    fn run_level(&mut self, level: &IrLevel) -> Result<LevelReport, ImportError> {
        match import_level(level, &mut self.registry, &mut *self.assets, self.config) {
            Ok(r) => {
                log::info!("Imported level \"{}\" successfully.", level.identifier);
                if r.dropped_tiles > 0 {
                    log::warn!(
                        "Level \"{}\": {} tiles exceeded {} stack layers and were dropped",
                        level.identifier,
                        r.dropped_tiles,
                        self.config.max_layers
                    );
                }
                Ok(r)
            }
            Err(e) => {
                log::error!("Failed to import level \"{}\".", level.identifier);
                Err(e.in_level(&level.identifier))
            }
        }
    }

    fn import_tileset(&mut self, def: &TilesetDefinition, json_dir: &Path) -> Result<(), ImportError> {
        let source = self.locate_sheet(json_dir, &def.rel_path)?;
        let sheet = self.assets.import_sheet(&source, &def.identifier)?;

        if (sheet.width, sheet.height) != (def.px_wid, def.px_hei) {
            log::error!(
                "Texture size of \"{}\" does not match the tileset definition",
                source.display()
            );
            return Err(ImportError::TextureSizeMismatch {
                tileset: def.identifier.clone(),
                expected_w: def.px_wid,
                expected_h: def.px_hei,
                actual_w: sheet.width,
                actual_h: sheet.height,
            });
        }

        let regions: Vec<SliceRegion> = def
            .slices()
            .into_iter()
            .map(|s| SliceRegion {
                name: def.tile_identifier(i64::from(s.tile_id)),
                rect: s.rect,
            })
            .collect();
        let handles = self.assets.slice(&sheet, &regions)?;
        self.registry.register(def, handles)?;
        Ok(())
    }

    /// `<json dir>/<rel>`, then `rel` as given, then whatever the prompt
    /// points at.
    fn locate_sheet(&mut self, json_dir: &Path, rel_path: &str) -> Result<PathBuf, ImportError> {
        let beside = json_dir.join(rel_path);
        if self.assets.exists(&beside) {
            return Ok(beside);
        }
        let verbatim = PathBuf::from(rel_path);
        if self.assets.exists(&verbatim) {
            return Ok(verbatim);
        }

        log::warn!("Unable to find \"{}\", asking for its location", beside.display());
        match self.prompt.locate(&beside) {
            Some(found) if self.assets.exists(&found) => Ok(found),
            _ => Err(ImportError::ResourceMissing { path: beside }),
        }
    }
}
