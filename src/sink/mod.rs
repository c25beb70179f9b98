//! Collaborators the importer hands its results to.
//!
//! [`SpriteSheetSink`] owns image loading and slicing, [`AssetStore`] owns
//! persistence and [`Prompt`] answers the questions an editor would ask the
//! user. [`fs`] implements them on top of the filesystem, [`memory`] keeps
//! everything in process.

pub mod fs;
pub mod memory;

use crate::error::ImportError;
use crate::registry::TileAsset;
use crate::render::Scene;
use macroquad::math::Rect;
use std::path::{Path, PathBuf};

/// A named rectangle to cut out of a sprite sheet (bottom-left origin).
#[derive(Debug, Clone, PartialEq)]
pub struct SliceRegion {
    pub name: String,
    pub rect: Rect,
}

/// A region after the sheet has been sliced.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceHandle {
    pub name: String,
    /// Imported sheet the slice belongs to.
    pub sheet: PathBuf,
    pub rect: Rect,
}

/// A sprite sheet copied into the import destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSheet {
    /// Location of the imported copy.
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Image loading and slicing.
pub trait SpriteSheetSink {
    /// Whether a source image can be read from `source`.
    fn exists(&self, source: &Path) -> bool {
        source.is_file()
    }

    /// Bring `source` into the import destination under `name`.
    fn import_sheet(&mut self, source: &Path, name: &str) -> Result<LoadedSheet, ImportError>;

    /// Cut `regions` out of `sheet`. Returns one handle per region that could
    /// be sliced.
    fn slice(
        &mut self,
        sheet: &LoadedSheet,
        regions: &[SliceRegion],
    ) -> Result<Vec<SliceHandle>, ImportError>;
}

/// Persistence of materialized tiles and assembled level scenes.
pub trait AssetStore {
    /// Store a tile asset under `<dir>/<name>`.
    fn commit_tile(&mut self, dir: &str, tile: &TileAsset) -> Result<(), ImportError>;

    /// Store a level scene.
    fn commit_scene(&mut self, scene: &Scene) -> Result<(), ImportError>;
}

/// Answers to questions that need an operator.
pub trait Prompt {
    /// A file was not found at `missing`; return where it actually is.
    fn locate(&mut self, missing: &Path) -> Option<PathBuf>;

    /// `path` already exists; return whether it may be replaced.
    fn confirm_overwrite(&mut self, path: &Path) -> bool;
}

/// Prompt for unattended runs: never locates anything, never overwrites.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn locate(&mut self, _missing: &Path) -> Option<PathBuf> {
        None
    }

    fn confirm_overwrite(&mut self, _path: &Path) -> bool {
        false
    }
}
