use std::{io, path::PathBuf};
use thiserror::Error;

/// Broad failure class of an [`ImportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsupported app/version, external levels, malformed JSON or config.
    Format,
    /// A source image or project file could not be found.
    ResourceMissing,
    /// Loaded sheet disagrees with the tileset geometry.
    GeometryMismatch,
    /// A tile reference could not be resolved.
    Reference,
    /// Filesystem or image decoding failure.
    Io,
}

/// Error type for every stage of a project import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// `__header__.app` is not a supported editor.
    #[error("Unsupported app: {app}")]
    UnsupportedApp {
        /// App name found in the header.
        app: String,
    },
    /// The editor is known but the export version is not.
    #[error("Unsupported app version: {app} {version}")]
    UnsupportedVersion {
        /// App name found in the header.
        app: String,
        /// Version string found in the header.
        version: String,
    },
    /// Projects with separate level files are not supported.
    #[error("External levels are not supported")]
    ExternalLevels,
    /// The configuration value is unusable.
    #[error("Invalid import config: {0}")]
    InvalidConfig(String),
    /// File could not be read or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// File is not valid JSON for the expected structure.
    #[error("Failed to parse JSON in {path}: {source}")]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// Sprite sheet could not be decoded.
    #[error("Failed to decode image {path}: {source}")]
    Image {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: image::ImageError,
    },
    /// A required file was not found and could not be located.
    #[error("Unable to locate \"{}\"", path.display())]
    ResourceMissing {
        /// Path that was searched for.
        path: PathBuf,
    },
    /// Decoded sheet dimensions differ from `pxWid`/`pxHei`.
    #[error(
        "Sprite sheet of tileset '{tileset}' is {actual_w}x{actual_h}, expected {expected_w}x{expected_h}"
    )]
    TextureSizeMismatch {
        /// Tileset identifier.
        tileset: String,
        /// Width from the project data.
        expected_w: u32,
        /// Height from the project data.
        expected_h: u32,
        /// Decoded width.
        actual_w: u32,
        /// Decoded height.
        actual_h: u32,
    },
    /// Number of loaded slices differs from the grid geometry.
    #[error("Tileset '{tileset}' loaded {actual} slices, expected {expected}")]
    SliceCountMismatch {
        /// Tileset identifier.
        tileset: String,
        /// Count computed from the grid geometry.
        expected: usize,
        /// Count returned by the slicing sink.
        actual: usize,
    },
    /// Tile id outside `0..=max_tile_id`.
    #[error("Tile id {tile_id} out of range in tileset '{tileset}' (max {max_tile_id})")]
    TileIdOutOfRange {
        /// Tileset identifier.
        tileset: String,
        /// Requested id.
        tile_id: i64,
        /// Highest valid id, `-1` for an empty tileset.
        max_tile_id: i64,
    },
    /// No slice carries the derived tile identifier.
    #[error("Sprite '{identifier}' was not loaded for tileset '{tileset}'")]
    SliceMissing {
        /// Tileset identifier.
        tileset: String,
        /// Derived tile identifier.
        identifier: String,
    },
    /// An existing asset would be replaced and the prompt declined.
    #[error("Asset \"{}\" already exists and was not overwritten", path.display())]
    OverwriteDeclined {
        /// Asset path.
        path: PathBuf,
    },
    /// Tileset import failed.
    #[error("Importing tileset '{identifier}' failed: {source}")]
    Tileset {
        /// Tileset identifier.
        identifier: String,
        /// Underlying error.
        #[source]
        source: Box<ImportError>,
    },
    /// Level import failed.
    #[error("Importing level '{identifier}' failed: {source}")]
    Level {
        /// Level identifier.
        identifier: String,
        /// Underlying error.
        #[source]
        source: Box<ImportError>,
    },
    /// A layer instance aborted its level.
    #[error("Failed to import layer instance '{layer}' in level '{level}': {source}")]
    Layer {
        /// Level identifier.
        level: String,
        /// Layer instance identifier.
        layer: String,
        /// Underlying error.
        #[source]
        source: Box<ImportError>,
    },
}

impl ImportError {
    /// Failure class, looking through the unit wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::UnsupportedApp { .. }
            | ImportError::UnsupportedVersion { .. }
            | ImportError::ExternalLevels
            | ImportError::InvalidConfig(_)
            | ImportError::Json { .. } => ErrorKind::Format,
            ImportError::ResourceMissing { .. } => ErrorKind::ResourceMissing,
            ImportError::TextureSizeMismatch { .. } | ImportError::SliceCountMismatch { .. } => {
                ErrorKind::GeometryMismatch
            }
            ImportError::TileIdOutOfRange { .. } | ImportError::SliceMissing { .. } => {
                ErrorKind::Reference
            }
            ImportError::Io { .. }
            | ImportError::Image { .. }
            | ImportError::OverwriteDeclined { .. } => ErrorKind::Io,
            ImportError::Tileset { source, .. }
            | ImportError::Level { source, .. }
            | ImportError::Layer { source, .. } => source.kind(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ImportError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn in_tileset(self, identifier: &str) -> Self {
        ImportError::Tileset {
            identifier: identifier.to_owned(),
            source: Box::new(self),
        }
    }

    pub(crate) fn in_level(self, identifier: &str) -> Self {
        ImportError::Level {
            identifier: identifier.to_owned(),
            source: Box::new(self),
        }
    }
}
