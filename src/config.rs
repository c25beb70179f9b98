use crate::error::ImportError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default number of stacked grids per layer instance.
pub const DEFAULT_MAX_LAYERS: usize = 4;

/// Upper bound for `max_layers`; sorting orders are `i32`.
pub const MAX_LAYERS_LIMIT: usize = 1 << 16;

fn default_max_layers() -> usize {
    DEFAULT_MAX_LAYERS
}

/// Settings for one project import.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportConfig {
    /// Source pixels per engine unit. Must be positive.
    pub pixels_per_unit: u32,
    /// Root directory for imported assets. A subdirectory named after the
    /// project file is created inside it.
    #[serde(default)]
    pub import_dir: PathBuf,
    /// Maximum stack layers per layer instance; deeper tiles are dropped.
    #[serde(default = "default_max_layers")]
    pub max_layers: usize,
    /// Replace existing assets without asking.
    #[serde(default)]
    pub delete_without_prompt: bool,
}

impl ImportConfig {
    /// Config with defaults for everything but the pixel density.
    pub fn new(pixels_per_unit: u32) -> Self {
        ImportConfig {
            pixels_per_unit,
            import_dir: PathBuf::new(),
            max_layers: DEFAULT_MAX_LAYERS,
            delete_without_prompt: false,
        }
    }

    /// Parse a TOML config file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ImportError> {
        let txt = std::fs::read_to_string(path).map_err(|source| ImportError::io(path, source))?;
        Self::from_toml_str(&txt)
    }

    /// Parse TOML text.
    pub fn from_toml_str(txt: &str) -> Result<Self, ImportError> {
        let config: ImportConfig =
            toml::from_str(txt).map_err(|e| ImportError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.pixels_per_unit == 0 {
            return Err(ImportError::InvalidConfig(
                "pixels per unit must not be 0".into(),
            ));
        }
        if self.max_layers == 0 {
            return Err(ImportError::InvalidConfig(
                "maximum stack layers must not be 0".into(),
            ));
        }
        if self.max_layers > MAX_LAYERS_LIMIT {
            return Err(ImportError::InvalidConfig(format!(
                "maximum stack layers must not exceed {MAX_LAYERS_LIMIT}, got {}",
                self.max_layers
            )));
        }
        Ok(())
    }

    /// Output directory for a given project file: `<import_dir>/<file stem>`.
    pub fn project_dir(&self, project_file: &Path) -> PathBuf {
        let stem = project_file
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_default();
        // PathBuf components already drop trailing separators
        self.import_dir.components().collect::<PathBuf>().join(stem)
    }
}
