// src/loader/json_loader.rs
use super::{ldtk, led};
use crate::error::ImportError;
use crate::ir_map::*;
use crate::tileset::TilesetDefinition;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::Path;

/// App name and exact version of supported LDtk exports.
pub const SUPPORTED_LDTK: (&str, &str) = ("LDtk", "0.9.3");
/// App name and exact version of supported LEd exports.
pub const SUPPORTED_LED: (&str, &str) = ("LEd", "0.5.1");

#[derive(Deserialize)]
struct JsonHeader {
    app: String,
    #[serde(rename = "appVersion")]
    app_version: String,
}

#[derive(Deserialize)]
struct JsonEnvelope {
    #[serde(rename = "__header__")]
    header: JsonHeader,
    #[serde(default, rename = "externalLevels")]
    external_levels: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JsonTileset {
    identifier: String,
    uid: i64,
    rel_path: String,
    px_wid: u32,
    px_hei: u32,
    tile_grid_size: u32,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    padding: u32,
}

impl From<JsonTileset> for TilesetDefinition {
    fn from(ts: JsonTileset) -> Self {
        TilesetDefinition {
            identifier: ts.identifier,
            uid: ts.uid,
            rel_path: ts.rel_path,
            px_wid: ts.px_wid,
            px_hei: ts.px_hei,
            tile_grid_size: ts.tile_grid_size,
            spacing: ts.spacing,
            padding: ts.padding,
        }
    }
}

/// Check the header and pick the dialect, before anything else is decoded.
fn detect_variant(envelope: &JsonEnvelope) -> Result<FormatVariant, ImportError> {
    let JsonHeader { app, app_version } = &envelope.header;
    let (variant, version) = if app == SUPPORTED_LDTK.0 {
        (FormatVariant::Ldtk, SUPPORTED_LDTK.1)
    } else if app == SUPPORTED_LED.0 {
        (FormatVariant::Led, SUPPORTED_LED.1)
    } else {
        return Err(ImportError::UnsupportedApp { app: app.clone() });
    };

    if app_version != version {
        return Err(ImportError::UnsupportedVersion {
            app: app.clone(),
            version: app_version.clone(),
        });
    }
    if envelope.external_levels {
        return Err(ImportError::ExternalLevels);
    }
    Ok(variant)
}

/// Decode project JSON; `origin` names the source in errors.
pub fn decode_project_str(txt: &str, origin: &Path) -> Result<IrProject, ImportError> {
    let json_err = |source| ImportError::Json {
        path: origin.to_path_buf(),
        source,
    };

    let value: JsonValue = serde_json::from_str(txt).map_err(json_err)?;
    let envelope = JsonEnvelope::deserialize(&value).map_err(json_err)?;
    let variant = detect_variant(&envelope)?;

    match variant {
        FormatVariant::Ldtk => {
            let project = ldtk::LdtkProject::deserialize(&value).map_err(json_err)?;
            Ok(project.into_ir())
        }
        FormatVariant::Led => {
            let project = led::LedProject::deserialize(&value).map_err(json_err)?;
            Ok(project.into_ir())
        }
    }
}

/// Read and decode a project file.
pub fn decode_project_file(path: &Path) -> Result<IrProject, ImportError> {
    let txt = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ImportError::ResourceMissing {
                path: path.to_path_buf(),
            }
        } else {
            ImportError::io(path, source)
        }
    })?;
    decode_project_str(&txt, path)
}
