// tests/load_tests.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use ldtk_tilemap_import::{
    decode_project_file, decode_project_str, ErrorKind, FormatVariant, ImportError, IrLayerKind,
};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("ldtk_load_tests_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

const LDTK: &str = r#"
{
  "__header__": { "app": "LDtk", "appVersion": "0.9.3", "doc": "ignored" },
  "jsonVersion": "0.9.3",
  "externalLevels": false,
  "defs": {
    "tilesets": [
      { "identifier": "Cavern", "uid": 1, "relPath": "cavern.png", "pxWid": 32, "pxHei": 32,
        "tileGridSize": 16, "spacing": 0, "padding": 0 }
    ],
    "layers": []
  },
  "levels": [
    { "identifier": "Level_0", "uid": 0, "pxWid": 32, "pxHei": 32,
      "layerInstances": [
        { "__identifier": "Ground", "__type": "Tiles", "__cWid": 2, "__cHei": 2, "__gridSize": 16,
          "__tilesetDefUid": 1, "pxOffsetX": 0, "pxOffsetY": 0,
          "gridTiles": [ { "px": [0, 0], "src": [0, 0], "f": 0, "t": 0, "d": [0] } ],
          "autoLayerTiles": [] }
      ] }
  ]
}
"#;

#[test]
fn integration_load_from_file_and_str() {
    let project = decode_project_str(LDTK, Path::new("inline.ldtk")).expect("should parse inline JSON");
    assert_eq!(project.variant, FormatVariant::Ldtk);
    assert_eq!(project.tilesets[0].identifier, "Cavern");
    assert_eq!(project.levels[0].layers[0].kind, IrLayerKind::Tiles);

    let path = temp_dir().join("world.ldtk");
    fs::write(&path, LDTK).unwrap();
    let from_file = decode_project_file(&path).unwrap();
    assert_eq!(from_file.levels[0].layers[0].placements.len(), 1);
    fs::remove_file(&path).unwrap();
}

#[test]
fn missing_project_is_a_missing_resource() {
    let err = decode_project_file(Path::new("does/not/exist.ldtk")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceMissing);
}

#[test]
fn unsupported_headers_are_rejected() {
    let other_app = LDTK.replace("\"app\": \"LDtk\"", "\"app\": \"Tiled\"");
    let err = decode_project_str(&other_app, Path::new("x.ldtk")).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedApp { ref app } if app == "Tiled"));

    let other_version = LDTK.replace("\"appVersion\": \"0.9.3\"", "\"appVersion\": \"1.5.3\"");
    let err = decode_project_str(&other_version, Path::new("x.ldtk")).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedVersion { ref version, .. } if version == "1.5.3"));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn external_levels_are_rejected() {
    let external = LDTK.replace("\"externalLevels\": false", "\"externalLevels\": true");
    let err = decode_project_str(&external, Path::new("x.ldtk")).unwrap_err();
    assert!(matches!(err, ImportError::ExternalLevels));
}

#[test]
fn malformed_json_is_a_format_error() {
    let err = decode_project_str("{ \"__header__\": ", Path::new("broken.ldtk")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.to_string().contains("broken.ldtk"));
}
