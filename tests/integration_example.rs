// tests/integration_example.rs

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use ldtk_tilemap_import::sink::fs::FsAssets;
use ldtk_tilemap_import::{ErrorKind, ImportConfig, Importer, NoPrompt, Scene};

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("ldtk_{tag}_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

const LED_PROJECT: &str = r#"
{
  "__header__": { "app": "LEd", "appVersion": "0.5.1" },
  "defs": {
    "tilesets": [
      { "identifier": "Dungeon", "uid": 3, "relPath": "art/dungeon.png", "pxWid": 40, "pxHei": 24,
        "tileGridSize": 8, "spacing": 2, "padding": 1 }
    ],
    "layers": [ { "identifier": "Floor", "autoTilesetDefUid": 3 } ]
  },
  "levels": [
    { "identifier": "Start", "uid": 12, "pxWid": 32, "pxHei": 32,
      "layerInstances": [
        { "__identifier": "Floor", "__type": "AutoLayer", "__cWid": 4, "__cHei": 4, "__gridSize": 8,
          "pxOffsetX": 8, "pxOffsetY": 4,
          "gridTiles": [ { "coordId": 0, "tileId": 5, "__x": 0, "__y": 0 } ],
          "autoTiles": [
            { "ruleId": 1, "results": [
              { "coordId": 0, "flips": 1, "tiles": [ { "tileId": 1, "__x": 0, "__y": 0 } ] },
              { "coordId": 1, "flips": 0, "tiles": [ { "tileId": 2, "__x": 8, "__y": 0 } ] }
            ] }
          ] }
      ] }
  ]
}
"#;

fn write_project(dir: &PathBuf) -> PathBuf {
    fs::create_dir_all(dir.join("art")).unwrap();
    image::RgbaImage::new(40, 24).save(dir.join("art").join("dungeon.png")).unwrap();
    let path = dir.join("dungeon.json");
    fs::write(&path, LED_PROJECT).unwrap();
    path
}

#[test]
fn example_import_to_disk() {
    let dir = temp_dir("integration");
    let project = write_project(&dir);

    let mut config = ImportConfig::new(8);
    config.import_dir = dir.join("out");
    let mut assets = FsAssets::new(config.project_dir(&project), &config);
    let report = Importer::new(&config, &mut assets, &mut NoPrompt)
        .import_file(&project)
        .expect("project should import");

    assert_eq!(report.tilesets, vec!["Dungeon".to_string()]);
    // grid tile wins the shared cell, the auto tile is pushed one layer down
    assert_eq!(report.levels[0].placed_tiles, 3);
    assert_eq!(report.dropped_tiles(), 0);

    let root = dir.join("out").join("dungeon");
    assert!(root.join("Dungeon.png").is_file());
    assert!(root.join("Dungeon.atlas.json").is_file());
    for id in [1, 2, 5] {
        assert!(root.join("Dungeon_tiles").join(format!("Dungeon_{id}.tile.json")).is_file());
    }

    let txt = fs::read_to_string(root.join("Start_12.scene.json")).unwrap();
    let scene: Scene = serde_json::from_str(&txt).unwrap();
    let grid = scene.grid("Grid_AutoLayer_Floor").expect("grid");
    assert_eq!(grid.offset, [1.0, 0.5]);
    assert_eq!(grid.cell_size, 0.125);
    assert_eq!(grid.tilemaps.len(), 2);
    assert_eq!(grid.tilemaps[0].tiles.len(), 2);
    assert_eq!(grid.tilemaps[1].tiles[0].tile, "Dungeon_1");
}

#[test]
fn second_import_needs_permission_to_overwrite() {
    let dir = temp_dir("overwrite");
    let project = write_project(&dir);

    let mut config = ImportConfig::new(8);
    config.import_dir = dir.join("out");
    let out = config.project_dir(&project);

    let mut first = FsAssets::new(&out, &config);
    Importer::new(&config, &mut first, &mut NoPrompt).import_file(&project).unwrap();

    let mut second = FsAssets::new(&out, &config);
    let err = Importer::new(&config, &mut second, &mut NoPrompt)
        .import_file(&project)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    config.delete_without_prompt = true;
    let mut third = FsAssets::new(&out, &config);
    Importer::new(&config, &mut third, &mut NoPrompt)
        .import_file(&project)
        .expect("overwrite without prompting");
}

#[test]
fn wrong_sheet_size_fails_the_tileset() {
    let dir = temp_dir("size");
    let project = write_project(&dir);
    image::RgbaImage::new(16, 16).save(dir.join("art").join("dungeon.png")).unwrap();

    let config = ImportConfig::new(8);
    let mut assets = FsAssets::new(dir.join("out"), &config);
    let err = Importer::new(&config, &mut assets, &mut NoPrompt)
        .import_file(&project)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GeometryMismatch);
    assert!(err.to_string().contains("Dungeon"));
}
