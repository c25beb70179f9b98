//! Filesystem-backed sinks: sheets are copied next to a JSON atlas, tiles and
//! scenes are written as JSON files.

use super::{AssetStore, LoadedSheet, NoPrompt, Prompt, SliceHandle, SliceRegion, SpriteSheetSink};
use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::registry::TileAsset;
use crate::render::Scene;
use macroquad::math::Rect;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct AtlasFile<'a> {
    sheet: String,
    width: u32,
    height: u32,
    pixels_per_unit: u32,
    filter: &'a str,
    sprites: Vec<SpriteEntry<'a>>,
}

#[derive(Serialize)]
struct SpriteEntry<'a> {
    name: &'a str,
    rect: [f32; 4],
    pivot: [f32; 2],
}

#[derive(Serialize)]
struct TileFile<'a> {
    name: &'a str,
    sheet: String,
    rect: [f32; 4],
}

fn rect_array(r: &Rect) -> [f32; 4] {
    [r.x, r.y, r.w, r.h]
}

/// Writes every asset below one root directory.
pub struct FsAssets {
    root: PathBuf,
    pixels_per_unit: u32,
    delete_without_prompt: bool,
    prompt: Box<dyn Prompt>,
}

impl FsAssets {
    pub fn new(root: impl Into<PathBuf>, config: &ImportConfig) -> Self {
        FsAssets {
            root: root.into(),
            pixels_per_unit: config.pixels_per_unit,
            delete_without_prompt: config.delete_without_prompt,
            prompt: Box::new(NoPrompt),
        }
    }

    /// Ask `prompt` before replacing existing files.
    pub fn with_prompt(mut self, prompt: impl Prompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Create the parent directory and clear the way for a new file.
    fn prepare(&mut self, path: &Path) -> Result<(), ImportError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| ImportError::io(dir, source))?;
        }
        if path.exists() {
            if !self.delete_without_prompt && !self.prompt.confirm_overwrite(path) {
                return Err(ImportError::OverwriteDeclined {
                    path: path.to_path_buf(),
                });
            }
            log::debug!("Replacing \"{}\"", path.display());
            fs::remove_file(path).map_err(|source| ImportError::io(path, source))?;
        }
        Ok(())
    }

    fn write_json<T: Serialize>(&mut self, path: &Path, value: &T) -> Result<(), ImportError> {
        self.prepare(path)?;
        let txt = serde_json::to_string_pretty(value).map_err(|source| ImportError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, txt).map_err(|source| ImportError::io(path, source))
    }
}

impl SpriteSheetSink for FsAssets {
    fn import_sheet(&mut self, source: &Path, name: &str) -> Result<LoadedSheet, ImportError> {
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png");
        let dest = self.root.join(format!("{name}.{ext}"));

        self.prepare(&dest)?;
        fs::copy(source, &dest).map_err(|e| ImportError::io(source, e))?;

        let (width, height) = image::image_dimensions(&dest).map_err(|e| ImportError::Image {
            path: dest.clone(),
            source: e,
        })?;
        Ok(LoadedSheet {
            path: dest,
            width,
            height,
        })
    }

    fn slice(
        &mut self,
        sheet: &LoadedSheet,
        regions: &[SliceRegion],
    ) -> Result<Vec<SliceHandle>, ImportError> {
        let bounds = Rect::new(0.0, 0.0, sheet.width as f32, sheet.height as f32);
        let inside: Vec<&SliceRegion> = regions
            .iter()
            .filter(|r| {
                let ok = r.rect.x >= bounds.x
                    && r.rect.y >= bounds.y
                    && r.rect.right() <= bounds.right()
                    && r.rect.bottom() <= bounds.bottom();
                if !ok {
                    log::warn!("Sprite \"{}\" lies outside its sheet and was not sliced", r.name);
                }
                ok
            })
            .collect();

        let atlas = AtlasFile {
            sheet: self.relative(&sheet.path).display().to_string(),
            width: sheet.width,
            height: sheet.height,
            pixels_per_unit: self.pixels_per_unit,
            filter: "point",
            sprites: inside
                .iter()
                .map(|r| SpriteEntry {
                    name: &r.name,
                    rect: rect_array(&r.rect),
                    pivot: [0.5, 0.5],
                })
                .collect(),
        };
        let atlas_path = sheet.path.with_extension("atlas.json");
        self.write_json(&atlas_path, &atlas)?;

        Ok(inside
            .into_iter()
            .map(|r| SliceHandle {
                name: r.name.clone(),
                sheet: sheet.path.clone(),
                rect: r.rect,
            })
            .collect())
    }
}

impl AssetStore for FsAssets {
    fn commit_tile(&mut self, dir: &str, tile: &TileAsset) -> Result<(), ImportError> {
        let path = self.root.join(dir).join(format!("{}.tile.json", tile.name));
        // existing tile assets are reused as they are
        if path.is_file() {
            log::debug!("Reusing tile asset \"{}\"", path.display());
            return Ok(());
        }
        let file = TileFile {
            name: &tile.name,
            sheet: self.relative(&tile.sheet).display().to_string(),
            rect: rect_array(&tile.rect),
        };
        self.write_json(&path, &file)
    }

    fn commit_scene(&mut self, scene: &Scene) -> Result<(), ImportError> {
        let path = self.root.join(format!("{}.scene.json", scene.name));
        self.write_json(&path, scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock went backwards")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("ldtk_fs_sink_{nanos}"));
        fs::create_dir_all(&dir).expect("failed to create temp dir");
        dir
    }

    struct Always(bool);

    impl Prompt for Always {
        fn locate(&mut self, _missing: &Path) -> Option<PathBuf> {
            None
        }
        fn confirm_overwrite(&mut self, _path: &Path) -> bool {
            self.0
        }
    }

    #[test]
    fn imports_sheet_and_reads_its_size() {
        let dir = temp_dir();
        let src = dir.join("cavern.png");
        image::RgbaImage::new(48, 16).save(&src).expect("write png");

        let mut sink = FsAssets::new(dir.join("out"), &ImportConfig::new(16));
        let sheet = sink.import_sheet(&src, "Cavern").expect("import");
        assert_eq!((sheet.width, sheet.height), (48, 16));
        assert_eq!(sheet.path, dir.join("out").join("Cavern.png"));
        assert!(sheet.path.is_file());
    }

    #[test]
    fn slicing_skips_regions_outside_the_sheet() {
        let dir = temp_dir();
        let mut sink = FsAssets::new(&dir, &ImportConfig::new(16));
        let sheet = LoadedSheet {
            path: dir.join("Cavern.png"),
            width: 32,
            height: 16,
        };
        let regions = vec![
            SliceRegion {
                name: "Cavern_0".into(),
                rect: Rect::new(0.0, 0.0, 16.0, 16.0),
            },
            SliceRegion {
                name: "Cavern_1".into(),
                rect: Rect::new(24.0, 0.0, 16.0, 16.0),
            },
        ];
        let handles = sink.slice(&sheet, &regions).expect("slice");
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].name, "Cavern_0");

        let atlas = fs::read_to_string(dir.join("Cavern.atlas.json")).expect("atlas");
        let json: serde_json::Value = serde_json::from_str(&atlas).expect("json");
        assert_eq!(json["sheet"], "Cavern.png");
        assert_eq!(json["sprites"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn existing_files_need_confirmation() {
        let dir = temp_dir();
        let scene = Scene::new("Level_0_0");

        let mut refuse = FsAssets::new(&dir, &ImportConfig::new(16)).with_prompt(Always(false));
        refuse.commit_scene(&scene).expect("first write");
        let err = refuse.commit_scene(&scene).unwrap_err();
        assert!(matches!(err, ImportError::OverwriteDeclined { .. }));

        let mut accept = FsAssets::new(&dir, &ImportConfig::new(16)).with_prompt(Always(true));
        accept.commit_scene(&scene).expect("confirmed overwrite");

        let mut config = ImportConfig::new(16);
        config.delete_without_prompt = true;
        let mut silent = FsAssets::new(&dir, &config);
        silent.commit_scene(&scene).expect("overwrite without prompt");
    }

    #[test]
    fn tiles_land_in_their_directory() {
        let dir = temp_dir();
        let mut sink = FsAssets::new(&dir, &ImportConfig::new(16));
        let tile = TileAsset {
            name: "Cavern_3".into(),
            sheet: dir.join("Cavern.png"),
            rect: Rect::new(16.0, 0.0, 16.0, 16.0),
        };
        sink.commit_tile("Cavern_tiles", &tile).expect("commit");

        let txt = fs::read_to_string(dir.join("Cavern_tiles").join("Cavern_3.tile.json"))
            .expect("tile file");
        let json: serde_json::Value = serde_json::from_str(&txt).expect("json");
        assert_eq!(json["sheet"], "Cavern.png");
        assert_eq!(json["rect"][0], 16.0);
    }

    #[test]
    fn existing_tiles_are_reused_without_asking() {
        let dir = temp_dir();
        let tile = TileAsset {
            name: "Cavern_0".into(),
            sheet: dir.join("Cavern.png"),
            rect: Rect::new(0.0, 16.0, 16.0, 16.0),
        };
        let path = dir.join("Cavern_tiles").join("Cavern_0.tile.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "kept").unwrap();

        let mut sink = FsAssets::new(&dir, &ImportConfig::new(16)).with_prompt(Always(false));
        sink.commit_tile("Cavern_tiles", &tile).expect("reuse");
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
    }
}
