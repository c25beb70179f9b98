use crate::error::ImportError;
use crate::sink::{AssetStore, SliceHandle};
use crate::tileset::{tile_identifier, TilesetDefinition};
use macroquad::math::Rect;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

/// Persisted tile: one slice of a sheet under its tile identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct TileAsset {
    pub name: String,
    pub sheet: PathBuf,
    pub rect: Rect,
}

/// Shared reference to a materialized tile.
pub type TileHandle = Rc<TileAsset>;

/// A tileset whose sheet has been imported and sliced.
#[derive(Debug)]
pub struct ImportedTileset {
    pub identifier: String,
    pub uid: i64,
    /// Highest valid tile id, `-1` when the sheet holds no tile.
    pub max_tile_id: i64,
    /// Directory the tile assets are stored in.
    pub tile_dir: String,
    slices: Vec<SliceHandle>,
    tiles: HashMap<String, TileHandle>,
}

impl ImportedTileset {
    /// Tile `tile_id`, materialized and committed on first use.
    pub fn tile(
        &mut self,
        tile_id: i64,
        store: &mut dyn AssetStore,
    ) -> Result<TileHandle, ImportError> {
        if tile_id < 0 || tile_id > self.max_tile_id {
            log::error!(
                "Too high tile id {tile_id} requested in tileset \"{}\"",
                self.identifier
            );
            return Err(ImportError::TileIdOutOfRange {
                tileset: self.identifier.clone(),
                tile_id,
                max_tile_id: self.max_tile_id,
            });
        }

        let name = tile_identifier(&self.identifier, tile_id);
        if let Some(tile) = self.tiles.get(&name) {
            return Ok(Rc::clone(tile));
        }

        let slice = self.slice_for(tile_id, &name)?;
        let tile = Rc::new(TileAsset {
            name: name.clone(),
            sheet: slice.sheet.clone(),
            rect: slice.rect,
        });
        store.commit_tile(&self.tile_dir, &tile)?;
        self.tiles.insert(name, Rc::clone(&tile));
        Ok(tile)
    }

    /// Number of tiles materialized so far.
    pub fn materialized(&self) -> usize {
        self.tiles.len()
    }

    pub fn slices(&self) -> &[SliceHandle] {
        &self.slices
    }

    fn slice_for(&self, tile_id: i64, name: &str) -> Result<&SliceHandle, ImportError> {
        let fast = usize::try_from(tile_id)
            .ok()
            .and_then(|i| self.slices.get(i))
            .filter(|s| s.name == name);
        // slices may come back from the sink in another order
        fast.or_else(|| self.slices.iter().find(|s| s.name == name))
            .ok_or_else(|| ImportError::SliceMissing {
                tileset: self.identifier.clone(),
                identifier: name.to_owned(),
            })
    }
}

/// All tilesets of one import run, looked up by uid.
#[derive(Debug, Default)]
pub struct TilesetRegistry {
    tilesets: Vec<ImportedTileset>,
}

impl TilesetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `def` to the slices the sheet sink produced for it.
    pub fn register(
        &mut self,
        def: &TilesetDefinition,
        slices: Vec<SliceHandle>,
    ) -> Result<&ImportedTileset, ImportError> {
        let expected = def.tile_count();
        if slices.len() != expected {
            log::error!("Loaded sprite count does not match spritesheet \"{}\"", def.identifier);
            return Err(ImportError::SliceCountMismatch {
                tileset: def.identifier.clone(),
                expected,
                actual: slices.len(),
            });
        }

        let tileset = ImportedTileset {
            identifier: def.identifier.clone(),
            uid: def.uid,
            max_tile_id: expected as i64 - 1,
            tile_dir: format!("{}_tiles", def.identifier),
            slices,
            tiles: HashMap::new(),
        };

        // a re-registered uid replaces the earlier entry
        match self.tilesets.iter().position(|t| t.uid == def.uid) {
            Some(i) => {
                self.tilesets[i] = tileset;
                Ok(&self.tilesets[i])
            }
            None => {
                self.tilesets.push(tileset);
                Ok(&self.tilesets[self.tilesets.len() - 1])
            }
        }
    }

    pub fn get(&self, uid: i64) -> Option<&ImportedTileset> {
        self.tilesets.iter().find(|t| t.uid == uid)
    }

    pub fn get_mut(&mut self, uid: i64) -> Option<&mut ImportedTileset> {
        self.tilesets.iter_mut().find(|t| t.uid == uid)
    }

    pub fn len(&self) -> usize {
        self.tilesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tilesets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::memory::MemoryAssets;

    fn def() -> TilesetDefinition {
        TilesetDefinition {
            identifier: "Cavern".into(),
            uid: 3,
            rel_path: "cavern.png".into(),
            px_wid: 32,
            px_hei: 32,
            tile_grid_size: 16,
            spacing: 0,
            padding: 0,
        }
    }

    fn slices_for(def: &TilesetDefinition) -> Vec<SliceHandle> {
        def.slices()
            .into_iter()
            .map(|s| SliceHandle {
                name: def.tile_identifier(s.tile_id as i64),
                sheet: PathBuf::from("Cavern.png"),
                rect: s.rect,
            })
            .collect()
    }

    #[test]
    fn register_rejects_wrong_slice_count() {
        let def = def();
        let mut slices = slices_for(&def);
        slices.pop();
        let err = TilesetRegistry::new().register(&def, slices).unwrap_err();
        assert!(matches!(
            err,
            ImportError::SliceCountMismatch { expected: 4, actual: 3, .. }
        ));
    }

    #[test]
    fn tile_ids_are_range_checked() {
        let def = def();
        let mut registry = TilesetRegistry::new();
        registry.register(&def, slices_for(&def)).expect("register");
        let mut store = MemoryAssets::default();
        let ts = registry.get_mut(3).expect("registered");

        assert_eq!(ts.max_tile_id, 3);
        assert!(ts.tile(3, &mut store).is_ok());
        for bad in [-1, 4, 100] {
            let err = ts.tile(bad, &mut store).unwrap_err();
            assert!(matches!(err, ImportError::TileIdOutOfRange { tile_id, .. } if tile_id == bad));
        }
    }

    #[test]
    fn tiles_are_materialized_once() {
        let def = def();
        let mut registry = TilesetRegistry::new();
        registry.register(&def, slices_for(&def)).expect("register");
        let mut store = MemoryAssets::default();
        let ts = registry.get_mut(3).expect("registered");

        let a = ts.tile(1, &mut store).expect("tile");
        let b = ts.tile(1, &mut store).expect("tile");
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.name, "Cavern_1");
        assert_eq!(store.tiles.len(), 1);
        assert_eq!(store.tiles[0].0, "Cavern_tiles");
        assert_eq!(ts.materialized(), 1);
    }

    #[test]
    fn out_of_order_slices_are_found_by_name() {
        let def = def();
        let mut slices = slices_for(&def);
        slices.reverse();
        let mut registry = TilesetRegistry::new();
        registry.register(&def, slices).expect("register");
        let mut store = MemoryAssets::default();

        let tile = registry
            .get_mut(3)
            .expect("registered")
            .tile(0, &mut store)
            .expect("tile");
        assert_eq!(tile.name, "Cavern_0");
        assert_eq!(tile.rect, Rect::new(0.0, 16.0, 16.0, 16.0));
    }

    #[test]
    fn missing_slice_name_is_an_error() {
        let def = def();
        let mut slices = slices_for(&def);
        slices[2].name = "Other_2".into();
        let mut registry = TilesetRegistry::new();
        registry.register(&def, slices).expect("register");
        let mut store = MemoryAssets::default();

        let err = registry
            .get_mut(3)
            .expect("registered")
            .tile(2, &mut store)
            .unwrap_err();
        assert!(matches!(err, ImportError::SliceMissing { .. }));
    }

    #[test]
    fn unknown_uid_is_none() {
        let registry = TilesetRegistry::new();
        assert!(registry.get(42).is_none());
        assert!(registry.is_empty());
    }
}
