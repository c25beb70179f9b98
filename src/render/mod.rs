mod scene;

pub use scene::{GridNode, Scene, TileRecord, TilemapNode};
