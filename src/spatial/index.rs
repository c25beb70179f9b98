use macroquad::math::{vec3, IVec2, Mat4, UVec2};
use std::collections::BTreeMap;

/// Horizontal mirror bit.
pub const FLIP_X: u8 = 0b01;
/// Vertical mirror bit.
pub const FLIP_Y: u8 = 0b10;

/// Mirror flags of a placed tile, as stored in the editor export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlipBits(pub u8);

impl FlipBits {
    /// No mirroring.
    pub const NONE: FlipBits = FlipBits(0);

    /// Flags for the given mirror axes.
    #[inline]
    pub fn new(flip_x: bool, flip_y: bool) -> Self {
        let mut bits = 0;
        if flip_x {
            bits |= FLIP_X;
        }
        if flip_y {
            bits |= FLIP_Y;
        }
        FlipBits(bits)
    }
    /// Low two bits of an exported flag value; higher bits are ignored.
    #[inline] pub fn from_raw(raw: i64) -> Self { FlipBits((raw & 0b11) as u8) }
    /// Mirrored horizontally.
    #[inline] pub fn flip_x(self) -> bool { (self.0 & FLIP_X) != 0 }
    /// Mirrored vertically.
    #[inline] pub fn flip_y(self) -> bool { (self.0 & FLIP_Y) != 0 }

    /// Symmetry transform: a scale of -1 on each mirrored axis.
    pub fn transform(self) -> Mat4 {
        let sx = if self.flip_x() { -1.0 } else { 1.0 };
        let sy = if self.flip_y() { -1.0 } else { 1.0 };
        Mat4::from_scale(vec3(sx, sy, 1.0))
    }
}

/// Cell address as stored in a stack layer.
///
/// The editor counts rows downwards while the renderer counts them upwards, so
/// the logical row is negated on the way in. Ordering is by stored row, then
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Stored row, the negated editor row.
    pub y: i32,
    /// Column.
    pub x: i32,
}

impl CellKey {
    /// Key from already stored coordinates.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        CellKey { x, y }
    }

    /// Key of an editor cell.
    #[inline]
    pub fn from_logical(cell: IVec2) -> Self {
        CellKey { x: cell.x, y: -cell.y }
    }

    /// Editor cell this key stands for.
    #[inline]
    pub fn logical(self) -> IVec2 {
        IVec2::new(self.x, -self.y)
    }
}

/// A tile sitting in one stack layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Occupant<T> {
    /// Placed tile.
    pub tile: T,
    /// Mirroring of the tile.
    pub flips: FlipBits,
    /// Cells covered from the anchor.
    pub footprint: UVec2,
}

/// One grid of a layer stack: tiles keyed by their anchor cell.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayer<T> {
    cells: BTreeMap<CellKey, Occupant<T>>,
    max_footprint: UVec2,
}

impl<T> Default for StackLayer<T> {
    fn default() -> Self {
        StackLayer {
            cells: BTreeMap::new(),
            max_footprint: UVec2::ONE,
        }
    }
}

impl<T> StackLayer<T> {
    /// Occupant anchored at `key`.
    pub fn get(&self, key: CellKey) -> Option<&Occupant<T>> {
        self.cells.get(&key)
    }

    /// Number of anchored tiles.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no tile is anchored here.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupants in key order.
    pub fn iter(&self) -> impl Iterator<Item = (CellKey, &Occupant<T>)> {
        self.cells.iter().map(|(k, v)| (*k, v))
    }

    pub(crate) fn insert(&mut self, cell: IVec2, occupant: Occupant<T>) {
        self.max_footprint = self.max_footprint.max(occupant.footprint);
        self.cells.insert(CellKey::from_logical(cell), occupant);
    }

    /// Remove every tile whose footprint overlaps `footprint` anchored at
    /// `cell`, in ascending logical row then column order.
    pub(crate) fn take_overlapping(
        &mut self,
        cell: IVec2,
        footprint: UVec2,
    ) -> Vec<(IVec2, Occupant<T>)> {
        let reach = self.max_footprint.as_ivec2() - IVec2::ONE;
        let size = footprint.as_ivec2();

        let mut hits = Vec::new();
        for y in (cell.y - reach.y)..(cell.y + size.y) {
            for x in (cell.x - reach.x)..(cell.x + size.x) {
                let anchor = IVec2::new(x, y);
                let key = CellKey::from_logical(anchor);
                let overlaps = self.cells.get(&key).is_some_and(|occ| {
                    let end = anchor + occ.footprint.as_ivec2();
                    end.x > cell.x && end.y > cell.y
                });
                if overlaps {
                    hits.push(anchor);
                }
            }
        }

        hits.into_iter()
            .filter_map(|anchor| {
                self.cells
                    .remove(&CellKey::from_logical(anchor))
                    .map(|occ| (anchor, occ))
            })
            .collect()
    }
}
