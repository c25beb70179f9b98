//! Stacked sparse tile grids and the collision resolver that fills them.

mod index;
mod stack;

pub use index::{CellKey, FlipBits, Occupant, StackLayer, FLIP_X, FLIP_Y};
pub use stack::{place_all, LayerStack};
