use super::index::{FlipBits, Occupant, StackLayer};
use crate::command::TilePlacement;
use macroquad::math::{IVec2, UVec2};

/// Parallel tile grids that together hold overlapping tiles of one layer
/// instance. Layer 0 is the shallowest.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack<T> {
    layers: Vec<StackLayer<T>>,
    max_layers: usize,
    dropped: usize,
}

/// Pending placement: `occupant` goes to `depth` once everything in
/// `displaced` has been pushed one layer deeper.
struct Frame<T> {
    depth: usize,
    cell: IVec2,
    occupant: Occupant<T>,
    // reversed scan order, popped from the back
    displaced: Vec<(IVec2, Occupant<T>)>,
}

impl<T> LayerStack<T> {
    /// Empty stack holding at most `max_layers` layers.
    pub fn new(max_layers: usize) -> Self {
        LayerStack {
            layers: Vec::new(),
            max_layers,
            dropped: 0,
        }
    }

    /// Capacity in layers.
    pub fn max_layers(&self) -> usize {
        self.max_layers
    }

    /// Number of stack layers that received a tile.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Tiles pushed past the last allowed layer.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Stack layer `index`, 0 being on top.
    pub fn layer(&self, index: usize) -> Option<&StackLayer<T>> {
        self.layers.get(index)
    }

    /// All layers created so far.
    pub fn layers(&self) -> &[StackLayer<T>] {
        &self.layers
    }

    /// Tiles placed over all layers.
    pub fn tile_count(&self) -> usize {
        self.layers.iter().map(StackLayer::len).sum()
    }

    /// Put a tile on layer 0, pushing whatever it overlaps one layer down.
    ///
    /// Displacement cascades: a pushed tile may push others further down.
    /// A tile that would land on layer `max_layers` is dropped.
    pub fn place(&mut self, cell: IVec2, tile: T, flips: FlipBits, footprint: UVec2) {
        if self.max_layers == 0 {
            self.dropped += 1;
            return;
        }
        let occupant = Occupant {
            tile,
            flips,
            footprint: footprint.max(UVec2::ONE),
        };

        let mut work = vec![self.open(0, cell, occupant)];
        loop {
            let next = match work.last_mut() {
                Some(frame) => frame
                    .displaced
                    .pop()
                    .map(|(cell, occ)| (frame.depth + 1, cell, occ)),
                None => break,
            };
            match next {
                Some((depth, cell, occ)) if depth < self.max_layers => {
                    let frame = self.open(depth, cell, occ);
                    work.push(frame);
                }
                Some((depth, cell, _)) => {
                    log::trace!("dropping tile at {cell} below stack layer {}", depth - 1);
                    self.dropped += 1;
                }
                None => {
                    if let Some(done) = work.pop() {
                        self.layers[done.depth].insert(done.cell, done.occupant);
                    }
                }
            }
        }
    }

    fn open(&mut self, depth: usize, cell: IVec2, occupant: Occupant<T>) -> Frame<T> {
        while self.layers.len() <= depth {
            self.layers.push(StackLayer::default());
        }
        let mut displaced = self.layers[depth].take_overlapping(cell, occupant.footprint);
        displaced.reverse();
        Frame {
            depth,
            cell,
            occupant,
            displaced,
        }
    }
}

/// Resolve a layer instance's placements into a stack.
///
/// Commands are applied last to first, so the first command in the sequence
/// ends up on top whenever tiles collide. `tile_for` maps each command to its
/// tile; its first error aborts the whole stack.
pub fn place_all<T, E>(
    commands: &[TilePlacement],
    max_layers: usize,
    mut tile_for: impl FnMut(&TilePlacement) -> Result<T, E>,
) -> Result<LayerStack<T>, E> {
    let mut stack = LayerStack::new(max_layers);
    for cmd in commands.iter().rev() {
        let tile = tile_for(cmd)?;
        stack.place(cmd.cell, tile, cmd.flips, cmd.footprint);
    }
    Ok(stack)
}
