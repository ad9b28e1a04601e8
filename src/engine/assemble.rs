//! Result assembler: per-tile outputs into one logical output.

use crate::error::{EngineError, EngineResult};

/// Collects tile outputs in any order and concatenates them in tile order.
pub struct ResultAssembler<U> {
    slots: Vec<Option<Vec<U>>>,
    tile_width: usize,
    logical_out: usize,
}

impl<U> ResultAssembler<U> {
    pub fn new(tiles: usize, tile_width: usize, logical_out: usize) -> Self {
        Self {
            slots: (0..tiles).map(|_| None).collect(),
            tile_width,
            logical_out,
        }
    }

    pub fn insert(&mut self, index: usize, lanes: Vec<U>) -> EngineResult<()> {
        let tiles = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(EngineError::TileOutOfRange { index, tiles })?;
        if lanes.len() != self.tile_width {
            return Err(EngineError::PrimitiveWidth { expected: self.tile_width, actual: lanes.len() });
        }
        *slot = Some(lanes);
        Ok(())
    }

    /// Concatenated output, with pad lanes beyond the logical length dropped.
    pub fn finish(self) -> EngineResult<Vec<U>> {
        let missing = self.slots.iter().filter(|s| s.is_none()).count();
        if missing > 0 {
            return Err(EngineError::IncompleteAssembly { missing });
        }
        let mut out: Vec<U> = self.slots.into_iter().flatten().flatten().collect();
        out.truncate(self.logical_out);
        Ok(out)
    }
}
