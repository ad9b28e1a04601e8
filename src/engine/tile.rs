//! Pad / direct / split decomposition of one logical length over one native width.

use crate::error::EngineResult;
use crate::validation::{validate_logical_len, validate_native_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TilePath {
    /// L < W: grow operands to W, one call, truncate.
    Pad,
    /// L == W: one call on the operands as given.
    Direct,
    /// L > W: L / W disjoint tiles in lane order.
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePlan {
    pub logical_len: usize,
    pub native_width: usize,
    pub path: TilePath,
    pub tiles: usize,
}

impl TilePlan {
    pub fn new(logical_len: usize, native_width: usize) -> EngineResult<Self> {
        validate_logical_len(logical_len)?;
        validate_native_width(native_width)?;

        let (path, tiles) = if logical_len < native_width {
            (TilePath::Pad, 1)
        } else if logical_len == native_width {
            (TilePath::Direct, 1)
        } else {
            (TilePath::Split, logical_len / native_width)
        };
        Ok(Self { logical_len, native_width, path, tiles })
    }

    /// Lanes of the operand buffer once adapted for this plan.
    #[inline]
    pub fn realized_len(&self) -> usize {
        self.logical_len.max(self.native_width)
    }

    /// Lane range of tile `index` inside the realized operand.
    #[inline]
    pub fn tile_range(&self, index: usize) -> std::ops::Range<usize> {
        let start = index * self.native_width;
        start..start + self.native_width
    }

    /// Output lanes kept after assembly when each call yields `out_width` lanes.
    #[inline]
    pub fn logical_out(&self, out_width: usize) -> usize {
        self.logical_len * out_width / self.native_width
    }
}
