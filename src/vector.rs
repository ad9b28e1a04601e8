//! Immutable power-of-two length vectors.

use std::ops::Index;

use crate::error::EngineResult;
use crate::validation::validate_logical_len;

/// Ordered, fixed-length lanes. The length is a power of two (>= 1).
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalVector<T> {
    lanes: Vec<T>,
}

impl<T: Copy> LogicalVector<T> {
    pub fn new(lanes: Vec<T>) -> EngineResult<Self> {
        validate_logical_len(lanes.len())?;
        Ok(Self { lanes })
    }

    pub fn from_slice(lanes: &[T]) -> EngineResult<Self> {
        Self::new(lanes.to_vec())
    }

    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> EngineResult<Self> {
        validate_logical_len(len)?;
        Ok(Self { lanes: (0..len).map(f).collect() })
    }

    pub fn splat(len: usize, value: T) -> EngineResult<Self> {
        Self::from_fn(len, |_| value)
    }

    /// Wraps lanes whose length the caller already guarantees.
    pub(crate) fn from_lanes(lanes: Vec<T>) -> Self {
        debug_assert!(lanes.len().is_power_of_two());
        Self { lanes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.lanes
    }

    pub fn get(&self, i: usize) -> Option<T> {
        self.lanes.get(i).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.lanes.iter().copied()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.lanes
    }

    /// Lane-wise conversion; the length is unchanged.
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> LogicalVector<U> {
        LogicalVector { lanes: self.lanes.iter().copied().map(f).collect() }
    }
}

impl<T> Index<usize> for LogicalVector<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.lanes[i]
    }
}

impl<T> AsRef<[T]> for LogicalVector<T> {
    fn as_ref(&self) -> &[T] {
        &self.lanes
    }
}
