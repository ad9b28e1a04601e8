//! Complex lanes and their interleaved real layout.
//!
//! A complex vector of L lanes is handled as 2L real lanes ordered
//! `re0, im0, re1, im1, ...`; the engine's zip/unzip with step 1 moves
//! between that layout and separate real/imaginary vectors.

use serde::{Deserialize, Serialize};

use crate::traits::Element;
use crate::types::ElementType;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl<T: Element> Complex<T> {
    /// Descriptor of a complex lane built on `T`.
    pub const fn descriptor() -> ElementType {
        ElementType::complex(T::DESCRIPTOR)
    }

    pub fn conj(self) -> Self {
        Self { re: self.re, im: self.im.neg() }
    }
}

/// `re0, im0, re1, im1, ...`
pub fn interleave<T: Copy>(lanes: &[Complex<T>]) -> Vec<T> {
    lanes.iter().flat_map(|c| [c.re, c.im]).collect()
}

/// Inverse of [`interleave`]. A trailing odd lane is dropped.
pub fn deinterleave<T: Copy>(lanes: &[T]) -> Vec<Complex<T>> {
    lanes.chunks_exact(2).map(|p| Complex::new(p[0], p[1])).collect()
}

/// Pairs separate real and imaginary vectors lane by lane.
pub fn from_parts<T: Copy>(re: &[T], im: &[T]) -> Vec<Complex<T>> {
    re.iter().zip(im).map(|(&r, &i)| Complex::new(r, i)).collect()
}
