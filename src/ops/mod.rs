//! Public entry points.
//!
//! Each operation resolves its native width from the engine's capability
//! table and then runs through the generic decomposer, so every entry point
//! accepts any power-of-two length.

pub mod bitwise;
pub mod compare;
pub mod complex;
pub mod elementwise;
pub mod mac;
pub mod reduce;
pub mod shuffle;
pub mod sliding;

pub use mac::to_vector;
pub use sliding::SlidingMul;
