//! Scalar reference implementations, one lane at a time.
//!
//! These serve as the golden reference for decomposition tests: every
//! function walks the logical vector index by index with no notion of native
//! width, tiles or padding. Arithmetic is supplied by the caller as a closure
//! so the same reference covers wrapping integers and floats.

pub mod elementwise;
pub mod mac;
pub mod reduce;
pub mod shuffle;

pub use elementwise::{binary, select, unary};
pub use mac::{accumulate, complex_mul, sliding_mul};
pub use reduce::{sequential_reduce, tree_reduce};
pub use shuffle::{filter_serial, reverse_serial, unzip_serial, zip_serial};
