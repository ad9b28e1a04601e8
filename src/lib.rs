//! tilevec-kernels: decomposition of arbitrary-length vector arithmetic onto
//! fixed-width SIMD primitives.
//!
//! Every logical operation (add, multiply-accumulate, compare and select,
//! bitwise logic, filter, interleave, reverse, negate, conjugate, reduce,
//! sliding multiply) is expressed as one or more
//! calls to native primitives whose lane count depends on element type,
//! operation family and processor generation:
//! - **Resolver**: data-driven capability table per generation, cached once
//! - **Tiler**: pad / direct / split over the native width, any power-of-two length
//! - **Primitive seam**: [`Primitives`] trait, [`SoftPrimitives`] software binding
//!
//! # Quick Start
//!
//! ```ignore
//! use tilevec_kernels::{Engine, Generation, LogicalVector};
//!
//! let engine = Engine::new(Generation::Gen1);
//! let a = LogicalVector::from_fn(128, |i| i as i8)?;
//! let b = LogicalVector::splat(128, 1i8)?;
//! let sum = engine.add(&a, &b)?; // four 32-lane calls
//! ```

pub mod complex;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod ops;
pub mod primitives;
pub mod traits;
pub mod types;
pub mod validation;
pub mod vector;

pub use complex::Complex;
pub use config::{EngineConfig, PadFill, TileSchedule};
pub use dispatch::{CapabilityTable, Generation, NativeEntry, NativeWidthResolver, Resolution, WidthRule};
pub use engine::{Engine, Operand, TilePath, TilePlan};
pub use error::{EngineError, EngineResult};
pub use ops::{to_vector, SlidingMul};
pub use primitives::{
    AccOp, BinaryOp, BitOp, CompareOp, Primitives, PrimitiveSignature, ReduceOp, SoftPrimitives, UnaryOp,
};
pub use traits::{Bitwise, Element, Widen};
pub use types::{ElementType, Int4, NumericClass, OperandRole, OperationFamily, UInt4};
pub use vector::LogicalVector;
