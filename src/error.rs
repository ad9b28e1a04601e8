//! Error type shared by the resolver, the decomposition engine and the ops.
//!
//! Nearly every variant describes a static configuration problem (an
//! unsupported type/generation pair, a length the tiler cannot express, a
//! primitive binding that breaks its lane contract). Numeric conditions such
//! as overflow are never reported here.

use thiserror::Error;

use crate::dispatch::Generation;
use crate::types::{ElementType, OperationFamily};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unsupported combination: {family:?} on {element} for {generation:?}")]
    Unsupported {
        family: OperationFamily,
        element: ElementType,
        generation: Generation,
    },
    #[error("logical length {len} is not a power of two")]
    NotPowerOfTwo { len: usize },
    #[error("native width {width} cannot drive the pad/direct/split tiler")]
    InvalidNativeWidth { width: usize },
    #[error("operand length mismatch: expected {expected} lanes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("primitive returned {actual} lanes, native width is {expected}")]
    PrimitiveWidth { expected: usize, actual: usize },
    #[error("primitive set has no {arity}-operand {family:?} kernel of width {width} (accumulator: {accumulator})")]
    MissingPrimitive {
        family: OperationFamily,
        arity: usize,
        accumulator: bool,
        width: usize,
    },
    #[error("step {step} is not valid for a {len}-lane vector")]
    InvalidStep { step: usize, len: usize },
    #[error("operation needs at least one operand")]
    NoOperands,
    #[error("tile index {index} out of range for {tiles} tiles")]
    TileOutOfRange { index: usize, tiles: usize },
    #[error("result assembly incomplete: {missing} tile(s) never written")]
    IncompleteAssembly { missing: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
