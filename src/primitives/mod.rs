//! Native Primitive Set seam.
//!
//! Every method models one fixed-width hardware kernel: each vector operand
//! carries exactly the native width `W` of the call (2W for the lo/hi pair
//! forms), and each result must carry the documented lane count. The
//! decomposer checks result widths and reports violations as
//! [`EngineError::PrimitiveWidth`](crate::EngineError::PrimitiveWidth).

pub mod soft;

pub use soft::SoftPrimitives;

use crate::traits::{Bitwise, Element};
use crate::types::OperationFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Max,
    Min,
}

impl BinaryOp {
    pub const fn family(self) -> OperationFamily {
        match self {
            BinaryOp::Add | BinaryOp::Sub => OperationFamily::Add,
            BinaryOp::Mul => OperationFamily::Mul,
            BinaryOp::Max | BinaryOp::Min => OperationFamily::Compare,
        }
    }

    #[inline(always)]
    pub fn apply<E: Element>(self, a: E, b: E) -> E {
        match self {
            BinaryOp::Add => a.elem_add(b),
            BinaryOp::Sub => a.elem_sub(b),
            BinaryOp::Mul => a.elem_mul(b),
            BinaryOp::Max => a.max(b),
            BinaryOp::Min => a.min(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Abs,
}

impl UnaryOp {
    #[inline(always)]
    pub fn apply<E: Element>(self, a: E) -> E {
        match self {
            UnaryOp::Neg => a.neg(),
            UnaryOp::Abs => a.abs(),
        }
    }
}

/// Lane predicates producing a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Lt,
    Ge,
    Eq,
    Neq,
}

impl CompareOp {
    #[inline(always)]
    pub fn apply<E: Element>(self, a: E, b: E) -> bool {
        match self {
            CompareOp::Lt => a < b,
            CompareOp::Ge => a >= b,
            CompareOp::Eq => a == b,
            CompareOp::Neq => a != b,
        }
    }
}

/// Integer bit operations. Complement is `Xor` against [`Bitwise::ALL_ONES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitOp {
    And,
    Or,
    Xor,
}

impl BitOp {
    #[inline(always)]
    pub fn apply<E: Bitwise>(self, a: E, b: E) -> E {
        match self {
            BitOp::And => a.bit_and(b),
            BitOp::Or => a.bit_or(b),
            BitOp::Xor => a.bit_xor(b),
        }
    }
}

/// Direction in which a product or vector enters the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccOp {
    Add,
    Sub,
}

impl AccOp {
    #[inline(always)]
    pub fn apply<A: Element>(self, acc: A, v: A) -> A {
        match self {
            AccOp::Add => acc.elem_add(v),
            AccOp::Sub => acc.elem_sub(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReduceOp {
    Add,
    Mul,
    Max,
    Min,
}

impl ReduceOp {
    pub const fn combiner(self) -> BinaryOp {
        match self {
            ReduceOp::Add => BinaryOp::Add,
            ReduceOp::Mul => BinaryOp::Mul,
            ReduceOp::Max => BinaryOp::Max,
            ReduceOp::Min => BinaryOp::Min,
        }
    }
}

/// Call shape of one primitive: operand count, accumulator use, lane count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveSignature {
    pub family: OperationFamily,
    pub arity: usize,
    pub accumulator: bool,
    pub width: usize,
}

impl PrimitiveSignature {
    pub const fn new(family: OperationFamily, arity: usize, width: usize) -> Self {
        Self { family, arity, accumulator: false, width }
    }

    pub const fn with_accumulator(mut self) -> Self {
        self.accumulator = true;
        self
    }
}

/// Fixed-width kernels the decomposer drives.
///
/// Accumulator forms take a `zero_acc` flag: when set, the prior
/// accumulator is treated as absent and `acc` is not read (it may be empty).
///
/// A binding that lacks some call shapes says so through
/// [`provides`](Primitives::provides); the engine asks before the first
/// tile and fails with
/// [`EngineError::MissingPrimitive`](crate::EngineError::MissingPrimitive).
pub trait Primitives: Send + Sync {
    /// Whether this binding has a kernel of the given shape.
    fn provides(&self, _signature: &PrimitiveSignature) -> bool {
        true
    }

    /// `out[i] = op(a[i], b[i])`, W lanes.
    fn binary<E: Element>(&self, op: BinaryOp, a: &[E], b: &[E]) -> Vec<E>;

    fn unary<E: Element>(&self, op: UnaryOp, a: &[E]) -> Vec<E>;

    /// `out[i] = op(acc[i], a[i] * b[i])` computed in the accumulator domain.
    fn mul_acc<E: Element>(&self, op: AccOp, acc: &[E::Acc], zero_acc: bool, a: &[E], b: &[E]) -> Vec<E::Acc>;

    /// `out[i] = op(acc[i], v[i])` with `v` promoted to the accumulator domain.
    fn add_acc<E: Element>(&self, op: AccOp, acc: &[E::Acc], zero_acc: bool, v: &[E]) -> Vec<E::Acc>;

    /// `out[i] = op(v[i], v[i + shift])`; lanes whose partner falls outside
    /// the register keep `v[i]`.
    fn shift_combine<E: Element>(&self, op: ReduceOp, v: &[E], shift: usize) -> Vec<E>;

    /// Keeps alternating `step`-lane chunks of the 2W-lane register `lo ++ hi`
    /// (even chunks, or odd ones when `odd`). Returns W lanes. `step <= W`.
    fn filter<E: Element>(&self, lo: &[E], hi: &[E], step: usize, odd: bool) -> Vec<E>;

    /// Interleaves `step`-lane chunks of `a` and `b`. Returns the 2W-lane
    /// stream as its lower and upper halves. `step <= W`.
    fn zip<E: Element>(&self, a: &[E], b: &[E], step: usize) -> (Vec<E>, Vec<E>);

    /// Inverse of [`zip`](Primitives::zip) over the stream `lo ++ hi`.
    fn unzip<E: Element>(&self, lo: &[E], hi: &[E], step: usize) -> (Vec<E>, Vec<E>);

    /// `out[i] = op(a[i], b[i])` as a W-lane mask.
    fn compare<E: Element>(&self, op: CompareOp, a: &[E], b: &[E]) -> Vec<bool>;

    /// `out[i] = if mask[i] { b[i] } else { a[i] }`.
    fn select<E: Element>(&self, a: &[E], b: &[E], mask: &[bool]) -> Vec<E>;

    fn bitwise<E: Bitwise>(&self, op: BitOp, a: &[E], b: &[E]) -> Vec<E>;

    /// `out[i] = v[W - 1 - i]`.
    fn reverse<E: Element>(&self, v: &[E]) -> Vec<E>;
}
