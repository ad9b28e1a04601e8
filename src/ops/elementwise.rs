//! Elementwise binary and unary operations.

use crate::engine::adapter::{pack_lanes, promote_operand, unpack_lanes, unpack_operand};
use crate::engine::{Engine, Operand};
use crate::error::{EngineError, EngineResult};
use crate::primitives::{BinaryOp, Primitives, UnaryOp};
use crate::traits::{Element, Widen};
use crate::types::OperationFamily;
use crate::vector::LogicalVector;

impl<P: Primitives> Engine<P> {
    /// `out[i] = op(a[i], b[i])`. Either side may be a broadcast scalar.
    pub fn binary<'a, T: Element>(
        &self,
        op: BinaryOp,
        a: impl Into<Operand<'a, T>>,
        b: impl Into<Operand<'a, T>>,
    ) -> EngineResult<LogicalVector<T>> {
        let (a, b) = (a.into(), b.into());
        let family = op.family();
        let res = self.resolve(family, T::DESCRIPTOR)?;
        let lanes = if res.unpack {
            let (a, b) = (unpack_operand(a), unpack_operand(b));
            pack_lanes::<T>(self.binary_lanes(family, res.width, op, a.as_operand(), b.as_operand())?)
        } else {
            self.binary_lanes(family, res.width, op, a, b)?
        };
        Ok(LogicalVector::from_lanes(lanes))
    }

    pub fn add<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<T>> {
        self.binary(BinaryOp::Add, a, b)
    }

    pub fn sub<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<T>> {
        self.binary(BinaryOp::Sub, a, b)
    }

    /// Lane-type product (wrapping for integers). See [`Engine::mul`] for
    /// products in the accumulator domain.
    pub fn mul_elem<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<T>> {
        self.binary(BinaryOp::Mul, a, b)
    }

    pub fn max<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<T>> {
        self.binary(BinaryOp::Max, a, b)
    }

    pub fn min<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<T>> {
        self.binary(BinaryOp::Min, a, b)
    }

    pub fn add_scalar<T: Element>(&self, a: &LogicalVector<T>, s: T) -> EngineResult<LogicalVector<T>> {
        self.binary(BinaryOp::Add, a, Operand::Scalar(s))
    }

    pub fn sub_scalar<T: Element>(&self, a: &LogicalVector<T>, s: T) -> EngineResult<LogicalVector<T>> {
        self.binary(BinaryOp::Sub, a, Operand::Scalar(s))
    }

    pub fn mul_elem_scalar<T: Element>(&self, a: &LogicalVector<T>, s: T) -> EngineResult<LogicalVector<T>> {
        self.binary(BinaryOp::Mul, a, Operand::Scalar(s))
    }

    /// Mixed-width binary: `a` is promoted to `b`'s wider type, sign
    /// preserved, before the native width is resolved.
    pub fn binary_widening<'a, N: Widen>(
        &self,
        op: BinaryOp,
        a: impl Into<Operand<'a, N>>,
        b: impl Into<Operand<'a, N::Wider>>,
    ) -> EngineResult<LogicalVector<N::Wider>> {
        let family = op.family();
        let wide = <N::Wider as Element>::DESCRIPTOR;
        let res = self.resolver().resolve_mixed(family, N::DESCRIPTOR, wide)?;
        if res.element != wide {
            return Err(EngineError::Unsupported { family, element: N::DESCRIPTOR, generation: self.generation() });
        }
        let promoted = promote_operand(a.into());
        self.binary(op, promoted.as_operand(), b.into())
    }

    pub fn add_widening<N: Widen>(
        &self,
        a: &LogicalVector<N>,
        b: &LogicalVector<N::Wider>,
    ) -> EngineResult<LogicalVector<N::Wider>> {
        self.binary_widening(BinaryOp::Add, a, b)
    }

    pub fn sub_widening<N: Widen>(
        &self,
        a: &LogicalVector<N>,
        b: &LogicalVector<N::Wider>,
    ) -> EngineResult<LogicalVector<N::Wider>> {
        self.binary_widening(BinaryOp::Sub, a, b)
    }

    pub fn unary<T: Element>(&self, op: UnaryOp, a: &LogicalVector<T>) -> EngineResult<LogicalVector<T>> {
        let res = self.resolve(OperationFamily::Neg, T::DESCRIPTOR)?;
        let lanes = if res.unpack {
            let unpacked = unpack_lanes(a.as_slice());
            pack_lanes::<T>(self.unary_lanes(OperationFamily::Neg, res.width, op, &unpacked)?)
        } else {
            self.unary_lanes(OperationFamily::Neg, res.width, op, a.as_slice())?
        };
        Ok(LogicalVector::from_lanes(lanes))
    }

    pub fn neg<T: Element>(&self, a: &LogicalVector<T>) -> EngineResult<LogicalVector<T>> {
        self.unary(UnaryOp::Neg, a)
    }

    pub fn abs<T: Element>(&self, a: &LogicalVector<T>) -> EngineResult<LogicalVector<T>> {
        self.unary(UnaryOp::Abs, a)
    }
}
