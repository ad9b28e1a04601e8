//! Lane predicates and mask select.
//!
//! Masks are `LogicalVector<bool>` with the same length as the compared
//! vectors. Both run in the Compare family.

use crate::engine::adapter::{pack_lanes, unpack_operand};
use crate::engine::{Engine, Operand};
use crate::error::EngineResult;
use crate::primitives::{CompareOp, Primitives};
use crate::traits::Element;
use crate::types::OperationFamily;
use crate::vector::LogicalVector;

impl<P: Primitives> Engine<P> {
    /// `mask[i] = op(a[i], b[i])`. Either side may be a broadcast scalar.
    pub fn compare<'a, T: Element>(
        &self,
        op: CompareOp,
        a: impl Into<Operand<'a, T>>,
        b: impl Into<Operand<'a, T>>,
    ) -> EngineResult<LogicalVector<bool>> {
        let (a, b) = (a.into(), b.into());
        let res = self.resolve(OperationFamily::Compare, T::DESCRIPTOR)?;
        let mask = if res.unpack {
            let (a, b) = (unpack_operand(a), unpack_operand(b));
            self.compare_lanes(res.width, op, a.as_operand(), b.as_operand())?
        } else {
            self.compare_lanes(res.width, op, a, b)?
        };
        Ok(LogicalVector::from_lanes(mask))
    }

    pub fn lt<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<bool>> {
        self.compare(CompareOp::Lt, a, b)
    }

    pub fn ge<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<bool>> {
        self.compare(CompareOp::Ge, a, b)
    }

    pub fn eq<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<bool>> {
        self.compare(CompareOp::Eq, a, b)
    }

    pub fn neq<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<bool>> {
        self.compare(CompareOp::Neq, a, b)
    }

    /// `out[i] = if mask[i] { b[i] } else { a[i] }`. The mask fixes the
    /// length; `a` and `b` may be broadcast scalars.
    pub fn select<'a, T: Element>(
        &self,
        mask: &LogicalVector<bool>,
        a: impl Into<Operand<'a, T>>,
        b: impl Into<Operand<'a, T>>,
    ) -> EngineResult<LogicalVector<T>> {
        let (a, b) = (a.into(), b.into());
        let res = self.resolve(OperationFamily::Compare, T::DESCRIPTOR)?;
        let lanes = if res.unpack {
            let (a, b) = (unpack_operand(a), unpack_operand(b));
            pack_lanes::<T>(self.select_lanes(res.width, mask.as_slice(), a.as_operand(), b.as_operand())?)
        } else {
            self.select_lanes(res.width, mask.as_slice(), a, b)?
        };
        Ok(LogicalVector::from_lanes(lanes))
    }
}
