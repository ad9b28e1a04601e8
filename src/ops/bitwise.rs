//! Bitwise and/or/xor/not on integer lanes.
//!
//! These run on the ALU at the Add-family width. Complement has no kernel
//! of its own: it is `xor` against a broadcast all-ones lane.

use crate::engine::adapter::{pack_lanes, unpack_operand};
use crate::engine::{Engine, Operand};
use crate::error::EngineResult;
use crate::primitives::{BitOp, Primitives};
use crate::traits::Bitwise;
use crate::types::OperationFamily;
use crate::vector::LogicalVector;

impl<P: Primitives> Engine<P> {
    pub fn bitwise<'a, T>(
        &self,
        op: BitOp,
        a: impl Into<Operand<'a, T>>,
        b: impl Into<Operand<'a, T>>,
    ) -> EngineResult<LogicalVector<T>>
    where
        T: Bitwise,
        T::Unpacked: Bitwise,
    {
        let (a, b) = (a.into(), b.into());
        let res = self.resolve(OperationFamily::Add, T::DESCRIPTOR)?;
        let lanes = if res.unpack {
            let (a, b) = (unpack_operand(a), unpack_operand(b));
            pack_lanes::<T>(self.bitwise_lanes(res.width, op, a.as_operand(), b.as_operand())?)
        } else {
            self.bitwise_lanes(res.width, op, a, b)?
        };
        Ok(LogicalVector::from_lanes(lanes))
    }

    pub fn bitwise_and<T>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<T>>
    where
        T: Bitwise,
        T::Unpacked: Bitwise,
    {
        self.bitwise(BitOp::And, a, b)
    }

    pub fn bitwise_or<T>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<T>>
    where
        T: Bitwise,
        T::Unpacked: Bitwise,
    {
        self.bitwise(BitOp::Or, a, b)
    }

    pub fn bitwise_xor<T>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<T>>
    where
        T: Bitwise,
        T::Unpacked: Bitwise,
    {
        self.bitwise(BitOp::Xor, a, b)
    }

    pub fn bitwise_not<T>(&self, a: &LogicalVector<T>) -> EngineResult<LogicalVector<T>>
    where
        T: Bitwise,
        T::Unpacked: Bitwise,
    {
        self.bitwise(BitOp::Xor, a, Operand::Scalar(T::ALL_ONES))
    }
}
