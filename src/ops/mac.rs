//! Fused multiply-accumulate and accumulator arithmetic.

use crate::engine::adapter::{unpack_lanes, unpack_operand};
use crate::engine::{Engine, Operand};
use crate::error::EngineResult;
use crate::primitives::{AccOp, Primitives};
use crate::traits::Element;
use crate::types::OperationFamily;
use crate::vector::LogicalVector;

impl<P: Primitives> Engine<P> {
    /// `op(acc, a * b)` in the accumulator domain. `acc == None` runs every
    /// tile with the zero flag.
    pub fn mac<'a, T: Element>(
        &self,
        op: AccOp,
        acc: Option<&LogicalVector<T::Acc>>,
        a: impl Into<Operand<'a, T>>,
        b: impl Into<Operand<'a, T>>,
    ) -> EngineResult<LogicalVector<T::Acc>> {
        let (a, b) = (a.into(), b.into());
        let acc = acc.map(LogicalVector::as_slice);
        let res = self.resolve(OperationFamily::Mul, T::DESCRIPTOR)?;
        let lanes = if res.unpack {
            let (a, b) = (unpack_operand(a), unpack_operand(b));
            self.mul_acc_lanes::<T::Unpacked>(res.width, op, acc, a.as_operand(), b.as_operand())?
        } else {
            self.mul_acc_lanes(res.width, op, acc, a, b)?
        };
        Ok(LogicalVector::from_lanes(lanes))
    }

    /// `a * b` into a fresh accumulator.
    pub fn mul<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<T::Acc>> {
        self.mac(AccOp::Add, None, a, b)
    }

    /// `-(a * b)` into a fresh accumulator.
    pub fn negmul<T: Element>(&self, a: &LogicalVector<T>, b: &LogicalVector<T>) -> EngineResult<LogicalVector<T::Acc>> {
        self.mac(AccOp::Sub, None, a, b)
    }

    pub fn mul_acc<T: Element>(
        &self,
        acc: &LogicalVector<T::Acc>,
        a: &LogicalVector<T>,
        b: &LogicalVector<T>,
    ) -> EngineResult<LogicalVector<T::Acc>> {
        self.mac(AccOp::Add, Some(acc), a, b)
    }

    pub fn mul_sub<T: Element>(
        &self,
        acc: &LogicalVector<T::Acc>,
        a: &LogicalVector<T>,
        b: &LogicalVector<T>,
    ) -> EngineResult<LogicalVector<T::Acc>> {
        self.mac(AccOp::Sub, Some(acc), a, b)
    }

    /// `a * a` into a fresh accumulator.
    pub fn square<T: Element>(&self, a: &LogicalVector<T>) -> EngineResult<LogicalVector<T::Acc>> {
        self.mac(AccOp::Add, None, a, a)
    }

    pub fn mul_scalar<T: Element>(&self, a: &LogicalVector<T>, s: T) -> EngineResult<LogicalVector<T::Acc>> {
        self.mac(AccOp::Add, None, a, Operand::Scalar(s))
    }

    pub fn mul_acc_scalar<T: Element>(
        &self,
        acc: &LogicalVector<T::Acc>,
        a: &LogicalVector<T>,
        s: T,
    ) -> EngineResult<LogicalVector<T::Acc>> {
        self.mac(AccOp::Add, Some(acc), a, Operand::Scalar(s))
    }

    /// `op(acc, v)` with `v` promoted to the accumulator type.
    pub fn acc_update<'a, T: Element>(
        &self,
        op: AccOp,
        acc: Option<&LogicalVector<T::Acc>>,
        v: impl Into<Operand<'a, T>>,
    ) -> EngineResult<LogicalVector<T::Acc>> {
        let v = v.into();
        let acc = acc.map(LogicalVector::as_slice);
        let res = self.resolve(OperationFamily::Add, T::DESCRIPTOR)?;
        let lanes = if res.unpack {
            let v = unpack_operand(v);
            self.add_acc_lanes::<T::Unpacked>(res.width, op, acc, v.as_operand())?
        } else {
            self.add_acc_lanes(res.width, op, acc, v)?
        };
        Ok(LogicalVector::from_lanes(lanes))
    }

    pub fn add_acc<T: Element>(&self, acc: &LogicalVector<T::Acc>, v: &LogicalVector<T>) -> EngineResult<LogicalVector<T::Acc>> {
        self.acc_update(AccOp::Add, Some(acc), v)
    }

    pub fn sub_acc<T: Element>(&self, acc: &LogicalVector<T::Acc>, v: &LogicalVector<T>) -> EngineResult<LogicalVector<T::Acc>> {
        self.acc_update(AccOp::Sub, Some(acc), v)
    }

    /// `acc + sum_j coeff[(coeff_start + j * coeff_step) % coeff.len()] * data[j]`.
    pub fn accumulate<T: Element>(
        &self,
        acc: Option<&LogicalVector<T::Acc>>,
        coeff: &[T],
        coeff_start: usize,
        coeff_step: usize,
        data: &[&LogicalVector<T>],
    ) -> EngineResult<LogicalVector<T::Acc>> {
        let acc = acc.map(LogicalVector::as_slice);
        let res = self.resolve(OperationFamily::Mul, T::DESCRIPTOR)?;
        let lanes = if res.unpack {
            let coeff = unpack_lanes(coeff);
            let data: Vec<Vec<T::Unpacked>> = data.iter().map(|d| unpack_lanes(d.as_slice())).collect();
            let views: Vec<&[T::Unpacked]> = data.iter().map(Vec::as_slice).collect();
            self.accumulate_lanes::<T::Unpacked>(res.width, acc, &coeff, coeff_start, coeff_step, &views)?
        } else {
            let views: Vec<&[T]> = data.iter().map(|d| d.as_slice()).collect();
            self.accumulate_lanes(res.width, acc, coeff, coeff_start, coeff_step, &views)?
        };
        Ok(LogicalVector::from_lanes(lanes))
    }
}

/// Accumulator to vector with plain truncation.
pub fn to_vector<T: Element>(acc: &LogicalVector<T::Acc>) -> LogicalVector<T> {
    acc.map(T::from_acc)
}
