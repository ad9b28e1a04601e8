//! Accumulator chainer.
//!
//! Accumulation is per lane inside each tile's call; tiles never share a
//! running total. The zero flag travels into every call as a boolean, so an
//! absent accumulator is never materialized as a vector of zeros.

use crate::error::{EngineError, EngineResult};
use crate::primitives::{AccOp, Primitives, PrimitiveSignature};
use crate::traits::Element;
use crate::types::OperationFamily;

use super::adapter::{Operand, RealizedOperand};
use super::{logical_len, Engine};

impl<P: Primitives> Engine<P> {
    /// `op(acc, a * b)` per lane; `acc == None` is the zero flag.
    pub(crate) fn mul_acc_lanes<E: Element>(
        &self,
        width: usize,
        op: AccOp,
        acc: Option<&[E::Acc]>,
        a: Operand<'_, E>,
        b: Operand<'_, E>,
    ) -> EngineResult<Vec<E::Acc>> {
        let len = match (logical_len(&[a, b]), acc) {
            (Err(EngineError::NoOperands), Some(acc)) => acc.len(),
            (len, _) => len?,
        };
        let plan = self.plan_width(OperationFamily::Mul, len, width)?;
        let fill = self.config.pad_fill;
        let ra = RealizedOperand::realize(&plan, a, fill)?;
        let rb = RealizedOperand::realize(&plan, b, fill)?;
        let racc = acc.map(|acc| RealizedOperand::accumulator(&plan, acc, fill)).transpose()?;
        let zero_acc = racc.is_none();

        let sig = PrimitiveSignature::new(OperationFamily::Mul, 2, width).with_accumulator();
        self.execute(sig, &plan, width, |i| {
            let acc_tile = racc.as_ref().map_or(&[][..], |r| r.tile(i));
            self.primitives.mul_acc(op, acc_tile, zero_acc, ra.tile(i), rb.tile(i))
        })
    }

    /// `op(acc, v)` per lane with `v` promoted into the accumulator domain.
    pub(crate) fn add_acc_lanes<E: Element>(
        &self,
        width: usize,
        op: AccOp,
        acc: Option<&[E::Acc]>,
        v: Operand<'_, E>,
    ) -> EngineResult<Vec<E::Acc>> {
        let len = match (v, acc) {
            (Operand::Vector(v), _) => v.len(),
            (Operand::Scalar(_), Some(acc)) => acc.len(),
            (Operand::Scalar(_), None) => return Err(EngineError::NoOperands),
        };
        let plan = self.plan_width(OperationFamily::Add, len, width)?;
        let fill = self.config.pad_fill;
        let rv = RealizedOperand::realize(&plan, v, fill)?;
        let racc = acc.map(|acc| RealizedOperand::accumulator(&plan, acc, fill)).transpose()?;
        let zero_acc = racc.is_none();

        let sig = PrimitiveSignature::new(OperationFamily::Add, 1, width).with_accumulator();
        self.execute(sig, &plan, width, |i| {
            let acc_tile = racc.as_ref().map_or(&[][..], |r| r.tile(i));
            self.primitives.add_acc(op, acc_tile, zero_acc, rv.tile(i))
        })
    }

    /// `acc + sum_j coeff[(start + j * step) % coeff.len()] * data[j]`.
    ///
    /// Each coefficient is broadcast once for its term. Without an initial
    /// accumulator the first term runs with the zero flag.
    pub(crate) fn accumulate_lanes<E: Element>(
        &self,
        width: usize,
        acc: Option<&[E::Acc]>,
        coeff: &[E],
        coeff_start: usize,
        coeff_step: usize,
        data: &[&[E]],
    ) -> EngineResult<Vec<E::Acc>> {
        if data.is_empty() || coeff.is_empty() {
            return Err(EngineError::NoOperands);
        }
        let operands: Vec<Operand<'_, E>> = data.iter().map(|d| Operand::Vector(*d)).collect();
        logical_len(&operands)?;

        let n = coeff.len();
        let (start, step) = (coeff_start % n, coeff_step % n);
        let mut running: Option<Vec<E::Acc>> = None;
        for (j, term) in operands.into_iter().enumerate() {
            let c = coeff[(start + (j % n) * step % n) % n];
            let prior = running.as_deref().or(acc);
            let next = self.mul_acc_lanes(width, AccOp::Add, prior, term, Operand::Scalar(c))?;
            running = Some(next);
        }
        running.ok_or(EngineError::NoOperands)
    }
}
