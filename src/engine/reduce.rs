//! Intra-vector tree reduction.
//!
//! Inputs wider than the native width are first folded half onto half
//! through the elementwise tiler. Both the fold and the in-register
//! shift-by-half steps pair lane `i` with lane `i + half`, so the
//! combination tree is the same for every native width.

use std::borrow::Cow;

use crate::error::{EngineError, EngineResult};
use crate::primitives::{Primitives, PrimitiveSignature, ReduceOp};
use crate::traits::Element;
use crate::types::OperationFamily;
use crate::validation::validate_logical_len;

use super::adapter::{grow, Operand};
use super::Engine;

impl<P: Primitives> Engine<P> {
    pub(crate) fn reduce_lanes<E: Element>(&self, width: usize, op: ReduceOp, v: &[E]) -> EngineResult<E> {
        validate_logical_len(v.len())?;

        let mut work: Cow<'_, [E]> = Cow::Borrowed(v);
        while work.len() > width {
            let (lo, hi) = work.split_at(work.len() / 2);
            let folded = self.binary_lanes(
                OperationFamily::Reduce,
                width,
                op.combiner(),
                Operand::Vector(lo),
                Operand::Vector(hi),
            )?;
            work = Cow::Owned(folded);
        }

        let live = work.len();
        if live > 1 {
            self.require(&PrimitiveSignature::new(OperationFamily::Reduce, 1, width))?;
        }
        let mut register = grow(&work, width, self.config.pad_fill);
        let mut shift = live / 2;
        while shift >= 1 {
            log::trace!("reduce {op:?} shift={shift} W={width}");
            let next = self.primitives.shift_combine(op, &register, shift);
            if next.len() != width {
                return Err(EngineError::PrimitiveWidth { expected: width, actual: next.len() });
            }
            register = next;
            shift /= 2;
        }
        register
            .first()
            .copied()
            .ok_or(EngineError::PrimitiveWidth { expected: width, actual: 0 })
    }
}
