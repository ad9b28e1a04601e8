//! Even/odd filter, zip/unzip interleave and lane reverse.
//!
//! Filter and unzip consume a 2W-lane register pair per call. When the chunk
//! step exceeds the native width every chunk is a whole number of tiles, and
//! the result is assembled by block copies without a primitive call.

use crate::engine::adapter::{pack_lanes, unpack_lanes};
use crate::engine::{Engine, Operand, RealizedOperand};
use crate::error::EngineResult;
use crate::primitives::{Primitives, PrimitiveSignature};
use crate::traits::Element;
use crate::types::OperationFamily;
use crate::validation::{validate_filter_step, validate_interleave_step, validate_same_len};
use crate::vector::LogicalVector;

impl<P: Primitives> Engine<P> {
    /// Keeps chunks 0, 2, 4, ... of `step` lanes. Output has L/2 lanes.
    pub fn filter_even<T: Element>(&self, v: &LogicalVector<T>, step: usize) -> EngineResult<LogicalVector<T>> {
        self.filter(v, step, false)
    }

    /// Keeps chunks 1, 3, 5, ... of `step` lanes. Output has L/2 lanes.
    pub fn filter_odd<T: Element>(&self, v: &LogicalVector<T>, step: usize) -> EngineResult<LogicalVector<T>> {
        self.filter(v, step, true)
    }

    fn filter<T: Element>(&self, v: &LogicalVector<T>, step: usize, odd: bool) -> EngineResult<LogicalVector<T>> {
        validate_filter_step(step, v.len())?;
        let res = self.resolve(OperationFamily::Filter, T::DESCRIPTOR)?;
        let lanes = if res.unpack {
            let unpacked = unpack_lanes(v.as_slice());
            pack_lanes::<T>(self.filter_lanes(res.width, &unpacked, step, odd)?)
        } else {
            self.filter_lanes(res.width, v.as_slice(), step, odd)?
        };
        Ok(LogicalVector::from_lanes(lanes))
    }

    fn filter_lanes<E: Element>(&self, width: usize, v: &[E], step: usize, odd: bool) -> EngineResult<Vec<E>> {
        if step > width {
            log::trace!("filter step={step} > W={width}: block copy");
            return Ok(v
                .chunks(step)
                .skip(usize::from(odd))
                .step_by(2)
                .flatten()
                .copied()
                .collect());
        }
        let pair = 2 * width;
        let plan = self.plan_width(OperationFamily::Filter, v.len(), pair)?;
        let rv = RealizedOperand::realize(&plan, Operand::Vector(v), self.config().pad_fill)?;
        let sig = PrimitiveSignature::new(OperationFamily::Filter, 2, pair);
        self.execute(sig, &plan, width, |i| {
            let (lo, hi) = rv.tile(i).split_at(width);
            self.primitives().filter(lo, hi, step, odd)
        })
    }

    /// Interleaves `step`-lane chunks of `a` and `b`. The 2L-lane stream is
    /// returned as its lower and upper halves.
    pub fn zip<T: Element>(
        &self,
        a: &LogicalVector<T>,
        b: &LogicalVector<T>,
        step: usize,
    ) -> EngineResult<(LogicalVector<T>, LogicalVector<T>)> {
        validate_same_len(a.len(), b.len())?;
        validate_interleave_step(step, a.len())?;
        let res = self.resolve(OperationFamily::Interleave, T::DESCRIPTOR)?;
        let (lo, hi) = if res.unpack {
            let (ua, ub) = (unpack_lanes(a.as_slice()), unpack_lanes(b.as_slice()));
            let (lo, hi) = self.zip_lanes(res.width, &ua, &ub, step)?;
            (pack_lanes::<T>(lo), pack_lanes::<T>(hi))
        } else {
            self.zip_lanes(res.width, a.as_slice(), b.as_slice(), step)?
        };
        Ok((LogicalVector::from_lanes(lo), LogicalVector::from_lanes(hi)))
    }

    /// Inverse of [`Engine::zip`]: splits the stream `a ++ b` into its even
    /// and odd `step`-lane chunks.
    pub fn unzip<T: Element>(
        &self,
        a: &LogicalVector<T>,
        b: &LogicalVector<T>,
        step: usize,
    ) -> EngineResult<(LogicalVector<T>, LogicalVector<T>)> {
        validate_same_len(a.len(), b.len())?;
        validate_interleave_step(step, a.len())?;
        let res = self.resolve(OperationFamily::Interleave, T::DESCRIPTOR)?;
        let (even, odd) = if res.unpack {
            let stream: Vec<T::Unpacked> = unpack_lanes(a.as_slice()).into_iter().chain(unpack_lanes(b.as_slice())).collect();
            let (even, odd) = self.unzip_lanes(res.width, &stream, step)?;
            (pack_lanes::<T>(even), pack_lanes::<T>(odd))
        } else {
            let stream: Vec<T> = a.iter().chain(b.iter()).collect();
            self.unzip_lanes(res.width, &stream, step)?
        };
        Ok((LogicalVector::from_lanes(even), LogicalVector::from_lanes(odd)))
    }

    /// `out[i] = v[L - 1 - i]`.
    pub fn reverse<T: Element>(&self, v: &LogicalVector<T>) -> EngineResult<LogicalVector<T>> {
        let res = self.resolve(OperationFamily::Interleave, T::DESCRIPTOR)?;
        let lanes = if res.unpack {
            pack_lanes::<T>(self.reverse_lanes(res.width, &unpack_lanes(v.as_slice()))?)
        } else {
            self.reverse_lanes(res.width, v.as_slice())?
        };
        Ok(LogicalVector::from_lanes(lanes))
    }

    pub(crate) fn zip_lanes<E: Element>(
        &self,
        width: usize,
        a: &[E],
        b: &[E],
        step: usize,
    ) -> EngineResult<(Vec<E>, Vec<E>)> {
        let len = a.len();
        let mut stream = if step > width {
            log::trace!("zip step={step} > W={width}: block copy");
            let mut stream = Vec::with_capacity(2 * len);
            for (ca, cb) in a.chunks(step).zip(b.chunks(step)) {
                stream.extend_from_slice(ca);
                stream.extend_from_slice(cb);
            }
            stream
        } else {
            let plan = self.plan_width(OperationFamily::Interleave, len, width)?;
            let fill = self.config().pad_fill;
            let ra = RealizedOperand::realize(&plan, Operand::Vector(a), fill)?;
            let rb = RealizedOperand::realize(&plan, Operand::Vector(b), fill)?;
            let sig = PrimitiveSignature::new(OperationFamily::Interleave, 2, width);
            self.execute(sig, &plan, 2 * width, |i| {
                let (mut lo, mut hi) = self.primitives().zip(ra.tile(i), rb.tile(i), step);
                lo.append(&mut hi);
                lo
            })?
        };
        let hi = stream.split_off(len);
        Ok((stream, hi))
    }

    pub(crate) fn unzip_lanes<E: Element>(
        &self,
        width: usize,
        stream: &[E],
        step: usize,
    ) -> EngineResult<(Vec<E>, Vec<E>)> {
        if step > width {
            log::trace!("unzip step={step} > W={width}: block copy");
            let mut even = Vec::with_capacity(stream.len() / 2);
            let mut odd = Vec::with_capacity(stream.len() / 2);
            for (k, chunk) in stream.chunks(step).enumerate() {
                if k % 2 == 0 {
                    even.extend_from_slice(chunk);
                } else {
                    odd.extend_from_slice(chunk);
                }
            }
            return Ok((even, odd));
        }
        let pair = 2 * width;
        let plan = self.plan_width(OperationFamily::Interleave, stream.len(), pair)?;
        let rs = RealizedOperand::realize(&plan, Operand::Vector(stream), self.config().pad_fill)?;
        let sig = PrimitiveSignature::new(OperationFamily::Interleave, 2, pair);
        let pairs = self.execute(sig, &plan, width, |i| {
            let (lo, hi) = rs.tile(i).split_at(width);
            let (even, odd) = self.primitives().unzip(lo, hi, step);
            even.into_iter().zip(odd).collect::<Vec<(E, E)>>()
        })?;
        Ok(pairs.into_iter().unzip())
    }
}
