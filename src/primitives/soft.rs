//! Software emulation of the native kernels, one lane at a time.
//!
//! Integer arithmetic wraps. No claim of bit-exactness with hardware
//! rounding or saturation modes.

use super::{AccOp, BinaryOp, BitOp, CompareOp, Primitives, ReduceOp, UnaryOp};
use crate::traits::{Bitwise, Element};

#[derive(Debug, Clone, Copy, Default)]
pub struct SoftPrimitives;

impl Primitives for SoftPrimitives {
    fn binary<E: Element>(&self, op: BinaryOp, a: &[E], b: &[E]) -> Vec<E> {
        a.iter().zip(b).map(|(&x, &y)| op.apply(x, y)).collect()
    }

    fn unary<E: Element>(&self, op: UnaryOp, a: &[E]) -> Vec<E> {
        a.iter().map(|&x| op.apply(x)).collect()
    }

    fn mul_acc<E: Element>(&self, op: AccOp, acc: &[E::Acc], zero_acc: bool, a: &[E], b: &[E]) -> Vec<E::Acc> {
        (0..a.len())
            .map(|i| {
                let prior = if zero_acc { <E::Acc as Element>::ZERO } else { acc[i] };
                op.apply(prior, a[i].to_acc().elem_mul(b[i].to_acc()))
            })
            .collect()
    }

    fn add_acc<E: Element>(&self, op: AccOp, acc: &[E::Acc], zero_acc: bool, v: &[E]) -> Vec<E::Acc> {
        (0..v.len())
            .map(|i| {
                let prior = if zero_acc { <E::Acc as Element>::ZERO } else { acc[i] };
                op.apply(prior, v[i].to_acc())
            })
            .collect()
    }

    fn shift_combine<E: Element>(&self, op: ReduceOp, v: &[E], shift: usize) -> Vec<E> {
        let combine = op.combiner();
        (0..v.len())
            .map(|i| match v.get(i + shift) {
                Some(&partner) => combine.apply(v[i], partner),
                None => v[i],
            })
            .collect()
    }

    fn filter<E: Element>(&self, lo: &[E], hi: &[E], step: usize, odd: bool) -> Vec<E> {
        let keep = usize::from(odd);
        lo.iter()
            .chain(hi)
            .enumerate()
            .filter(|(i, _)| (i / step) % 2 == keep)
            .map(|(_, &x)| x)
            .collect()
    }

    fn zip<E: Element>(&self, a: &[E], b: &[E], step: usize) -> (Vec<E>, Vec<E>) {
        let mut stream = Vec::with_capacity(a.len() * 2);
        for (ca, cb) in a.chunks(step).zip(b.chunks(step)) {
            stream.extend_from_slice(ca);
            stream.extend_from_slice(cb);
        }
        let hi = stream.split_off(a.len());
        (stream, hi)
    }

    fn unzip<E: Element>(&self, lo: &[E], hi: &[E], step: usize) -> (Vec<E>, Vec<E>) {
        let mut a = Vec::with_capacity(lo.len());
        let mut b = Vec::with_capacity(lo.len());
        let stream: Vec<E> = lo.iter().chain(hi).copied().collect();
        for pair in stream.chunks(2 * step) {
            let (ca, cb) = pair.split_at(step.min(pair.len()));
            a.extend_from_slice(ca);
            b.extend_from_slice(cb);
        }
        (a, b)
    }

    fn compare<E: Element>(&self, op: CompareOp, a: &[E], b: &[E]) -> Vec<bool> {
        a.iter().zip(b).map(|(&x, &y)| op.apply(x, y)).collect()
    }

    fn select<E: Element>(&self, a: &[E], b: &[E], mask: &[bool]) -> Vec<E> {
        a.iter()
            .zip(b)
            .zip(mask)
            .map(|((&x, &y), &take_b)| if take_b { y } else { x })
            .collect()
    }

    fn bitwise<E: Bitwise>(&self, op: BitOp, a: &[E], b: &[E]) -> Vec<E> {
        a.iter().zip(b).map(|(&x, &y)| op.apply(x, y)).collect()
    }

    fn reverse<E: Element>(&self, v: &[E]) -> Vec<E> {
        v.iter().rev().copied().collect()
    }
}
