//! Shared test primitives: a call-recording wrapper, a broken binding and a
//! binding without accumulator kernels.

#![allow(dead_code)]

use std::sync::Mutex;

use tilevec_kernels::{
    AccOp, BinaryOp, BitOp, Bitwise, CompareOp, Element, Primitives, PrimitiveSignature, ReduceOp, SoftPrimitives,
    UnaryOp,
};

/// One recorded primitive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Binary { width: usize },
    Unary { width: usize },
    MulAcc { width: usize, acc_len: usize, zero_acc: bool },
    AddAcc { width: usize, acc_len: usize, zero_acc: bool },
    ShiftCombine { width: usize, shift: usize },
    Filter { width: usize },
    Zip { width: usize },
    Unzip { width: usize },
    Compare { width: usize },
    Select { width: usize },
    Bitwise { width: usize },
    Reverse { width: usize },
}

/// Delegates to [`SoftPrimitives`] and records every call.
#[derive(Debug, Default)]
pub struct CountingPrimitives {
    inner: SoftPrimitives,
    calls: Mutex<Vec<Call>>,
}

impl CountingPrimitives {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Primitives for CountingPrimitives {
    fn binary<E: Element>(&self, op: BinaryOp, a: &[E], b: &[E]) -> Vec<E> {
        self.record(Call::Binary { width: a.len() });
        self.inner.binary(op, a, b)
    }

    fn unary<E: Element>(&self, op: UnaryOp, a: &[E]) -> Vec<E> {
        self.record(Call::Unary { width: a.len() });
        self.inner.unary(op, a)
    }

    fn mul_acc<E: Element>(&self, op: AccOp, acc: &[E::Acc], zero_acc: bool, a: &[E], b: &[E]) -> Vec<E::Acc> {
        self.record(Call::MulAcc { width: a.len(), acc_len: acc.len(), zero_acc });
        self.inner.mul_acc(op, acc, zero_acc, a, b)
    }

    fn add_acc<E: Element>(&self, op: AccOp, acc: &[E::Acc], zero_acc: bool, v: &[E]) -> Vec<E::Acc> {
        self.record(Call::AddAcc { width: v.len(), acc_len: acc.len(), zero_acc });
        self.inner.add_acc(op, acc, zero_acc, v)
    }

    fn shift_combine<E: Element>(&self, op: ReduceOp, v: &[E], shift: usize) -> Vec<E> {
        self.record(Call::ShiftCombine { width: v.len(), shift });
        self.inner.shift_combine(op, v, shift)
    }

    fn filter<E: Element>(&self, lo: &[E], hi: &[E], step: usize, odd: bool) -> Vec<E> {
        self.record(Call::Filter { width: lo.len() });
        self.inner.filter(lo, hi, step, odd)
    }

    fn zip<E: Element>(&self, a: &[E], b: &[E], step: usize) -> (Vec<E>, Vec<E>) {
        self.record(Call::Zip { width: a.len() });
        self.inner.zip(a, b, step)
    }

    fn unzip<E: Element>(&self, lo: &[E], hi: &[E], step: usize) -> (Vec<E>, Vec<E>) {
        self.record(Call::Unzip { width: lo.len() });
        self.inner.unzip(lo, hi, step)
    }

    fn compare<E: Element>(&self, op: CompareOp, a: &[E], b: &[E]) -> Vec<bool> {
        self.record(Call::Compare { width: a.len() });
        self.inner.compare(op, a, b)
    }

    fn select<E: Element>(&self, a: &[E], b: &[E], mask: &[bool]) -> Vec<E> {
        self.record(Call::Select { width: mask.len() });
        self.inner.select(a, b, mask)
    }

    fn bitwise<E: Bitwise>(&self, op: BitOp, a: &[E], b: &[E]) -> Vec<E> {
        self.record(Call::Bitwise { width: a.len() });
        self.inner.bitwise(op, a, b)
    }

    fn reverse<E: Element>(&self, v: &[E]) -> Vec<E> {
        self.record(Call::Reverse { width: v.len() });
        self.inner.reverse(v)
    }
}

/// Binding whose binary kernel drops its last lane.
#[derive(Debug, Default)]
pub struct ShortBinary;

impl Primitives for ShortBinary {
    fn binary<E: Element>(&self, op: BinaryOp, a: &[E], b: &[E]) -> Vec<E> {
        let mut out = SoftPrimitives.binary(op, a, b);
        out.pop();
        out
    }

    fn unary<E: Element>(&self, op: UnaryOp, a: &[E]) -> Vec<E> {
        SoftPrimitives.unary(op, a)
    }

    fn mul_acc<E: Element>(&self, op: AccOp, acc: &[E::Acc], zero_acc: bool, a: &[E], b: &[E]) -> Vec<E::Acc> {
        SoftPrimitives.mul_acc(op, acc, zero_acc, a, b)
    }

    fn add_acc<E: Element>(&self, op: AccOp, acc: &[E::Acc], zero_acc: bool, v: &[E]) -> Vec<E::Acc> {
        SoftPrimitives.add_acc(op, acc, zero_acc, v)
    }

    fn shift_combine<E: Element>(&self, op: ReduceOp, v: &[E], shift: usize) -> Vec<E> {
        SoftPrimitives.shift_combine(op, v, shift)
    }

    fn filter<E: Element>(&self, lo: &[E], hi: &[E], step: usize, odd: bool) -> Vec<E> {
        SoftPrimitives.filter(lo, hi, step, odd)
    }

    fn zip<E: Element>(&self, a: &[E], b: &[E], step: usize) -> (Vec<E>, Vec<E>) {
        SoftPrimitives.zip(a, b, step)
    }

    fn unzip<E: Element>(&self, lo: &[E], hi: &[E], step: usize) -> (Vec<E>, Vec<E>) {
        SoftPrimitives.unzip(lo, hi, step)
    }

    fn compare<E: Element>(&self, op: CompareOp, a: &[E], b: &[E]) -> Vec<bool> {
        SoftPrimitives.compare(op, a, b)
    }

    fn select<E: Element>(&self, a: &[E], b: &[E], mask: &[bool]) -> Vec<E> {
        SoftPrimitives.select(a, b, mask)
    }

    fn bitwise<E: Bitwise>(&self, op: BitOp, a: &[E], b: &[E]) -> Vec<E> {
        SoftPrimitives.bitwise(op, a, b)
    }

    fn reverse<E: Element>(&self, v: &[E]) -> Vec<E> {
        SoftPrimitives.reverse(v)
    }
}

/// Records calls like [`CountingPrimitives`] but has no accumulator forms
/// and no in-register reduction.
#[derive(Debug, Default)]
pub struct NoAccumulatorForms {
    pub inner: CountingPrimitives,
}

impl Primitives for NoAccumulatorForms {
    fn provides(&self, signature: &PrimitiveSignature) -> bool {
        !signature.accumulator && signature.family != tilevec_kernels::OperationFamily::Reduce
    }

    fn binary<E: Element>(&self, op: BinaryOp, a: &[E], b: &[E]) -> Vec<E> {
        self.inner.binary(op, a, b)
    }

    fn unary<E: Element>(&self, op: UnaryOp, a: &[E]) -> Vec<E> {
        self.inner.unary(op, a)
    }

    fn mul_acc<E: Element>(&self, op: AccOp, acc: &[E::Acc], zero_acc: bool, a: &[E], b: &[E]) -> Vec<E::Acc> {
        self.inner.mul_acc(op, acc, zero_acc, a, b)
    }

    fn add_acc<E: Element>(&self, op: AccOp, acc: &[E::Acc], zero_acc: bool, v: &[E]) -> Vec<E::Acc> {
        self.inner.add_acc(op, acc, zero_acc, v)
    }

    fn shift_combine<E: Element>(&self, op: ReduceOp, v: &[E], shift: usize) -> Vec<E> {
        self.inner.shift_combine(op, v, shift)
    }

    fn filter<E: Element>(&self, lo: &[E], hi: &[E], step: usize, odd: bool) -> Vec<E> {
        self.inner.filter(lo, hi, step, odd)
    }

    fn zip<E: Element>(&self, a: &[E], b: &[E], step: usize) -> (Vec<E>, Vec<E>) {
        self.inner.zip(a, b, step)
    }

    fn unzip<E: Element>(&self, lo: &[E], hi: &[E], step: usize) -> (Vec<E>, Vec<E>) {
        self.inner.unzip(lo, hi, step)
    }

    fn compare<E: Element>(&self, op: CompareOp, a: &[E], b: &[E]) -> Vec<bool> {
        self.inner.compare(op, a, b)
    }

    fn select<E: Element>(&self, a: &[E], b: &[E], mask: &[bool]) -> Vec<E> {
        self.inner.select(a, b, mask)
    }

    fn bitwise<E: Bitwise>(&self, op: BitOp, a: &[E], b: &[E]) -> Vec<E> {
        self.inner.bitwise(op, a, b)
    }

    fn reverse<E: Element>(&self, v: &[E]) -> Vec<E> {
        self.inner.reverse(v)
    }
}
