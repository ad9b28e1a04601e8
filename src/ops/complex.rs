//! Complex arithmetic on top of real-domain tiling.
//!
//! Complex vectors travel as interleaved `re, im` lanes. Lane-separable
//! operations (add, sub, neg) tile the interleaved form directly at twice
//! the complex native width. Everything else unzips with step 1 into real and
//! imaginary vectors, works on those, and zips back.

use crate::complex::{deinterleave, from_parts, interleave, Complex};
use crate::engine::{Engine, Operand};
use crate::error::{EngineError, EngineResult};
use crate::primitives::{AccOp, BinaryOp, Primitives, ReduceOp, UnaryOp};
use crate::traits::Element;
use crate::types::OperationFamily;
use crate::vector::LogicalVector;

impl<P: Primitives> Engine<P> {
    /// Native width for complex lanes of `T`. Sub-byte components have no
    /// complex form.
    fn complex_width<T: Element>(&self, family: OperationFamily) -> EngineResult<usize> {
        let element = Complex::<T>::descriptor();
        if T::DESCRIPTOR.is_sub_byte() {
            return Err(EngineError::Unsupported { family, element, generation: self.generation() });
        }
        Ok(self.resolve(family, element)?.width)
    }

    fn split_complex<T: Element>(&self, v: &[Complex<T>]) -> EngineResult<(Vec<T>, Vec<T>)> {
        let width = self.resolve(OperationFamily::Interleave, T::DESCRIPTOR)?.width;
        self.unzip_lanes(width, &interleave(v), 1)
    }

    fn join_complex<T: Element>(&self, re: &[T], im: &[T]) -> EngineResult<Vec<Complex<T>>> {
        let width = self.resolve(OperationFamily::Interleave, T::DESCRIPTOR)?.width;
        let (mut lo, mut hi) = self.zip_lanes(width, re, im, 1)?;
        lo.append(&mut hi);
        Ok(deinterleave(&lo))
    }

    fn complex_binary<T: Element>(
        &self,
        op: BinaryOp,
        a: &LogicalVector<Complex<T>>,
        b: &LogicalVector<Complex<T>>,
    ) -> EngineResult<LogicalVector<Complex<T>>> {
        let family = op.family();
        let width = self.complex_width::<T>(family)?;
        let (fa, fb) = (interleave(a.as_slice()), interleave(b.as_slice()));
        let flat = self.binary_lanes(family, 2 * width, op, Operand::Vector(&fa), Operand::Vector(&fb))?;
        Ok(LogicalVector::from_lanes(deinterleave(&flat)))
    }

    pub fn complex_add<T: Element>(
        &self,
        a: &LogicalVector<Complex<T>>,
        b: &LogicalVector<Complex<T>>,
    ) -> EngineResult<LogicalVector<Complex<T>>> {
        self.complex_binary(BinaryOp::Add, a, b)
    }

    pub fn complex_sub<T: Element>(
        &self,
        a: &LogicalVector<Complex<T>>,
        b: &LogicalVector<Complex<T>>,
    ) -> EngineResult<LogicalVector<Complex<T>>> {
        self.complex_binary(BinaryOp::Sub, a, b)
    }

    pub fn complex_neg<T: Element>(&self, a: &LogicalVector<Complex<T>>) -> EngineResult<LogicalVector<Complex<T>>> {
        let width = self.complex_width::<T>(OperationFamily::Neg)?;
        let flat = self.unary_lanes(OperationFamily::Neg, 2 * width, UnaryOp::Neg, &interleave(a.as_slice()))?;
        Ok(LogicalVector::from_lanes(deinterleave(&flat)))
    }

    pub fn complex_conj<T: Element>(&self, a: &LogicalVector<Complex<T>>) -> EngineResult<LogicalVector<Complex<T>>> {
        self.complex_width::<T>(OperationFamily::Neg)?;
        let neg_width = self.resolve(OperationFamily::Neg, T::DESCRIPTOR)?.width;
        let (re, im) = self.split_complex(a.as_slice())?;
        let im = self.unary_lanes(OperationFamily::Neg, neg_width, UnaryOp::Neg, &im)?;
        Ok(LogicalVector::from_lanes(self.join_complex(&re, &im)?))
    }

    /// `(ar*br - ai*bi, ar*bi + ai*br)` per lane, narrowed back to `T`.
    pub fn complex_mul<T: Element>(
        &self,
        a: &LogicalVector<Complex<T>>,
        b: &LogicalVector<Complex<T>>,
    ) -> EngineResult<LogicalVector<Complex<T>>> {
        let (re, im) = self.complex_products(None, a, b)?;
        let re: Vec<T> = re.into_iter().map(T::from_acc).collect();
        let im: Vec<T> = im.into_iter().map(T::from_acc).collect();
        Ok(LogicalVector::from_lanes(self.join_complex(&re, &im)?))
    }

    /// `acc + a * b` with the complex product kept in the accumulator domain.
    pub fn complex_mul_acc<T: Element>(
        &self,
        acc: &LogicalVector<Complex<T::Acc>>,
        a: &LogicalVector<Complex<T>>,
        b: &LogicalVector<Complex<T>>,
    ) -> EngineResult<LogicalVector<Complex<T::Acc>>> {
        let (re, im) = self.complex_products(Some(acc.as_slice()), a, b)?;
        Ok(LogicalVector::from_lanes(from_parts(&re, &im)))
    }

    /// Accumulator-domain real and imaginary parts of `acc + a * b`.
    fn complex_products<T: Element>(
        &self,
        acc: Option<&[Complex<T::Acc>]>,
        a: &LogicalVector<Complex<T>>,
        b: &LogicalVector<Complex<T>>,
    ) -> EngineResult<(Vec<T::Acc>, Vec<T::Acc>)> {
        self.complex_width::<T>(OperationFamily::Mul)?;
        let width = self.resolve(OperationFamily::Mul, T::DESCRIPTOR)?.width;
        let (ar, ai) = self.split_complex(a.as_slice())?;
        let (br, bi) = self.split_complex(b.as_slice())?;
        // Accumulator registers are already split; no shuffle needed.
        let split: Option<(Vec<T::Acc>, Vec<T::Acc>)> =
            acc.map(|acc| acc.iter().map(|c| (c.re, c.im)).unzip());
        let (acc_re, acc_im) = match &split {
            Some((re, im)) => (Some(re.as_slice()), Some(im.as_slice())),
            None => (None, None),
        };

        let re = self.mul_acc_lanes(width, AccOp::Add, acc_re, Operand::Vector(&ar), Operand::Vector(&br))?;
        let re = self.mul_acc_lanes(width, AccOp::Sub, Some(re.as_slice()), Operand::Vector(&ai), Operand::Vector(&bi))?;
        let im = self.mul_acc_lanes(width, AccOp::Add, acc_im, Operand::Vector(&ar), Operand::Vector(&bi))?;
        let im = self.mul_acc_lanes(width, AccOp::Add, Some(im.as_slice()), Operand::Vector(&ai), Operand::Vector(&br))?;
        Ok((re, im))
    }

    /// `re^2 + im^2` per lane in the accumulator domain.
    pub fn complex_abs_square<T: Element>(&self, v: &LogicalVector<Complex<T>>) -> EngineResult<LogicalVector<T::Acc>> {
        self.complex_width::<T>(OperationFamily::Mul)?;
        let width = self.resolve(OperationFamily::Mul, T::DESCRIPTOR)?.width;
        let (re, im) = self.split_complex(v.as_slice())?;
        let sq = self.mul_acc_lanes(width, AccOp::Add, None, Operand::Vector(&re), Operand::Vector(&re))?;
        let sq = self.mul_acc_lanes(width, AccOp::Add, Some(sq.as_slice()), Operand::Vector(&im), Operand::Vector(&im))?;
        Ok(LogicalVector::from_lanes(sq))
    }

    pub fn complex_reduce_add<T: Element>(&self, v: &LogicalVector<Complex<T>>) -> EngineResult<Complex<T>> {
        self.complex_width::<T>(OperationFamily::Reduce)?;
        let width = self.resolve(OperationFamily::Reduce, T::DESCRIPTOR)?.width;
        let (re, im) = self.split_complex(v.as_slice())?;
        Ok(Complex::new(
            self.reduce_lanes(width, ReduceOp::Add, &re)?,
            self.reduce_lanes(width, ReduceOp::Add, &im)?,
        ))
    }
}
