//! Single-channel sliding-window multiply.
//!
//! `out[l] = sum_p coeff[cs + p*CS] * data[ds + l*DSY + p*DSX]`, with every
//! index taken modulo its vector length. Each point gathers one window of
//! `lanes` data elements and the windows are chained through the variadic
//! accumulate, so tiling of `lanes` follows the Mul-family native width.

use crate::engine::adapter::unpack_lanes;
use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};
use crate::primitives::Primitives;
use crate::traits::Element;
use crate::types::OperationFamily;
use crate::validation::validate_logical_len;
use crate::vector::LogicalVector;

/// Shape of one sliding multiply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingMul {
    pub lanes: usize,
    pub points: usize,
    pub coeff_start: usize,
    pub coeff_step: usize,
    pub data_start: usize,
    pub data_step_x: usize,
    pub data_step_y: usize,
}

impl SlidingMul {
    /// `lanes` outputs over `points` taps, unit steps, all offsets zero.
    pub fn new(lanes: usize, points: usize) -> Self {
        Self {
            lanes,
            points,
            coeff_start: 0,
            coeff_step: 1,
            data_start: 0,
            data_step_x: 1,
            data_step_y: 1,
        }
    }

    pub fn with_coeff(mut self, start: usize, step: usize) -> Self {
        self.coeff_start = start;
        self.coeff_step = step;
        self
    }

    pub fn with_data(mut self, start: usize, step_x: usize, step_y: usize) -> Self {
        self.data_start = start;
        self.data_step_x = step_x;
        self.data_step_y = step_y;
        self
    }

    /// Window read by tap `point`. Every term is reduced modulo the data
    /// length before it is combined, so any start or step is accepted.
    fn gather<E: Copy>(&self, data: &[E], point: usize) -> Vec<E> {
        let n = data.len();
        let base = (self.data_start % n + (point % n) * (self.data_step_x % n) % n) % n;
        let step_y = self.data_step_y % n;
        (0..self.lanes)
            .map(|l| data[(base + (l % n) * step_y % n) % n])
            .collect()
    }

    fn validate(&self, coeff_len: usize, data_len: usize) -> EngineResult<()> {
        validate_logical_len(self.lanes)?;
        if self.points == 0 || coeff_len == 0 || data_len == 0 {
            return Err(EngineError::NoOperands);
        }
        Ok(())
    }
}

impl<P: Primitives> Engine<P> {
    pub fn sliding_mul<T: Element>(
        &self,
        shape: &SlidingMul,
        coeff: &[T],
        data: &[T],
    ) -> EngineResult<LogicalVector<T::Acc>> {
        self.sliding(shape, None, coeff, data)
    }

    pub fn sliding_mul_acc<T: Element>(
        &self,
        shape: &SlidingMul,
        acc: &LogicalVector<T::Acc>,
        coeff: &[T],
        data: &[T],
    ) -> EngineResult<LogicalVector<T::Acc>> {
        self.sliding(shape, Some(acc.as_slice()), coeff, data)
    }

    fn sliding<T: Element>(
        &self,
        shape: &SlidingMul,
        acc: Option<&[T::Acc]>,
        coeff: &[T],
        data: &[T],
    ) -> EngineResult<LogicalVector<T::Acc>> {
        shape.validate(coeff.len(), data.len())?;
        let res = self.resolve(OperationFamily::Mul, T::DESCRIPTOR)?;
        let lanes = if res.unpack {
            let (coeff, data) = (unpack_lanes(coeff), unpack_lanes(data));
            self.sliding_lanes::<T::Unpacked>(res.width, shape, acc, &coeff, &data)?
        } else {
            self.sliding_lanes(res.width, shape, acc, coeff, data)?
        };
        Ok(LogicalVector::from_lanes(lanes))
    }

    fn sliding_lanes<E: Element>(
        &self,
        width: usize,
        shape: &SlidingMul,
        acc: Option<&[E::Acc]>,
        coeff: &[E],
        data: &[E],
    ) -> EngineResult<Vec<E::Acc>> {
        let windows: Vec<Vec<E>> = (0..shape.points).map(|p| shape.gather(data, p)).collect();
        let views: Vec<&[E]> = windows.iter().map(Vec::as_slice).collect();
        self.accumulate_lanes(width, acc, coeff, shape.coeff_start, shape.coeff_step, &views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Generation;

    fn reference(shape: &SlidingMul, coeff: &[i16], data: &[i16]) -> Vec<i32> {
        (0..shape.lanes)
            .map(|l| {
                (0..shape.points)
                    .map(|p| {
                        let c = coeff[(shape.coeff_start + p * shape.coeff_step) % coeff.len()] as i32;
                        let d = data[(shape.data_start + l * shape.data_step_y + p * shape.data_step_x) % data.len()] as i32;
                        c * d
                    })
                    .sum()
            })
            .collect()
    }

    #[test]
    fn test_fir_window() {
        let engine = Engine::new(Generation::Gen2);
        let coeff = [1i16, -2, 3, -4, 5, -6, 7, -8];
        let data: Vec<i16> = (0..128).map(|i| i * 3 - 100).collect();
        for shape in [
            SlidingMul::new(16, 8),
            SlidingMul::new(64, 4).with_coeff(2, 2),
            SlidingMul::new(8, 3).with_data(120, 2, 1),
            SlidingMul::new(32, 5).with_coeff(7, 3).with_data(5, 1, 2),
        ] {
            let out = engine.sliding_mul(&shape, &coeff, &data).unwrap();
            assert_eq!(out.as_slice(), &reference(&shape, &coeff, &data)[..], "{shape:?}");
        }
    }

    #[test]
    fn test_sliding_mul_acc() {
        let engine = Engine::new(Generation::Gen1);
        let shape = SlidingMul::new(8, 2);
        let acc = LogicalVector::splat(8, 1000i32).unwrap();
        let out = engine.sliding_mul_acc(&shape, &acc, &[2i16, 3], &[1i16; 16]).unwrap();
        assert!(out.iter().all(|x| x == 1005));
    }

    #[test]
    fn test_offsets_reduce_modulo_length() {
        let engine = Engine::new(Generation::Gen2);
        let coeff = [1i16, 10];
        let data: Vec<i16> = (0..8).map(|i| i * i).collect();
        // For 64-bit usize: MAX = 1 (mod 2), MAX = 7 (mod 8), MAX - 6 = 1 (mod 8).
        let huge = SlidingMul::new(16, 3)
            .with_coeff(usize::MAX, usize::MAX)
            .with_data(usize::MAX, usize::MAX, usize::MAX - 6);
        let small = SlidingMul::new(16, 3).with_coeff(1, 1).with_data(7, 7, 1);
        let out = engine.sliding_mul(&huge, &coeff, &data).unwrap();
        assert_eq!(out, engine.sliding_mul(&small, &coeff, &data).unwrap());
        assert_eq!(out.as_slice(), &reference(&small, &coeff, &data)[..]);
    }

    #[test]
    fn test_sliding_rejects_bad_shape() {
        let engine = Engine::new(Generation::Gen2);
        let data = [1i16; 8];
        assert_eq!(
            engine.sliding_mul(&SlidingMul::new(6, 2), &[1i16], &data).unwrap_err(),
            EngineError::NotPowerOfTwo { len: 6 }
        );
        assert_eq!(
            engine.sliding_mul(&SlidingMul::new(4, 0), &[1i16], &data).unwrap_err(),
            EngineError::NoOperands
        );
    }
}
