//! Property-based tests for the decomposition engine.
//!
//! Uses proptest to verify, for random power-of-two lengths and every
//! generation, that decomposed results equal the per-index references:
//! - elementwise, unary and multiply-accumulate lanes
//! - compare / select / bitwise / reverse
//! - complex lanes through the split and interleaved forms
//! - tree reduction, bit-exact for floats
//! - filter / zip / unzip chunk shuffles
//! - variadic accumulate and sliding multiply
//! - pad filler never leaks into the logical output

use proptest::prelude::*;

use tilevec_kernels::{
    Complex, Engine, EngineConfig, Generation, LogicalVector, Operand, PadFill, SlidingMul,
};
use tilevec_scalar_ops as scalar;

fn arb_generation() -> impl Strategy<Value = Generation> {
    prop::sample::select(Generation::ALL.to_vec())
}

/// Two equal-length vectors of 1..=1024 lanes (power of two).
fn arb_pair<T: Arbitrary + Clone + std::fmt::Debug + 'static>(
    max_exp: u32,
) -> impl Strategy<Value = (Vec<T>, Vec<T>)> {
    (0..=max_exp).prop_flat_map(|exp| {
        let len = 1usize << exp;
        (
            prop::collection::vec(any::<T>(), len),
            prop::collection::vec(any::<T>(), len),
        )
    })
}

fn complex_lanes<T: Copy>(v: &[(T, T)]) -> LogicalVector<Complex<T>> {
    LogicalVector::new(v.iter().map(|&(re, im)| Complex::new(re, im)).collect()).unwrap()
}

fn wide_pairs(v: &[(i16, i16)]) -> Vec<(i64, i64)> {
    v.iter().map(|&(re, im)| (re as i64, im as i64)).collect()
}

/// Vector of at least two lanes with a valid filter step.
fn arb_filter_input() -> impl Strategy<Value = (Vec<i32>, usize)> {
    (1u32..=10).prop_flat_map(|exp| {
        let len = 1usize << exp;
        (prop::collection::vec(any::<i32>(), len), (0..exp).prop_map(|s| 1usize << s))
    })
}

/// Two equal-length vectors with a valid interleave step.
fn arb_zip_input() -> impl Strategy<Value = (Vec<u16>, Vec<u16>, usize)> {
    (0u32..=9).prop_flat_map(|exp| {
        let len = 1usize << exp;
        (
            prop::collection::vec(any::<u16>(), len),
            prop::collection::vec(any::<u16>(), len),
            (0..=exp).prop_map(|s| 1usize << s),
        )
    })
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Elementwise and multiply-accumulate
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_add_sub_match_reference(generation in arb_generation(), (a, b) in arb_pair::<i32>(10)) {
        let engine = Engine::new(generation);
        let (va, vb) = (LogicalVector::new(a.clone()).unwrap(), LogicalVector::new(b.clone()).unwrap());

        let sum = engine.add(&va, &vb).unwrap();
        prop_assert_eq!(sum.as_slice(), &scalar::binary(&a, &b, i32::wrapping_add)[..]);

        let diff = engine.sub(&va, &vb).unwrap();
        prop_assert_eq!(diff.as_slice(), &scalar::binary(&a, &b, i32::wrapping_sub)[..]);
    }

    #[test]
    fn prop_max_min_u8(generation in arb_generation(), (a, b) in arb_pair::<u8>(10)) {
        let engine = Engine::new(generation);
        let (va, vb) = (LogicalVector::new(a.clone()).unwrap(), LogicalVector::new(b.clone()).unwrap());
        let hi = engine.max(&va, &vb).unwrap();
        prop_assert_eq!(hi.as_slice(), &scalar::binary(&a, &b, u8::max)[..]);
        let lo = engine.min(&va, &vb).unwrap();
        prop_assert_eq!(lo.as_slice(), &scalar::binary(&a, &b, u8::min)[..]);
    }

    #[test]
    fn prop_mul_acc_matches_reference(
        generation in arb_generation(),
        (a, b) in arb_pair::<i16>(10),
        bias in any::<i32>(),
    ) {
        let engine = Engine::new(generation);
        let acc: Vec<i32> = (0..a.len()).map(|i| bias.wrapping_add(i as i32)).collect();
        let (va, vb) = (LogicalVector::new(a.clone()).unwrap(), LogicalVector::new(b.clone()).unwrap());
        let out = engine.mul_acc(&LogicalVector::new(acc.clone()).unwrap(), &va, &vb).unwrap();

        let products = scalar::binary(&a, &b, |x, y| x as i32 * y as i32);
        let want = scalar::binary(&acc, &products, i32::wrapping_add);
        prop_assert_eq!(out.as_slice(), &want[..]);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Reduction
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_reduce_int(generation in arb_generation(), (v, _) in arb_pair::<i32>(10)) {
        let engine = Engine::new(generation);
        let lv = LogicalVector::new(v.clone()).unwrap();
        prop_assert_eq!(engine.reduce_add(&lv).unwrap(), scalar::sequential_reduce(&v, i32::wrapping_add));
        prop_assert_eq!(engine.reduce_max(&lv).unwrap(), scalar::sequential_reduce(&v, i32::max));
        prop_assert_eq!(engine.reduce_min(&lv).unwrap(), scalar::sequential_reduce(&v, i32::min));
    }

    /// Float sums follow the fixed pairing tree on every generation.
    #[test]
    fn prop_reduce_f32_bit_exact(
        generation in arb_generation(),
        v in (0u32..=10).prop_flat_map(|e| prop::collection::vec(-1.0e6f32..1.0e6, 1usize << e)),
    ) {
        let engine = Engine::new(generation);
        let got = engine.reduce_add(&LogicalVector::new(v.clone()).unwrap()).unwrap();
        let want = scalar::tree_reduce(&v, |a, b| a + b);
        prop_assert_eq!(got.to_bits(), want.to_bits());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Shuffles
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_filter_matches_reference(generation in arb_generation(), (v, step) in arb_filter_input()) {
        let engine = Engine::new(generation);
        let lv = LogicalVector::new(v.clone()).unwrap();
        let even = engine.filter_even(&lv, step).unwrap();
        let odd = engine.filter_odd(&lv, step).unwrap();
        prop_assert_eq!(even.as_slice(), &scalar::filter_serial(&v, step, false)[..]);
        prop_assert_eq!(odd.as_slice(), &scalar::filter_serial(&v, step, true)[..]);
    }

    #[test]
    fn prop_zip_unzip(generation in arb_generation(), (a, b, step) in arb_zip_input()) {
        let engine = Engine::new(generation);
        let (va, vb) = (LogicalVector::new(a.clone()).unwrap(), LogicalVector::new(b.clone()).unwrap());
        let (lo, hi) = engine.zip(&va, &vb, step).unwrap();

        let stream = scalar::zip_serial(&a, &b, step);
        prop_assert_eq!(lo.as_slice(), &stream[..a.len()]);
        prop_assert_eq!(hi.as_slice(), &stream[a.len()..]);

        let (even, odd) = engine.unzip(&lo, &hi, step).unwrap();
        prop_assert_eq!(even.as_slice(), &a[..]);
        prop_assert_eq!(odd.as_slice(), &b[..]);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Accumulate and sliding multiply
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_accumulate_matches_reference(
        generation in arb_generation(),
        exp in 0u32..=8,
        rows in 1usize..6,
        coeff in prop::collection::vec(-1000i16..1000, 1..8),
        coeff_start in 0usize..8,
        coeff_step in 0usize..4,
        seed in any::<u64>(),
    ) {
        let len = 1usize << exp;
        let data: Vec<Vec<i16>> = (0..rows)
            .map(|r| (0..len).map(|l| ((seed as usize).wrapping_add(r * 31 + l * 7) % 2001) as i16 - 1000).collect())
            .collect();
        let vectors: Vec<LogicalVector<i16>> = data.iter().map(|d| LogicalVector::new(d.clone()).unwrap()).collect();
        let refs: Vec<&LogicalVector<i16>> = vectors.iter().collect();
        let views: Vec<&[i16]> = data.iter().map(Vec::as_slice).collect();

        let engine = Engine::new(generation);
        let got = engine.accumulate(None, &coeff, coeff_start, coeff_step, &refs).unwrap();
        let want = scalar::accumulate(None, 0i32, &coeff, coeff_start, coeff_step, &views, |c, d| c as i32 * d as i32, |x, y| x + y);
        prop_assert_eq!(got.as_slice(), &want[..]);
    }

    #[test]
    fn prop_sliding_mul_matches_reference(
        generation in arb_generation(),
        lanes_exp in 0u32..=7,
        points in 1usize..10,
        coeff in prop::collection::vec(-100i16..100, 1..16),
        data in prop::collection::vec(-100i16..100, 1..256),
        coeff_start in 0usize..16,
        coeff_step in 0usize..3,
        data_start in 0usize..256,
        data_step_x in 0usize..3,
        data_step_y in 1usize..3,
    ) {
        let shape = SlidingMul::new(1usize << lanes_exp, points)
            .with_coeff(coeff_start, coeff_step)
            .with_data(data_start, data_step_x, data_step_y);
        let engine = Engine::new(generation);
        let got = engine.sliding_mul(&shape, &coeff, &data).unwrap();

        let coeff64: Vec<i64> = coeff.iter().map(|&c| c as i64).collect();
        let data64: Vec<i64> = data.iter().map(|&d| d as i64).collect();
        let want = scalar::sliding_mul(
            shape.lanes, points, &coeff64, coeff_start, coeff_step, &data64, data_start, data_step_x, data_step_y,
        );
        let got64: Vec<i64> = got.iter().map(i64::from).collect();
        prop_assert_eq!(got64, want);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Unary, compare, select, bitwise and reverse
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_neg_abs_match_reference(generation in arb_generation(), (a, _) in arb_pair::<i16>(10)) {
        let engine = Engine::new(generation);
        let va = LogicalVector::new(a.clone()).unwrap();

        let neg = engine.neg(&va).unwrap();
        prop_assert_eq!(neg.as_slice(), &scalar::unary(&a, i16::wrapping_neg)[..]);

        let abs = engine.abs(&va).unwrap();
        prop_assert_eq!(abs.as_slice(), &scalar::unary(&a, i16::wrapping_abs)[..]);
    }

    #[test]
    fn prop_compare_select_match_reference(generation in arb_generation(), (a, b) in arb_pair::<i32>(10)) {
        let engine = Engine::new(generation);
        let (va, vb) = (LogicalVector::new(a.clone()).unwrap(), LogicalVector::new(b.clone()).unwrap());

        let lt = engine.lt(&va, &vb).unwrap();
        prop_assert_eq!(lt.as_slice(), &scalar::binary(&a, &b, |x, y| x < y)[..]);
        let ge = engine.ge(&va, &vb).unwrap();
        prop_assert_eq!(ge.as_slice(), &scalar::binary(&a, &b, |x, y| x >= y)[..]);
        let eq = engine.eq(&va, &va).unwrap();
        prop_assert!(eq.iter().all(|m| m));
        let neq = engine.neq(&va, &vb).unwrap();
        prop_assert_eq!(neq.as_slice(), &scalar::binary(&a, &b, |x, y| x != y)[..]);

        let picked = engine.select(&lt, &va, &vb).unwrap();
        prop_assert_eq!(picked.as_slice(), &scalar::select(lt.as_slice(), &a, &b)[..]);
    }

    #[test]
    fn prop_bitwise_matches_reference(generation in arb_generation(), (a, b) in arb_pair::<u16>(10)) {
        let engine = Engine::new(generation);
        let (va, vb) = (LogicalVector::new(a.clone()).unwrap(), LogicalVector::new(b.clone()).unwrap());

        let and = engine.bitwise_and(&va, &vb).unwrap();
        prop_assert_eq!(and.as_slice(), &scalar::binary(&a, &b, |x, y| x & y)[..]);
        let or = engine.bitwise_or(&va, &vb).unwrap();
        prop_assert_eq!(or.as_slice(), &scalar::binary(&a, &b, |x, y| x | y)[..]);
        let xor = engine.bitwise_xor(&va, &vb).unwrap();
        prop_assert_eq!(xor.as_slice(), &scalar::binary(&a, &b, |x, y| x ^ y)[..]);
        let not = engine.bitwise_not(&va).unwrap();
        prop_assert_eq!(not.as_slice(), &scalar::unary(&a, |x| !x)[..]);
    }

    #[test]
    fn prop_reverse_matches_reference(generation in arb_generation(), (a, _) in arb_pair::<i8>(10)) {
        let engine = Engine::new(generation);
        let rev = engine.reverse(&LogicalVector::new(a.clone()).unwrap()).unwrap();
        prop_assert_eq!(rev.as_slice(), &scalar::reverse_serial(&a)[..]);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Complex lanes
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_complex_unary_match_reference(generation in arb_generation(), (a, _) in arb_pair::<(i16, i16)>(9)) {
        let engine = Engine::new(generation);
        let va = complex_lanes(&a);

        let neg = engine.complex_neg(&va).unwrap();
        let want = scalar::unary(&a, |(re, im): (i16, i16)| Complex::new(re.wrapping_neg(), im.wrapping_neg()));
        prop_assert_eq!(neg.as_slice(), &want[..]);

        let conj = engine.complex_conj(&va).unwrap();
        let want = scalar::unary(&a, |(re, im): (i16, i16)| Complex::new(re, im.wrapping_neg()));
        prop_assert_eq!(conj.as_slice(), &want[..]);
    }

    /// Narrowing keeps the low bits, so the wrapped i32 products agree with
    /// the exact i64 reference once both are truncated.
    #[test]
    fn prop_complex_mul_matches_reference(
        generation in arb_generation(),
        (a, b) in arb_pair::<(i16, i16)>(9),
        bias in any::<i32>(),
    ) {
        let engine = Engine::new(generation);
        let (va, vb) = (complex_lanes(&a), complex_lanes(&b));
        let exact = scalar::complex_mul(&wide_pairs(&a), &wide_pairs(&b));

        let prod = engine.complex_mul(&va, &vb).unwrap();
        let want: Vec<Complex<i16>> = exact.iter().map(|&(re, im)| Complex::new(re as i16, im as i16)).collect();
        prop_assert_eq!(prod.as_slice(), &want[..]);

        let acc: Vec<(i32, i32)> = (0..a.len()).map(|i| (bias.wrapping_add(i as i32), bias.wrapping_sub(i as i32))).collect();
        let out = engine.complex_mul_acc(&complex_lanes(&acc), &va, &vb).unwrap();
        let want: Vec<Complex<i32>> = exact
            .iter()
            .zip(&acc)
            .map(|(&(re, im), &(ar, ai))| Complex::new((ar as i64 + re) as i32, (ai as i64 + im) as i32))
            .collect();
        prop_assert_eq!(out.as_slice(), &want[..]);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 7. Unzip against the serial reference
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_unzip_matches_reference(generation in arb_generation(), (lo, hi, step) in arb_zip_input()) {
        let engine = Engine::new(generation);
        let (vlo, vhi) = (LogicalVector::new(lo.clone()).unwrap(), LogicalVector::new(hi.clone()).unwrap());
        let (even, odd) = engine.unzip(&vlo, &vhi, step).unwrap();

        let stream: Vec<u16> = lo.iter().chain(&hi).copied().collect();
        let (want_even, want_odd) = scalar::unzip_serial(&stream, step);
        prop_assert_eq!(even.as_slice(), &want_even[..]);
        prop_assert_eq!(odd.as_slice(), &want_odd[..]);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 8. Pad filler is never observable
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_pad_fill_invisible(generation in arb_generation(), (a, b) in arb_pair::<i8>(4)) {
        let zero = Engine::from_config(EngineConfig::new(generation).with_pad_fill(PadFill::Zero)).unwrap();
        let scribble = Engine::from_config(EngineConfig::new(generation).with_pad_fill(PadFill::Scribble)).unwrap();
        let (va, vb) = (LogicalVector::new(a.clone()).unwrap(), LogicalVector::new(b.clone()).unwrap());

        prop_assert_eq!(zero.add(&va, &vb).unwrap(), scribble.add(&va, &vb).unwrap());
        prop_assert_eq!(zero.mul(&va, &vb).unwrap(), scribble.mul(&va, &vb).unwrap());
        prop_assert_eq!(zero.reduce_max(&va).unwrap(), scribble.reduce_max(&va).unwrap());

        let mask = zero.lt(&va, &vb).unwrap();
        prop_assert_eq!(mask.clone(), scribble.lt(&va, &vb).unwrap());
        prop_assert_eq!(zero.select(&mask, &va, Operand::Scalar(0i8)).unwrap(), scribble.select(&mask, &va, Operand::Scalar(0i8)).unwrap());
        prop_assert_eq!(zero.bitwise_not(&va).unwrap(), scribble.bitwise_not(&va).unwrap());
        prop_assert_eq!(zero.reverse(&va).unwrap(), scribble.reverse(&va).unwrap());

        if va.len() >= 2 {
            prop_assert_eq!(zero.filter_even(&va, 1).unwrap(), scribble.filter_even(&va, 1).unwrap());
            prop_assert_eq!(zero.filter_odd(&va, 1).unwrap(), scribble.filter_odd(&va, 1).unwrap());
        }
        prop_assert_eq!(zero.zip(&va, &vb, 1).unwrap(), scribble.zip(&va, &vb, 1).unwrap());
        prop_assert_eq!(zero.unzip(&va, &vb, 1).unwrap(), scribble.unzip(&va, &vb, 1).unwrap());

        let pairs: Vec<(i8, i8)> = a.iter().copied().zip(b.iter().copied()).collect();
        let vc = complex_lanes(&pairs);
        prop_assert_eq!(zero.complex_add(&vc, &vc).unwrap(), scribble.complex_add(&vc, &vc).unwrap());
        prop_assert_eq!(zero.complex_conj(&vc).unwrap(), scribble.complex_conj(&vc).unwrap());
        prop_assert_eq!(zero.complex_mul(&vc, &vc).unwrap(), scribble.complex_mul(&vc, &vc).unwrap());
        prop_assert_eq!(zero.complex_abs_square(&vc).unwrap(), scribble.complex_abs_square(&vc).unwrap());
        prop_assert_eq!(zero.complex_reduce_add(&vc).unwrap(), scribble.complex_reduce_add(&vc).unwrap());
    }
}
