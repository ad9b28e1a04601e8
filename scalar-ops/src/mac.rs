/// `acc[l] + sum_j coeff[(start + j*step) % coeff.len()] * data[j][l]`,
/// with `mul`/`add` supplied in the accumulator domain.
#[allow(clippy::too_many_arguments)]
#[inline(never)]
pub fn accumulate<T: Copy, A: Copy>(
    acc: Option<&[A]>,
    zero: A,
    coeff: &[T],
    coeff_start: usize,
    coeff_step: usize,
    data: &[&[T]],
    mul: impl Fn(T, T) -> A,
    add: impl Fn(A, A) -> A,
) -> Vec<A> {
    let len = data[0].len();
    let mut out = Vec::with_capacity(len);
    for l in 0..len {
        let mut sum = acc.map_or(zero, |a| a[l]);
        for j in 0..data.len() {
            let c = coeff[(coeff_start + j * coeff_step) % coeff.len()];
            sum = add(sum, mul(c, data[j][l]));
        }
        out.push(sum);
    }
    out
}

/// `out[l] = sum_p coeff[cs + p*CS] * data[ds + l*DSY + p*DSX]`, indices
/// modulo the vector lengths, accumulated in `i64`.
#[allow(clippy::too_many_arguments)]
#[inline(never)]
pub fn sliding_mul(
    lanes: usize,
    points: usize,
    coeff: &[i64],
    coeff_start: usize,
    coeff_step: usize,
    data: &[i64],
    data_start: usize,
    data_step_x: usize,
    data_step_y: usize,
) -> Vec<i64> {
    let mut out = vec![0i64; lanes];
    for l in 0..lanes {
        for p in 0..points {
            let c = coeff[(coeff_start + p * coeff_step) % coeff.len()];
            let d = data[(data_start + l * data_step_y + p * data_step_x) % data.len()];
            out[l] += c * d;
        }
    }
    out
}

/// `(ar*br - ai*bi, ar*bi + ai*br)` per lane on `(re, im)` pairs.
#[inline(never)]
pub fn complex_mul(a: &[(i64, i64)], b: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let mut out = Vec::with_capacity(a.len());
    for i in 0..a.len() {
        let (ar, ai) = a[i];
        let (br, bi) = b[i];
        out.push((ar * br - ai * bi, ar * bi + ai * br));
    }
    out
}
