/// Tree reduction: lane `i` combines with lane `i + half` for
/// `half = n/2, n/4, ..., 1`. `n` must be a power of two.
///
/// This fixes the float summation order the engine must reproduce.
#[inline(never)]
pub fn tree_reduce<T: Copy>(v: &[T], f: impl Fn(T, T) -> T) -> T {
    assert!(v.len().is_power_of_two());
    let mut work = v.to_vec();
    let mut half = work.len() / 2;
    while half >= 1 {
        for i in 0..half {
            work[i] = f(work[i], work[i + half]);
        }
        half /= 2;
    }
    work[0]
}

/// Left-to-right fold. Only order-insensitive operators agree with
/// [`tree_reduce`].
#[inline(never)]
pub fn sequential_reduce<T: Copy>(v: &[T], f: impl Fn(T, T) -> T) -> T {
    let mut acc = v[0];
    for i in 1..v.len() {
        acc = f(acc, v[i]);
    }
    acc
}
