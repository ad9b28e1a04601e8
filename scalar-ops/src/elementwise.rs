/// `out[i] = f(a[i], b[i])`
#[inline(never)]
pub fn binary<T: Copy, U>(a: &[T], b: &[T], f: impl Fn(T, T) -> U) -> Vec<U> {
    assert_eq!(a.len(), b.len());
    let mut out = Vec::with_capacity(a.len());
    for i in 0..a.len() {
        out.push(f(a[i], b[i]));
    }
    out
}

/// `out[i] = f(a[i])`
#[inline(never)]
pub fn unary<T: Copy, U>(a: &[T], f: impl Fn(T) -> U) -> Vec<U> {
    let mut out = Vec::with_capacity(a.len());
    for i in 0..a.len() {
        out.push(f(a[i]));
    }
    out
}

/// `out[i] = if mask[i] { b[i] } else { a[i] }`
#[inline(never)]
pub fn select<T: Copy>(mask: &[bool], a: &[T], b: &[T]) -> Vec<T> {
    assert_eq!(mask.len(), a.len());
    assert_eq!(a.len(), b.len());
    let mut out = Vec::with_capacity(a.len());
    for i in 0..a.len() {
        out.push(if mask[i] { b[i] } else { a[i] });
    }
    out
}
