/// Keeps chunks `0, 2, 4, ...` (or `1, 3, 5, ...` when `odd`) of `step` lanes.
#[inline(never)]
pub fn filter_serial<T: Copy>(v: &[T], step: usize, odd: bool) -> Vec<T> {
    let keep = usize::from(odd);
    let mut out = Vec::with_capacity(v.len() / 2);
    for i in 0..v.len() {
        if (i / step) % 2 == keep {
            out.push(v[i]);
        }
    }
    out
}

/// Stream `a[0..step], b[0..step], a[step..2*step], ...`.
#[inline(never)]
pub fn zip_serial<T: Copy>(a: &[T], b: &[T], step: usize) -> Vec<T> {
    assert_eq!(a.len(), b.len());
    let mut out = Vec::with_capacity(2 * a.len());
    for k in 0..2 * a.len() {
        let chunk = k / step;
        let src = (chunk / 2) * step + k % step;
        out.push(if chunk % 2 == 0 { a[src] } else { b[src] });
    }
    out
}

/// Inverse of [`zip_serial`].
#[inline(never)]
pub fn unzip_serial<T: Copy>(stream: &[T], step: usize) -> (Vec<T>, Vec<T>) {
    let mut a = Vec::with_capacity(stream.len() / 2);
    let mut b = Vec::with_capacity(stream.len() / 2);
    for k in 0..stream.len() {
        if (k / step) % 2 == 0 {
            a.push(stream[k]);
        } else {
            b.push(stream[k]);
        }
    }
    (a, b)
}

/// `out[i] = v[len - 1 - i]`
#[inline(never)]
pub fn reverse_serial<T: Copy>(v: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(v.len());
    for i in 0..v.len() {
        out.push(v[v.len() - 1 - i]);
    }
    out
}
