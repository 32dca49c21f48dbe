use std::ops::Range;

/// Splits `[0, len)` into `workers` contiguous, disjoint half-open ranges.
///
/// Every range except the last has length `len / workers`; the last range
/// absorbs the remainder. When `workers > len` the division floors to zero,
/// leaving the leading ranges empty and the final range covering the whole
/// vector. Empty ranges are legal downstream: they contribute nothing to the
/// reduction.
///
/// Each worker owns its range of Y exclusively for the entire run, which is
/// the invariant that keeps the elementwise updates lock free.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0, "worker count must be at least 1");
    let chunk = len / workers;
    (0..workers)
        .map(|w| {
            let start = w * chunk;
            let end = if w == workers - 1 { len } else { start + chunk };
            start..end
        })
        .collect()
}
