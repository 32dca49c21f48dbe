use crate::reduction::SharedReduction;
use std::ops::Range;

/// One worker's share of an iterative saxpy run.
///
/// The controller constructs the task before spawn and hands it to the
/// worker thread by move: a read-only view of this worker's X elements, the
/// exclusive mutable view of the matching Y elements, and a borrow of the
/// shared reduction. Carving Y into disjoint sub-slices up front is what lets
/// the update loop run without any locking.
pub struct WorkerTask<'a> {
    id: usize,
    range: Range<usize>,
    x: &'a [f64],
    y: &'a mut [f64],
    a: f64,
    max_iters: usize,
    shared: &'a SharedReduction,
}

impl<'a> WorkerTask<'a> {
    pub fn new(
        id: usize,
        range: Range<usize>,
        x: &'a [f64],
        y: &'a mut [f64],
        a: f64,
        max_iters: usize,
        shared: &'a SharedReduction,
    ) -> WorkerTask<'a> {
        debug_assert_eq!(range.len(), x.len());
        debug_assert_eq!(range.len(), y.len());
        WorkerTask {
            id,
            range,
            x,
            y,
            a,
            max_iters,
            shared,
        }
    }

    /// Runs all iterations to completion, then sets this worker's flag.
    ///
    /// Each iteration updates `y[i] += a * x[i]` across the owned sub-slice,
    /// summing the updated values as it goes, and publishes the local average
    /// into the accumulator slot for that iteration. An empty sub-slice
    /// publishes nothing (and never divides by zero). All heavy work happens
    /// outside the lock; the reduction step is a single guarded add.
    pub fn run(mut self) {
        tracing::trace!(worker = self.id, range = ?self.range, "worker started");
        let len = self.y.len();
        for it in 0..self.max_iters {
            let mut sum = 0.0;
            for (y, x) in self.y.iter_mut().zip(self.x) {
                *y += self.a * *x;
                sum += *y;
            }
            if len > 0 {
                self.shared.add_partial(it, sum / len as f64);
            }
        }
        self.shared.mark_done(self.id);
        tracing::trace!(worker = self.id, "worker done");
    }
}
