use parking_lot::{Condvar, Mutex};

struct ReductionInner {
    /// One accumulator slot per iteration, zero-initialized.
    sums: Vec<f64>,
    /// One completion flag per worker, set exactly once by that worker.
    done: Vec<bool>,
}

/// The single point of contention in a run.
///
/// Holds the per-iteration partial sums and the per-worker completion flags
/// behind one mutex, with an associated condvar that is notified whenever any
/// worker makes progress: once per worker per iteration and once more when a
/// worker sets its flag. Every critical section is a single float add or a
/// single flag write, independent of vector size.
pub struct SharedReduction {
    inner: Mutex<ReductionInner>,
    progress: Condvar,
}

impl SharedReduction {
    pub fn new(max_iters: usize, workers: usize) -> SharedReduction {
        SharedReduction {
            inner: Mutex::new(ReductionInner {
                sums: vec![0.0; max_iters],
                done: vec![false; workers],
            }),
            progress: Condvar::new(),
        }
    }

    /// Adds one worker's local average for iteration `iter` into the shared
    /// slot. Contributions are additive, so the lock acquisition order does
    /// not affect the result.
    pub fn add_partial(&self, iter: usize, avg: f64) {
        let mut state = self.inner.lock();
        state.sums[iter] += avg;
        self.progress.notify_all();
    }

    /// Marks worker `worker` finished. The flag is written under the same
    /// lock the controller reads it with, and never unset afterwards.
    pub fn mark_done(&self, worker: usize) {
        let mut state = self.inner.lock();
        debug_assert!(!state.done[worker], "worker completed twice");
        state.done[worker] = true;
        self.progress.notify_all();
    }

    /// Blocks until every worker's completion flag is true.
    ///
    /// Waits for each worker in turn, re-checking the flag after every
    /// wake-up: the condvar fires on every iteration of every worker, so a
    /// wake-up does not imply the awaited worker finished.
    pub fn wait_all_done(&self) {
        let workers = self.inner.lock().done.len();
        for w in 0..workers {
            let mut state = self.inner.lock();
            while !state.done[w] {
                self.progress.wait(&mut state);
            }
        }
    }

    /// Consumes the reduction, dividing every iteration slot by the worker
    /// count. The divisor is the number of workers, not the number of vector
    /// elements: the published value is the mean of the worker-local averages
    /// and only equals the global elementwise mean when all partitions have
    /// the same size.
    pub fn into_averages(self) -> Vec<f64> {
        let state = self.inner.into_inner();
        let workers = state.done.len() as f64;
        state.sums.into_iter().map(|sum| sum / workers).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wait_unblocks_only_after_all_flags() {
        let shared = SharedReduction::new(4, 3);
        thread::scope(|s| {
            for w in 0..3 {
                let shared = &shared;
                s.spawn(move || {
                    for it in 0..4 {
                        shared.add_partial(it, (w + 1) as f64);
                        thread::sleep(Duration::from_millis(2));
                    }
                    shared.mark_done(w);
                });
            }
            shared.wait_all_done();
            let state = shared.inner.lock();
            assert!(state.done.iter().all(|&d| d));
        });
    }

    #[test]
    fn test_completion_flag_is_monotonic() {
        let shared = SharedReduction::new(1, 2);
        shared.mark_done(0);
        assert!(shared.inner.lock().done[0]);
        // Progress from the other worker must not disturb the flag.
        shared.add_partial(0, 0.5);
        shared.mark_done(1);
        let state = shared.inner.lock();
        assert!(state.done[0]);
        assert!(state.done[1]);
    }

    #[test]
    fn test_averages_divide_by_worker_count() {
        let shared = SharedReduction::new(2, 4);
        for w in 0..4 {
            shared.add_partial(0, 1.0);
            shared.add_partial(1, 2.0);
            shared.mark_done(w);
        }
        assert_eq!(vec![1.0, 2.0], shared.into_averages());
    }

    #[test]
    fn test_missing_contributions_still_divide_by_worker_count() {
        // A worker with an empty partition publishes nothing but still counts
        // in the divisor.
        let shared = SharedReduction::new(1, 4);
        shared.add_partial(0, 1.0);
        for w in 0..4 {
            shared.mark_done(w);
        }
        assert_eq!(vec![0.25], shared.into_averages());
    }
}
