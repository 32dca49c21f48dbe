use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A fully initialized saxpy problem: the shared read-only X, the
/// updated-in-place Y, and the coefficient `a`.
pub struct Problem {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub a: f64,
}

/// Fills X, Y and `a` with uniform values in `[0, 1)` from a locally owned
/// generator seeded by the caller.
///
/// X and Y entries are drawn interleaved and the coefficient last, so a given
/// `(size, seed)` pair always produces the same problem.
pub fn init(size: usize, seed: u64) -> Problem {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = Vec::with_capacity(size);
    let mut y = Vec::with_capacity(size);
    for _ in 0..size {
        x.push(rng.gen_range(0.0..1.0));
        y.push(rng.gen_range(0.0..1.0));
    }
    let a = rng.gen_range(0.0..1.0);
    Problem { x, y, a }
}
