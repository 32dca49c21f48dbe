//! Iterative multithreaded saxpy benchmark: `Y = Y + a*X` repeated over a
//! vector partitioned across a fixed set of worker threads, with a
//! lock-protected per-iteration reduction of the worker-local averages.

pub mod kernel;
pub mod options;
pub mod partition;
pub mod printer;
pub mod record;
pub mod reduction;
pub mod timing;
pub mod vector;
pub mod worker;
