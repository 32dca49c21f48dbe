use anyhow::ensure;
use clap::Parser;
use std::env;
use std::path::PathBuf;

const DEFAULT_SIZE: usize = 10_000_000;
const DEFAULT_SEED: u64 = 1;
const DEFAULT_WORKERS: usize = 2;
const DEFAULT_ITERATIONS: usize = 1000;

/// Flags whose value may be omitted on the command line, short and long
/// spellings. The parser retains the default; the caller reports the
/// omission.
const VALUE_FLAGS: [[&str; 2]; 4] = [
    ["-p", "--size"],
    ["-s", "--seed"],
    ["-n", "--workers"],
    ["-i", "--iterations"],
];

const TWO_THREAD_VALUE_FLAGS: [[&str; 2]; 3] = [
    ["-p", "--size"],
    ["-s", "--seed"],
    ["-i", "--iterations"],
];

/// Returns the flags in `args` that were given without a value: the token
/// matches a flag spelling and the next token is absent or is itself a flag.
/// `--flag=value` and `-pVALUE` forms never match a bare spelling, so they
/// are never reported.
fn flags_missing_values<'a>(args: &[String], flags: &'a [[&'a str; 2]]) -> Vec<&'a str> {
    let mut missing = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        for flag in flags {
            if flag.contains(&arg.as_str())
                && args.get(i + 1).map_or(true, |next| next.starts_with('-'))
            {
                missing.push(flag[0]);
            }
        }
    }
    missing
}

fn warn_missing_values(flags: &[[&str; 2]]) {
    let args: Vec<String> = env::args().skip(1).collect();
    for flag in flags_missing_values(&args, flags) {
        tracing::warn!("option {flag} needs a value, using the default");
    }
}

/// Command line surface of the parametrized N-worker binary.
///
/// A flag given without a value falls back to its default and the run
/// continues.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct SaxpyCli {
    /// Vector size
    #[arg(short = 'p', long = "size", default_value_t = DEFAULT_SIZE,
          default_missing_value = "10000000", num_args = 0..=1)]
    pub size: usize,

    /// Seed for problem initialization
    #[arg(short, long, default_value_t = DEFAULT_SEED,
          default_missing_value = "1", num_args = 0..=1)]
    pub seed: u64,

    /// Number of worker threads
    #[arg(short = 'n', long, default_value_t = DEFAULT_WORKERS,
          default_missing_value = "2", num_args = 0..=1)]
    pub workers: usize,

    /// Number of iterations
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS,
          default_missing_value = "1000", num_args = 0..=1)]
    pub iterations: usize,

    /// Append a JSON-lines run record to this file
    #[arg(long)]
    pub record: Option<PathBuf>,
}

impl SaxpyCli {
    /// One warning line per flag that was given without a value.
    pub fn warn_missing_values(&self) {
        warn_missing_values(&VALUE_FLAGS);
    }

    pub fn describe(&self) {
        println!("vector size: {}", self.size);
        println!("seed: {}", self.seed);
        println!("workers: {}", self.workers);
        println!("iterations: {}", self.iterations);
    }

    pub fn to_config(&self) -> anyhow::Result<RunConfig> {
        RunConfig::new(self.size, self.seed, self.workers, self.iterations)
    }
}

/// Command line surface of the fixed two-worker binary (no `-n`).
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct TwoThreadCli {
    /// Vector size
    #[arg(short = 'p', long = "size", default_value_t = DEFAULT_SIZE,
          default_missing_value = "10000000", num_args = 0..=1)]
    pub size: usize,

    /// Seed for problem initialization
    #[arg(short, long, default_value_t = DEFAULT_SEED,
          default_missing_value = "1", num_args = 0..=1)]
    pub seed: u64,

    /// Number of iterations
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS,
          default_missing_value = "1000", num_args = 0..=1)]
    pub iterations: usize,

    /// Append a JSON-lines run record to this file
    #[arg(long)]
    pub record: Option<PathBuf>,
}

impl TwoThreadCli {
    pub const WORKERS: usize = 2;

    /// One warning line per flag that was given without a value.
    pub fn warn_missing_values(&self) {
        warn_missing_values(&TWO_THREAD_VALUE_FLAGS);
    }

    pub fn describe(&self) {
        println!("vector size: {}", self.size);
        println!("seed: {}", self.seed);
        println!("workers: {}", Self::WORKERS);
        println!("iterations: {}", self.iterations);
    }

    pub fn to_config(&self) -> anyhow::Result<RunConfig> {
        RunConfig::new(self.size, self.seed, Self::WORKERS, self.iterations)
    }
}

/// Validated run parameters, checked before any allocation or spawn.
pub struct RunConfig {
    pub size: usize,
    pub seed: u64,
    pub workers: usize,
    pub iterations: usize,
}

impl RunConfig {
    pub fn new(
        size: usize,
        seed: u64,
        workers: usize,
        iterations: usize,
    ) -> anyhow::Result<RunConfig> {
        ensure!(
            size >= 1 && size <= i32::MAX as usize,
            "vector size must satisfy 0 < p <= {}, got {}",
            i32::MAX,
            size
        );
        ensure!(workers >= 1, "worker count must be at least 1");
        ensure!(iterations >= 1, "iteration count must be at least 1");
        Ok(RunConfig {
            size,
            seed,
            workers,
            iterations,
        })
    }
}
