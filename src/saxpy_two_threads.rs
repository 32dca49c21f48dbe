use clap::Parser;
use tracing_subscriber::EnvFilter;

use saxpy::kernel;
use saxpy::options::TwoThreadCli;
use saxpy::printer::print_tail;
use saxpy::record::RunRecord;
use saxpy::timing::Timing;
use saxpy::vector;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = TwoThreadCli::parse();
    cli.warn_missing_values();
    let config = cli.to_config()?;
    cli.describe();

    let mut problem = vector::init(config.size, config.seed);
    tracing::debug!(a = problem.a, "problem initialized");
    tracing::debug!(x = ?problem.x, y = ?problem.y, "initial vectors");

    let timing = Timing::start("saxpy");
    let y_avgs = kernel::run(
        &problem.x,
        &mut problem.y,
        problem.a,
        config.workers,
        config.iterations,
    );
    let timing = timing.end();

    tracing::debug!(y = ?problem.y, "final vector");

    println!("Execution time: {:.6} ms", timing.elapsed_ms());
    print_tail("Y", &problem.y);
    print_tail("Y_avgs", &y_avgs);

    if let Some(path) = &cli.record {
        let mut record = RunRecord::new();
        record.with_output("elapsed_ms", format!("{:.6}", timing.elapsed_ms()));
        record.with_output("workers", config.workers.to_string());
        record.with_output("last_y", saxpy::printer::format_tail(&problem.y));
        record.with_output("last_y_avgs", saxpy::printer::format_tail(&y_avgs));
        record.write(path);
    }

    Ok(())
}
