//! one_intersection — smallest greenwave study.
//!
//! A single fixed-time intersection (20 s green per axis) fed by Poisson
//! arrivals on both approaches.  Useful as a sanity check and as a source of
//! snapshot data for training learned policies.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use gw_output::CsvExporter;
use gw_traffic::{scenario, Simulation};

#[derive(Parser)]
#[command(about = "Single fixed-time intersection under Poisson arrivals")]
struct Args {
    /// Output directory for CSV traces.
    #[arg(long, default_value = "output/one_intersection")]
    out: PathBuf,

    /// RNG seed override.
    #[arg(long)]
    seed: Option<u64>,

    /// Horizon override, in simulated minutes.
    #[arg(long)]
    minutes: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = scenario::one_intersection();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(minutes) = args.minutes {
        config.horizon = minutes * 60.0;
    }

    println!("=== one_intersection — greenwave ===");
    println!("Seed: {}  |  Horizon: {} s", config.seed, config.horizon);
    println!();

    let t0 = Instant::now();
    let output = Simulation::build(&config)?.run()?;
    let elapsed = t0.elapsed();

    std::fs::create_dir_all(&args.out)?;
    CsvExporter::export(&args.out, &output.trace)?;

    let report = &output.report;
    println!("Saved traces: {}", args.out.display());
    println!("Completed vehicles: {}", report.completed);
    match report.avg_total_wait {
        Some(avg) => println!("Avg wait (s): {avg:.2}"),
        None => println!("Avg wait (s): n/a"),
    }
    println!("Throughput (veh/min): {:.2}", report.throughput_per_min);
    println!("Wall time: {:.3} s", elapsed.as_secs_f64());

    Ok(())
}
