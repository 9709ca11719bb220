//! grid_2x2 — policy comparison on a 2x2 grid.
//!
//! Four intersections (A, B top row; C, D bottom row), west-to-east traffic
//! on the rows and north-to-south on the columns.  Every intersection runs
//! the same controller, selected on the command line, which makes the run
//! a like-for-like comparison of signal policies on identical demand.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use gw_output::CsvExporter;
use gw_traffic::{scenario, ControllerSpec, NetworkConfig, Simulation};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ControllerKind {
    Fixed,
    Actuated,
    Dt,
}

#[derive(Parser)]
#[command(about = "2x2 grid of intersections under a selectable signal policy")]
struct Args {
    /// Full network config (JSON).  Overrides --controller and --policy.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Signal policy to run at every intersection.
    #[arg(long, value_enum, default_value = "actuated")]
    controller: ControllerKind,

    /// Decision-tree artifact (JSON), required with --controller dt.
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Output directory for CSV traces.
    #[arg(long, default_value = "output/grid_2x2")]
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

    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<NetworkConfig>(&text)?
        }
        None => {
            let controller = match args.controller {
                ControllerKind::Fixed => ControllerSpec::fixed_default(),
                ControllerKind::Actuated => ControllerSpec::actuated_default(),
                ControllerKind::Dt => match args.policy {
                    Some(path) => ControllerSpec::learned_default(path),
                    None => bail!("--controller dt requires --policy <artifact.json>"),
                },
            };
            scenario::grid_2x2(controller)
        }
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(minutes) = args.minutes {
        config.horizon = minutes * 60.0;
    }

    println!("=== grid_2x2 — greenwave ===");
    println!(
        "Controller: {:?}  |  Seed: {}  |  Horizon: {} s",
        args.controller, config.seed, config.horizon
    );
    println!();

    let t0 = Instant::now();
    let output = Simulation::build(&config)?.run()?;
    let elapsed = t0.elapsed();

    std::fs::create_dir_all(&args.out)?;
    CsvExporter::export(&args.out, &output.trace)?;

    let report = &output.report;
    println!("Saved traces: {}", args.out.display());
    println!("Spawned vehicles: {}", report.spawned);
    println!("Completed vehicles: {}", report.completed);
    println!("In flight at horizon: {}", report.in_flight);
    match report.avg_total_wait {
        Some(avg) => println!("Avg total wait (s): {avg:.2}"),
        None => println!("Avg total wait (s): n/a"),
    }
    println!("Throughput (veh/min): {:.2}", report.throughput_per_min);
    println!("Wall time: {:.3} s", elapsed.as_secs_f64());

    Ok(())
}
