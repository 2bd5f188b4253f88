//! charger: command-line driver for the rust_charger simulation.
//!
//! ```text
//! charger generate --out data.bin --seed 7
//! charger run --data data.bin --start-x 500 --start-y 500 --out-dir output/run
//! ```
//!
//! Set `RUST_LOG=debug` to see every committed step.

mod config;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use cr_core::{Point, SimRng};
use cr_output::{CsvWriter, OutputWriter, SimOutputObserver};
use cr_scatter::{ScatterParams, generate_scatter, load_scatter_file, save_scatter_file};
use cr_sim::{Sim, SimBuilder, SimState, Snapshot};

use config::ChargerConfig;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "charger")]
#[command(version, about = "Greedy battery-swap charger simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a synthetic scatter file
    Generate {
        /// Output file
        #[arg(short, long, default_value = "data.bin")]
        out: PathBuf,

        /// Generator seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Side length of the square area
        #[arg(long, default_value = "1000")]
        grid: u32,

        #[arg(long, default_value = "150")]
        vehicles: usize,

        #[arg(long, default_value = "20")]
        depots: usize,
    },

    /// Run the charger over a scatter file
    Run {
        /// Scatter file produced by `generate`
        #[arg(short, long)]
        data: PathBuf,

        /// Charger start position
        #[arg(long)]
        start_x: f64,
        #[arg(long)]
        start_y: f64,

        /// TOML config; defaults apply to anything it leaves out
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for step and fleet output
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output backend
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Stop after this many steps instead of running to the end
        #[arg(long)]
        steps: Option<u64>,

        /// Override the config seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the distance budget
        #[arg(long)]
        budget: Option<f64>,

        /// Write the final snapshot as JSON
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Sqlite,
    Parquet,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { out, seed, grid, vehicles, depots } => {
            let params = ScatterParams {
                grid,
                vehicle_count: vehicles,
                depot_count: depots,
                ..ScatterParams::default()
            };
            generate(&out, &params, seed)
        }
        Commands::Run { data, start_x, start_y, config, out_dir, format, steps, seed, budget, snapshot } => {
            let mut cfg = ChargerConfig::load(config.as_deref())?;
            if let Some(seed) = seed {
                cfg.sim.seed = seed;
            }
            if let Some(budget) = budget {
                cfg.sim.distance_budget = budget;
            }
            let args = RunArgs {
                data,
                start: Point::new(start_x, start_y),
                out_dir,
                format,
                steps,
                snapshot,
            };
            run(&cfg, &args)
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// ── generate ──────────────────────────────────────────────────────────────────

fn generate(out: &Path, params: &ScatterParams, seed: u64) -> Result<()> {
    let scatter = generate_scatter(params, &mut SimRng::new(seed))?;
    save_scatter_file(out, &scatter)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!(
        "Wrote {} vehicles and {} depots to {}",
        scatter.vehicles.len(),
        scatter.depots.len(),
        out.display()
    );
    Ok(())
}

// ── run ───────────────────────────────────────────────────────────────────────

struct RunArgs {
    data:     PathBuf,
    start:    Point,
    out_dir:  Option<PathBuf>,
    format:   Format,
    steps:    Option<u64>,
    snapshot: Option<PathBuf>,
}

fn run(cfg: &ChargerConfig, args: &RunArgs) -> Result<()> {
    let scatter = load_scatter_file(
        &args.data,
        cfg.data.vehicles,
        cfg.data.depots,
        cfg.data.depot_capacity,
    )
    .with_context(|| format!("failed to read {}", args.data.display()))?;
    let fleet = scatter.into_fleet(cfg.sim.bounds)?;

    let mut sim = SimBuilder::new(cfg.sim.clone(), fleet, args.start).build()?;
    let initial = sim.snapshot();
    println!("=== charger ===");
    println!(
        "Vehicles: {}  |  Depots: {}  |  Budget: {}  |  Seed: {}",
        initial.vehicles.len(),
        initial.depots.len(),
        cfg.sim.distance_budget,
        cfg.sim.seed
    );
    println!(
        "Needing service: {}  |  Average charge: {}",
        initial.needing_service(cfg.sim.low_charge_threshold),
        fmt_charge(&initial)
    );
    println!();

    let t0 = Instant::now();
    match &args.out_dir {
        None => {
            drive(&mut sim, args.steps, &mut cr_sim::NoopObserver);
        }
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            match args.format {
                Format::Csv => drive_with_output(&mut sim, args.steps, CsvWriter::new(dir)?)?,
                #[cfg(feature = "sqlite")]
                Format::Sqlite => drive_with_output(&mut sim, args.steps, cr_output::SqliteWriter::new(dir)?)?,
                #[cfg(feature = "parquet")]
                Format::Parquet => drive_with_output(&mut sim, args.steps, cr_output::ParquetWriter::new(dir)?)?,
                #[allow(unreachable_patterns)]
                other => bail!("output format {other:?} is not compiled into this build"),
            }
        }
    }
    let elapsed = t0.elapsed();

    let fin = sim.snapshot();
    info!(steps = fin.step, state = %fin.state, "run finished");
    println!("Finished in {:.3} s: {}", elapsed.as_secs_f64(), fin.state);
    println!("  steps            : {}", fin.step);
    println!("  travelled        : {:.1}", fin.travelled());
    println!("  remaining budget : {:.1}", fin.remaining_budget());
    println!("  serviced         : {}", fin.serviced_count());
    println!("  depots visited   : {} / {}", fin.visited_depot_count(), fin.depots.len());
    println!("  packs on board   : {}", fin.agent.packs());
    println!("  average charge   : {} (was {})", fmt_charge(&fin), fmt_charge(&initial));

    if let Some(path) = &args.snapshot {
        write_snapshot(path, &fin)?;
        println!("  snapshot         : {}", path.display());
    }
    Ok(())
}

fn drive<O: cr_sim::SimObserver>(sim: &mut Sim, steps: Option<u64>, observer: &mut O) -> SimState {
    match steps {
        Some(n) => sim.run_steps(n, observer),
        None => SimState::Halted(sim.run_to_completion_with(observer)),
    }
}

fn drive_with_output<W: OutputWriter>(sim: &mut Sim, steps: Option<u64>, writer: W) -> Result<()> {
    let mut obs = SimOutputObserver::new(writer);
    drive(sim, steps, &mut obs);
    // A bounded run may stop before halting.
    obs.finish_with(&sim.snapshot());
    if let Some(e) = obs.take_error() {
        return Err(e).context("failed to write simulation output");
    }
    Ok(())
}

fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), snapshot)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn fmt_charge(snapshot: &Snapshot) -> String {
    snapshot
        .average_charge()
        .map_or_else(|| "n/a".to_owned(), |c| format!("{c:.1}%"))
}
