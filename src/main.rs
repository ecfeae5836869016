use anyhow::{Context, Result};
use clap::Parser;
use nomads_core::config::AppConfig;
use nomads_core::simulation::{RunOutcome, Simulation};
use nomads_io::{HistoryLogger, StatsWriter};
use nomads_lib::app::{run_headless, run_tui, ShutdownManager, Telemetry};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "standard")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Fixed terrain layout to use instead of generated terrain
    #[arg(long)]
    map: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Stats CSV path, overriding `output.stats_file`
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Print every surviving nomad's state on exit
    #[arg(long)]
    debug: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Standard,
    Headless,
}

fn build_config(args: &Args) -> Result<AppConfig> {
    let mut config = nomads_io::load_config(&args.config)?;
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    if let Some(stats) = &args.stats {
        config.output.stats_file = stats.to_string_lossy().into_owned();
    }
    Ok(config)
}

fn build_simulation(mut config: AppConfig, map: Option<&Path>) -> Result<Simulation> {
    match map {
        Some(path) => {
            let layout = nomads_io::load_map(path)
                .with_context(|| format!("Failed to load map {}", path.display()))?;
            config.world.width = layout.width;
            config.world.height = layout.height;
            Simulation::from_layout(config, &layout)
        }
        None => Simulation::new(config),
    }
}

fn open_telemetry(config: &AppConfig) -> Result<Telemetry> {
    let stats = StatsWriter::create(&config.output.stats_file)
        .with_context(|| format!("Failed to create {}", config.output.stats_file))?;
    let history = HistoryLogger::new_at(&config.output.log_dir)
        .with_context(|| format!("Failed to open event log in {}", config.output.log_dir))?;
    Ok(Telemetry::new(Some(stats), history))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;

    match args.mode {
        Mode::Standard => nomads_core::init_file_logging(Path::new(&config.output.log_dir), "info")?,
        Mode::Headless => nomads_core::init_logging("info"),
    }
    tracing::info!(fingerprint = %config.fingerprint(), "Loaded configuration");

    let mut telemetry = open_telemetry(&config)?;
    let mut sim = build_simulation(config, args.map.as_deref())?;

    let shutdown = ShutdownManager::new();
    shutdown.listen_for_ctrl_c();

    let outcome = match args.mode {
        Mode::Standard => run_tui(&mut sim, &mut telemetry, &shutdown, args.max_steps),
        Mode::Headless => {
            println!("Running in HEADLESS mode...");
            run_headless(&mut sim, &mut telemetry, &shutdown, args.max_steps)
        }
    };
    telemetry.finish()?;
    let outcome = outcome?;

    if args.debug {
        for line in sim.debug_dump() {
            println!("{line}");
        }
    }

    match outcome {
        RunOutcome::Extinct { time } => println!("Population went extinct at tick {time}."),
        RunOutcome::Stopped { time } => println!("Stopped at tick {time}."),
        RunOutcome::StepLimit { time } => println!("Reached step limit at tick {time}."),
    }
    println!(
        "{} nomads alive, {} telemetry rows written.",
        sim.population().len(),
        telemetry.rows_written()
    );
    Ok(())
}
