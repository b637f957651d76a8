use analytics::AnalyticsEngine;
use analyzer::find_simulation;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{load_config, Config};
use core_types::{SimulationRecord, TTestKind};
use repository::SimulationRepository;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod report;

/// The main entry point for the evacuation analysis toolkit.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level)?;

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.directory.clone());
    let repository = load_repository(&data_dir)?;

    // Execute the appropriate command
    match cli.command {
        Commands::List => handle_list(&repository),
        Commands::Summary(args) => handle_summary(args, &repository),
        Commands::Compare(args) => handle_compare(args, &repository, &config),
        Commands::Curve(args) => handle_curve(args, &repository),
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("Invalid log level '{default_level}'"))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Summary statistics and significance tests over evacuation-simulation output.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./evacstats.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the simulation output. Overrides `data.directory`.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every simulation file found in the data directory.
    List,
    /// Mean and standard deviation of evacuation time per agent count, one table per exit count.
    Summary(SummaryArgs),
    /// Test whether two simulated conditions differ in evacuation time.
    Compare(CompareArgs),
    /// Mean number of evacuated agents over time for one simulation.
    Curve(CurveArgs),
}

#[derive(Parser)]
struct SummaryArgs {
    /// Print the series as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct CompareArgs {
    /// Agent count of the control condition.
    #[arg(long)]
    agents: f64,

    /// Exit count of the control condition.
    #[arg(long)]
    exits: f64,

    /// Agent count of the treatment condition (defaults to `--agents`).
    #[arg(long)]
    against_agents: Option<f64>,

    /// Exit count of the treatment condition (defaults to `--exits`).
    #[arg(long)]
    against_exits: Option<f64>,

    /// The t-test to run. Overrides `analysis.t_test`.
    #[arg(long, value_enum)]
    test: Option<TTestKind>,

    /// Print the comparison as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct CurveArgs {
    /// Agent count of the simulation.
    #[arg(long)]
    agents: f64,

    /// Exit count of the simulation.
    #[arg(long)]
    exits: f64,

    /// Only print every n-th timestep.
    #[arg(long, default_value_t = 1)]
    every: usize,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn load_repository(data_dir: &Path) -> Result<SimulationRepository> {
    let repository = SimulationRepository::open(data_dir)
        .with_context(|| format!("Failed to load simulation data from {}", data_dir.display()))?;

    tracing::info!(
        directory = %data_dir.display(),
        simulations = repository.len(),
        "Loaded simulation data."
    );
    for record in repository.records() {
        if !record.recorded_runs_match() {
            tracing::warn!(
                file = %record.source_path().display(),
                recorded = record.evacuation_times().len(),
                runs = ?record.runs().ok(),
                "Recorded evacuation times do not match the Runs parameter."
            );
        }
    }
    Ok(repository)
}

fn select(repository: &SimulationRepository, agents: f64, exits: f64) -> Result<&SimulationRecord> {
    find_simulation(repository.records(), agents, exits).with_context(|| {
        format!("No simulation with {agents} agents and {exits} exits was found")
    })
}

fn handle_list(repository: &SimulationRepository) -> Result<()> {
    if repository.is_empty() {
        println!("No simulation files in {}", repository.directory().display());
        return Ok(());
    }
    println!("{}", report::records_table(&repository.sorted_by_path()));
    Ok(())
}

fn handle_summary(args: SummaryArgs, repository: &SimulationRepository) -> Result<()> {
    let engine = AnalyticsEngine::new();
    let series = engine
        .series_by_exits(repository.records())
        .context("Failed to summarize evacuation times")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    for exit_series in &series {
        println!("\nExits: {}", exit_series.num_exits);
        println!("{}", report::series_table(exit_series));
    }
    Ok(())
}

fn handle_compare(
    args: CompareArgs,
    repository: &SimulationRepository,
    config: &Config,
) -> Result<()> {
    let control = select(repository, args.agents, args.exits)?;
    let treatment = select(
        repository,
        args.against_agents.unwrap_or(args.agents),
        args.against_exits.unwrap_or(args.exits),
    )?;

    let engine = AnalyticsEngine::with_test_kind(args.test.unwrap_or(config.analysis.t_test));
    let comparison = engine
        .compare(control, treatment)
        .context("Failed to compare evacuation times")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!(
            "{}",
            report::comparison_table(&comparison, config.analysis.significance_level)
        );
    }
    Ok(())
}

fn handle_curve(args: CurveArgs, repository: &SimulationRepository) -> Result<()> {
    let record = select(repository, args.agents, args.exits)?;
    let curve = AnalyticsEngine::new()
        .evacuation_curve(record)
        .context("Failed to compute the evacuation curve")?;

    if curve.is_empty() {
        println!("{} has no agents-vs-time data recorded", record.file_name());
        return Ok(());
    }
    println!("{}", report::curve_table(&curve, args.every));
    Ok(())
}
