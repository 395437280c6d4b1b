use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use ef_core::units::{m3ps, s};
use ef_plant::{PlantError, RunOptions};
use ef_project::{ProjectError, build_facility, plant_run_input};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod report;

use report::RunReport;

#[derive(Parser)]
#[command(name = "ef-cli")]
#[command(about = "EthaFlow CLI - ethanol plant flow simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate plant file syntax and structure
    Validate {
        /// Path to the plant YAML file
        plant_path: PathBuf,
    },
    /// List the stages of a plant in run order
    Stages {
        /// Path to the plant YAML file
        plant_path: PathBuf,
    },
    /// Run the plant once on its feed
    Run {
        /// Path to the plant YAML file
        plant_path: PathBuf,
        /// Feed volumetric flow in m³/s (overrides the file)
        #[arg(long)]
        flow: Option<f64>,
        /// Power interval in seconds (overrides the file)
        #[arg(long)]
        interval: Option<f64>,
        /// Record process logs and cost
        #[arg(long)]
        store: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Plant(#[from] PlantError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { plant_path } => cmd_validate(&plant_path),
        Commands::Stages { plant_path } => cmd_stages(&plant_path),
        Commands::Run {
            plant_path,
            flow,
            interval,
            store,
            json,
        } => cmd_run(&plant_path, flow, interval, store, json),
    }
}

fn cmd_validate(plant_path: &Path) -> CliResult<()> {
    println!("Validating plant: {}", plant_path.display());
    let plant = ef_project::load_yaml(plant_path)?;
    build_facility(&plant)?;
    println!("✓ Plant is valid");
    Ok(())
}

fn cmd_stages(plant_path: &Path) -> CliResult<()> {
    let plant = ef_project::load_yaml(plant_path)?;
    let facility = build_facility(&plant)?;

    println!("Pump: {}", facility.pump().name());
    if facility.stages().is_empty() {
        println!("No stages in plant");
    } else {
        println!("Stages in {}:", facility.name());
        for (i, stage) in facility.stages().iter().enumerate() {
            println!("  {:>2}. {} ({})", i + 1, stage.name(), stage.kind());
        }
    }
    Ok(())
}

fn cmd_run(
    plant_path: &Path,
    flow: Option<f64>,
    interval: Option<f64>,
    store: bool,
    json: bool,
) -> CliResult<()> {
    let plant = ef_project::load_yaml(plant_path)?;
    debug!(plant = %plant.name, stages = plant.stages.len(), "loaded plant");
    let mut facility = build_facility(&plant)?;

    let mut input = plant_run_input(&plant)?;
    if let Some(q) = flow {
        input.total_flow = m3ps(q);
    }
    if let Some(dt) = interval {
        input.interval = s(dt);
    }

    let run = facility.run(&input, RunOptions { store_data: store })?;
    let report = RunReport::new(&facility, &run);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}
