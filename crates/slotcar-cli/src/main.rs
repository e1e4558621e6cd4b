//! Slotcar CLI - run the controller headless against a kinematic world.
//!
//! - `slotcar run` - follow a scenario path and report stops and the final pose
//! - `slotcar check` - validate a configuration file and print the effective settings

mod scenario;
mod sim;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slotcar::core::{WheelSide, WorldView};
use slotcar::SlotcarConfig;
use tracing_subscriber::{fmt, EnvFilter};

use crate::scenario::Scenario;
use crate::sim::SimJoint;

#[derive(Parser)]
#[command(name = "slotcar")]
#[command(about = "Headless differential-drive controller runs", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow a scenario path in the kinematic world
    Run {
        /// Vehicle configuration (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scenario file: path, start pose and scripted bodies
        #[arg(short, long)]
        scenario: PathBuf,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u64,

        /// Seconds per tick
        #[arg(long, default_value_t = 0.05)]
        dt: f64,
    },

    /// Validate a configuration file
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Run {
            config,
            scenario,
            ticks,
            dt,
        } => run_scenario(config, &scenario, ticks, dt),
        Commands::Check { config } => check_config(&config),
    }
}

fn run_scenario(config: Option<PathBuf>, scenario: &Path, ticks: u64, dt: f64) -> Result<()> {
    let config = match config {
        Some(path) => SlotcarConfig::load(&path)?,
        None => SlotcarConfig::default(),
    };
    let scenario = Scenario::load(scenario)?;

    tracing::info!(
        robot = %scenario.robot_name,
        waypoints = scenario.path.len(),
        bodies = scenario.bodies.len(),
        ticks,
        dt,
        "Running scenario"
    );

    let run = scenario::run(&config, &scenario, ticks, dt)?;
    tracing::debug!(
        mode = ?run.slotcar.mode(),
        stop_state = ?run.slotcar.stop_state(),
        bodies = run.world.bodies().len(),
        max_wheel_force = ?run.world.wheel(WheelSide::Left).map(SimJoint::max_force),
        "Final controller state"
    );
    println!("{}", run.summary);
    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    let config = SlotcarConfig::load(path)?;
    let rendered = serde_yaml::to_string(&config).context("Failed to render config")?;
    println!("# {} is valid", path.display());
    print!("{rendered}");
    Ok(())
}
