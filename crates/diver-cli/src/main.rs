//! Diver CLI - run seek/scram expeditions on sewer scenarios.
//!
//! - `diver run <scenario>` - find the ring, forage, and leave
//! - `diver check <scenario>` - validate a scenario and report its margins

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use diver_agent::{run_expedition, ForagerConfig, Scenario, ScramEnv, SimulatedSewer};
use diver_nav::{Cost, ShortestPaths};

#[derive(Parser)]
#[command(name = "diver")]
#[command(about = "Seek the ring, scram for the exit", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both phases on a scenario
    Run {
        /// Scenario YAML file
        scenario: PathBuf,

        /// Override the scenario's safety margin
        #[arg(long)]
        margin: Option<Cost>,

        /// Override the scenario's lookahead depth
        #[arg(long)]
        hops: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a scenario without running it
    Check {
        /// Scenario YAML file
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            margin,
            hops,
            json,
        } => run(&scenario, margin, hops, json),
        Commands::Check { scenario } => check(&scenario),
    }
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
    let scenario = Scenario::from_yaml_str(&content)
        .with_context(|| format!("Failed to parse scenario from {}", path.display()))?;
    Ok(scenario)
}

fn run(path: &Path, margin: Option<Cost>, hops: Option<usize>, json: bool) -> Result<()> {
    let scenario = load_scenario(path)?;
    let mut config = scenario.forager.clone();
    if let Some(margin) = margin {
        config.safety_margin = margin;
    }
    if let Some(hops) = hops {
        config = config.with_lookahead_hops(hops);
    }
    warn_on_thin_margin(&scenario, &config);

    let mut sim = SimulatedSewer::from_scenario(&scenario)
        .with_context(|| format!("Invalid scenario {}", path.display()))?;
    tracing::info!(
        scenario = scenario.name.as_deref().unwrap_or("unnamed"),
        vertices = sim.map().len(),
        budget = scenario.budget,
        "Starting expedition"
    );

    let report = run_expedition(&mut sim, config).context("Expedition failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Expedition: {}", scenario.name.as_deref().unwrap_or("unnamed"));
    println!("==========");
    println!();
    println!(
        "Seek:  {} moves ({} backtracks), {} vertices entered, cost {}",
        report.seek.moves,
        report.seek.backtracks,
        report.seek.visit_order.len(),
        sim.seek_cost()
    );
    println!(
        "Scram: {} moves ({} lookahead, {} travel, {} return)",
        report.scram.moves,
        report.scram.lookahead_moves,
        report.scram.travel_moves,
        report.scram.return_moves
    );
    println!(
        "Value: {} of {} collected",
        report.scram.collected,
        scenario.total_value()
    );
    println!(
        "Steps: {} of {} remaining, ended at {}",
        report.scram.steps_remaining,
        scenario.budget,
        ScramEnv::current(&sim)
    );
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let scenario = load_scenario(path)?;
    let sim = SimulatedSewer::from_scenario(&scenario)
        .with_context(|| format!("Invalid scenario {}", path.display()))?;

    let from_target = ShortestPaths::from_source(sim.map(), scenario.target.clone());
    let unreachable = sim.map().len() - from_target.settled_count();

    println!("Scenario: {}", scenario.name.as_deref().unwrap_or("unnamed"));
    println!("  vertices:     {}", sim.map().len());
    println!("  edges:        {}", scenario.edges.len());
    println!("  total value:  {}", scenario.total_value());
    println!("  heaviest edge {}", scenario.max_edge_weight());
    println!("  margin:       {}", scenario.forager.safety_margin);

    match from_target.distance(&scenario.exit) {
        Ok(cost) => println!("  ring -> exit: {cost} of {} budget", scenario.budget),
        Err(err) => anyhow::bail!("exit not reachable from the ring: {err}"),
    }
    if unreachable > 0 {
        println!("  warning: {unreachable} vertices are cut off from the ring");
    }
    warn_on_thin_margin(&scenario, &scenario.forager);
    Ok(())
}

fn warn_on_thin_margin(scenario: &Scenario, config: &ForagerConfig) {
    let recommended = ForagerConfig::for_max_step_cost(scenario.max_edge_weight()).safety_margin;
    if config.safety_margin < recommended {
        tracing::warn!(
            margin = config.safety_margin,
            recommended,
            "safety margin is below twice the heaviest edge; the trip home may overrun"
        );
    }
}
