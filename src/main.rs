//! Hexhive - Entry Point
//!
//! Plans one turn from an arena snapshot file and prints the move set
//! as JSON. The surrounding scheduler (fetching snapshots, submitting
//! moves, sleeping between turns) lives outside this binary.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use hexhive::core::config::PlannerConfig;
use hexhive::core::error::Result;
use hexhive::orchestrator::TurnOrchestrator;
use hexhive::snapshot::TurnSnapshot;

#[derive(Parser, Debug)]
#[command(name = "hexhive")]
#[command(about = "Plan one turn of colony agent moves from an arena snapshot")]
struct Args {
    /// Arena snapshot JSON file
    snapshot: PathBuf,

    /// Planner configuration TOML; built-in defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort planning after this many milliseconds; unplanned agents
    /// stay in place
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Pretty-print the move set
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("hexhive=info")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };

    let raw = std::fs::read_to_string(&args.snapshot)?;
    let snapshot: TurnSnapshot = serde_json::from_str(&raw)?;

    tracing::info!(
        turn = snapshot.turn_no,
        agents = snapshot.ants.len(),
        cells = snapshot.map.len(),
        "snapshot loaded"
    );

    let deadline = args
        .deadline_ms
        .map(|ms| Instant::now() + Duration::from_millis(ms));

    let orchestrator = TurnOrchestrator::new(config);
    let plan = orchestrator.plan_turn(&snapshot, deadline)?;

    let out = if args.pretty {
        serde_json::to_string_pretty(&plan)?
    } else {
        serde_json::to_string(&plan)?
    };
    println!("{out}");

    Ok(())
}
