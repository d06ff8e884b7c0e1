//! QEL - Quantum Elevator
//! Command-line interface for running the elevator simulation and quantum circuits

mod script;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qel_dispatch::{DispatchPolicy, Direction, PresenceSource};
use qel_orchestration::{ElevatorSimulation, PacingMode, SimulationConfig, TickPacer, TickReport};
use qel_quantum::{GateOp, QuantumRegister};
use script::Scheduled;

#[derive(Parser)]
#[command(name = "qel")]
#[command(author = "Silvano Neto <dev@silvanoneto.com>")]
#[command(version = "2026.1.16")]
#[command(about = "QEL - Quantum Elevator simulation", long_about = None)]
struct Cli {
    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted elevator scenario
    Run(RunArgs),

    /// Apply gates to a register and print the probabilities
    Circuit {
        /// Gates such as H0, X2, CNOT0,1 (control,target)
        #[arg(value_name = "GATE")]
        gates: Vec<GateOp>,

        /// Number of qubits
        #[arg(short, long, default_value_t = 3)]
        qubits: usize,

        /// Measure after applying the gates
        #[arg(short, long)]
        measure: bool,

        /// Seed for the measurement draw
        #[arg(long, env = "QEL_SEED")]
        seed: Option<u64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Configuration file
        #[arg(short, long, value_name = "FILE", env = "QEL_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "QEL_CONFIG")]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 30)]
    ticks: u64,

    /// Call the elevator from FLOOR after TICK ticks
    #[arg(long = "call", value_name = "FLOOR@TICK")]
    calls: Vec<Scheduled>,

    /// Flip the presence sensor of FLOOR after TICK ticks
    #[arg(long = "toggle", value_name = "FLOOR@TICK")]
    toggles: Vec<Scheduled>,

    /// Dispatch policy (fcfs, cost)
    #[arg(short, long, env = "QEL_POLICY")]
    policy: Option<DispatchPolicy>,

    /// Seed for the presence feed and measurements
    #[arg(long, env = "QEL_SEED")]
    seed: Option<u64>,

    /// Pace ticks at the configured interval
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => run_command(args),
        Commands::Circuit { gates, qubits, measure, seed, json } => {
            circuit_command(&gates, qubits, measure, seed, json)
        }
        Commands::Config { config } => config_command(config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "qel=debug" } else { "qel=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    match path {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(SimulationConfig::default()),
    }
}

// ============================================================================
// Simulation
// ============================================================================

fn run_command(args: RunArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.realtime {
        config.pacing.mode = PacingMode::RealTime;
    }

    let mut pacer = TickPacer::new(
        Duration::from_millis(config.tick_interval_ms),
        config.pacing.mode,
    );
    let mut sim = ElevatorSimulation::new(config)?;

    if !args.json {
        println!(
            "{} {} ticks, policy {}",
            "Running".green().bold(),
            args.ticks,
            sim.policy().to_string().cyan()
        );
    }

    apply_scheduled(&mut sim, &args, 0);
    sim.run(args.ticks, &mut pacer, |sim, report| {
        if !args.json {
            print_tick(sim, report);
        }
        apply_scheduled(sim, &args, report.tick);
    });

    let stats = pacer.stats();
    tracing::debug!(
        ticks = stats.tick_count,
        late = stats.late_ticks,
        avg = ?stats.avg_execution_time,
        max = ?stats.max_execution_time,
        "run finished"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
    } else {
        print_summary(&sim);
    }

    Ok(())
}

fn apply_scheduled<P: PresenceSource>(sim: &mut ElevatorSimulation<P>, args: &RunArgs, tick: u64) {
    for floor in script::due(&args.calls, tick) {
        if let Err(e) = sim.submit_request(floor) {
            eprintln!("{} {}", "warning:".yellow().bold(), e);
        }
    }
    for floor in script::due(&args.toggles, tick) {
        if let Err(e) = sim.toggle_sensor_override(floor) {
            eprintln!("{} {}", "warning:".yellow().bold(), e);
        }
    }
}

fn print_tick<P: PresenceSource>(sim: &ElevatorSimulation<P>, report: &TickReport) {
    let state = sim.motion_state();
    let arrow = match state.direction {
        Direction::Up => "↑",
        Direction::Down => "↓",
        Direction::Stopped => "·",
    };
    let doors = if state.doors_open { "open".green() } else { "closed".normal() };
    let waiting: Vec<String> = sim
        .active_requests()
        .iter()
        .map(|r| {
            let floor = r.location.to_string();
            if r.presence_detected { floor } else { format!("{}?", floor) }
        })
        .collect();

    println!(
        "{:>5}  floor {} {}  doors {:<6}  waiting [{}]",
        format!("t{}", report.tick).dimmed(),
        state.position.to_string().bold(),
        arrow,
        doors,
        waiting.join(" ")
    );
}

fn print_summary<P: PresenceSource>(sim: &ElevatorSimulation<P>) {
    let state = sim.motion_state();
    println!();
    println!("{}", "Final state:".bold());
    println!("  floor      {}", state.position);
    println!("  direction  {}", state.direction);
    println!("  doors      {}", if state.doors_open { "open" } else { "closed" });
    println!("  waiting    {}", sim.active_requests().len());

    println!();
    println!("{}", "Event log (oldest first):".bold());
    let entries: Vec<_> = sim.logs().entries().collect();
    for entry in entries.into_iter().rev() {
        println!(
            "  {:>7}  {:<8} {}",
            format!("{}ms", entry.timestamp).dimmed(),
            entry.kind.to_string().cyan(),
            entry.message
        );
    }
}

// ============================================================================
// Circuit
// ============================================================================

fn circuit_command(
    gates: &[GateOp],
    qubits: usize,
    measure: bool,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut register = QuantumRegister::new(qubits)?;
    for op in gates {
        register
            .apply(*op)
            .with_context(|| format!("applying gate {}", op))?;
    }

    let outcome = if measure {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Some(register.measure_with(&mut rng))
    } else {
        None
    };

    if json {
        let value = serde_json::json!({
            "qubits": register.qubits(),
            "gates": register.history(),
            "probabilities": register.probabilities(),
            "measurement": outcome,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let circuit: Vec<String> = register.history().iter().map(ToString::to_string).collect();
    println!(
        "{} {} qubits: {}",
        "Circuit".green().bold(),
        qubits,
        if circuit.is_empty() { "(empty)".to_string() } else { circuit.join(" ") }
    );

    for (index, p) in register.probabilities().iter().enumerate() {
        let label = register.basis_label(index);
        if *p > 1e-12 {
            println!("  {}  {:.4}", label.cyan(), p);
        } else {
            println!("  {}  {:.4}", label.dimmed(), p);
        }
    }

    if let Some(index) = outcome {
        println!("{} {}", "Measured".green().bold(), register.basis_label(index).bold());
    }

    Ok(())
}

// ============================================================================
// Config
// ============================================================================

fn config_command(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
