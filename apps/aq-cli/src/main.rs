use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use aq_flowsheet::{
    Flowsheet, FlowsheetResult, Strictness, load_json, load_yaml, validate_flowsheet,
};
use aq_solver::MassBalanceSolver;

#[derive(Parser)]
#[command(name = "aq-cli")]
#[command(about = "Aquaflow CLI - Water-treatment flowsheet mass-balance tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate flowsheet file syntax and structure
    Validate {
        /// Path to the flowsheet YAML or JSON file
        flowsheet_path: PathBuf,
        /// Treat dangling stream references as errors
        #[arg(long)]
        strict: bool,
    },
    /// Solve the flowsheet mass balance
    Solve {
        /// Path to the flowsheet YAML or JSON file
        flowsheet_path: PathBuf,
        /// Convergence tolerance on flow deltas (m³/h)
        #[arg(long, default_value_t = 1e-6)]
        tolerance: f64,
        /// Maximum Gauss-Seidel sweeps
        #[arg(long, default_value_t = 100)]
        max_iterations: usize,
        /// Emit the full result as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> FlowsheetResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            flowsheet_path,
            strict,
        } => cmd_validate(&flowsheet_path, strict),
        Commands::Solve {
            flowsheet_path,
            tolerance,
            max_iterations,
            json,
        } => cmd_solve(&flowsheet_path, tolerance, max_iterations, json),
    }
}

fn load_flowsheet(path: &Path) -> FlowsheetResult<Flowsheet> {
    if path.extension().is_some_and(|ext| ext == "json") {
        load_json(path)
    } else {
        load_yaml(path)
    }
}

fn cmd_validate(path: &Path, strict: bool) -> FlowsheetResult<()> {
    let flowsheet = load_flowsheet(path)?;

    let strictness = if strict {
        Strictness::Strict
    } else {
        Strictness::Permissive
    };
    let tolerated = validate_flowsheet(&flowsheet, strictness)?;

    println!(
        "OK: {} equipment, {} streams, {} connections",
        flowsheet.equipment.len(),
        flowsheet.streams.len(),
        flowsheet.connections.len()
    );
    for finding in tolerated {
        println!("  tolerated: {finding}");
    }
    Ok(())
}

fn cmd_solve(
    path: &Path,
    tolerance: f64,
    max_iterations: usize,
    json: bool,
) -> FlowsheetResult<()> {
    let flowsheet = load_flowsheet(path)?;

    let solver = MassBalanceSolver::new(tolerance, max_iterations);
    let result = solver.solve(&flowsheet);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !result.success {
        println!("Solve FAILED");
        for error in &result.errors {
            println!("  {error}");
        }
        return Ok(());
    }

    println!(
        "Solve complete: converged={} iterations={} max_error={:.3e}",
        result.converged, result.iterations, result.max_error
    );
    println!("System recovery: {:.1}%", result.system_recovery);

    println!("Streams:");
    for (stream_id, stream) in &result.streams {
        println!(
            "  {:<24} {:>10.3} m³/h  {:>7.2} bar  {:>6.1} °C",
            stream_id, stream.flow_rate, stream.pressure, stream.temperature
        );
    }

    if !result.errors.is_empty() {
        println!("Findings:");
        for error in &result.errors {
            println!("  {error}");
        }
    }

    Ok(())
}
