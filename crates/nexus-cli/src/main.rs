//! CLI de NexusFlow.
//!
//! `nexus-cli validate <FILE>`, `evaluate`, `sensors <FILE>`,
//! `equipment <NAME>` y `run [FILE]` (bucle de ticks con intervalo 1/2/5 s).
mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nexus_core::TriggerMode;

#[derive(Debug, Parser)]
#[clap(name = "nexus-cli", version, about = "Threshold workflow evaluator")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that a workflow file parses and can start a simulation
    Validate { file: PathBuf },
    /// Evaluate a single condition
    Evaluate {
        #[clap(long, allow_hyphen_values = true)]
        value: f64,
        #[clap(long, default_value = ">")]
        operator: String,
        #[clap(long, allow_hyphen_values = true)]
        threshold: f64,
        #[clap(long, allow_hyphen_values = true)]
        max: Option<f64>,
    },
    /// Print the synthetic sensor readings of a workflow for one tick
    Sensors {
        file: PathBuf,
        #[clap(long, default_value_t = 1)]
        tick: u64,
        #[clap(long)]
        seed: Option<u64>,
        /// Print test-mode data (about half of the conditions triggered)
        #[clap(long)]
        mock_data: bool,
    },
    /// Classify an equipment name and list its sensors
    Equipment { name: String },
    /// Run the simulation loop (built-in sample workflow when no file is given)
    Run {
        file: Option<PathBuf>,
        /// Seconds between ticks: 1, 2 or 5
        #[clap(long)]
        interval: Option<u64>,
        /// Stop after this many ticks
        #[clap(long)]
        ticks: Option<u64>,
        /// Never touch the network
        #[clap(long)]
        mock: bool,
        #[clap(long)]
        mode: Option<TriggerMode>,
        #[clap(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    nexusflow_rust::init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Validate { file } => commands::validate(&file),
        Command::Evaluate { value, operator, threshold, max } => commands::evaluate(value, &operator, threshold, max),
        Command::Sensors { file, tick, seed, mock_data } => commands::sensors(&file, tick, seed, mock_data),
        Command::Equipment { name } => {
            commands::equipment(&name);
            Ok(())
        }
        Command::Run { file, interval, ticks, mock, mode, seed } => {
            let opts = commands::RunOptions { file, interval, ticks, mock, mode, seed };
            commands::run(opts).await
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[nexus-cli] {e}");
            ExitCode::from(commands::exit_code(&e))
        }
    }
}
