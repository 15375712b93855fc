use std::fs;
use std::process;

use clap::{Parser as ClapParser, Subcommand};
use serde_json::Value;
use sorobill_stats::events::contract_event_sizes;
use sorobill_stats::format::{format_simulation_stats, format_tx_stats};
use sorobill_stats::{parse_simulation, parse_transaction, reconcile, simulation_stats};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "SOROBILL_LOG";

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(ClapParser)]
#[command(name = "sorobill", about = "Resource usage report for Soroban transactions")]
#[command(version)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report resources from a recorded simulateTransaction response
    Sim {
        /// simulateTransaction response (JSON)
        #[arg(long)]
        file: String,
        /// Output JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// Reconcile a simulation with the applied transaction
    Tx {
        /// simulateTransaction response (JSON)
        #[arg(long)]
        sim: String,
        /// getTransaction response (JSON)
        #[arg(long)]
        tx: String,
        /// Output JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// Print version
    Version,
}

// ---------------------------------------------------------------------------
// ANSI helpers
// ---------------------------------------------------------------------------

struct Colors {
    red: &'static str,
    bold: &'static str,
    reset: &'static str,
}

const COLORS_ON: Colors = Colors {
    red: "\x1b[31m",
    bold: "\x1b[1m",
    reset: "\x1b[0m",
};

const COLORS_OFF: Colors = Colors {
    red: "",
    bold: "",
    reset: "",
};

fn choose_colors(no_color: bool) -> &'static Colors {
    if no_color {
        &COLORS_OFF
    } else {
        &COLORS_ON
    }
}

fn fail(c: &Colors, msg: impl std::fmt::Display) -> ! {
    eprintln!("{}{}error{}: {}", c.red, c.bold, c.reset, msg);
    process::exit(1);
}

fn init_logging(no_color: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    let c = choose_colors(cli.no_color);
    init_logging(cli.no_color);

    match cli.command {
        Commands::Sim { file, json } => {
            let sim = parse_simulation(&read_json(&file, c)).unwrap_or_else(|e| fail(c, e));
            let stats = simulation_stats(&sim).unwrap_or_else(|e| fail(c, e));

            if json {
                print_json(&stats, c);
            } else {
                let events = contract_event_sizes(&sim.events).unwrap_or_else(|e| fail(c, e));
                print!("{}", format_simulation_stats(&stats, &events));
            }
        }

        Commands::Tx { sim, tx, json } => {
            let sim_data = parse_simulation(&read_json(&sim, c)).unwrap_or_else(|e| fail(c, e));
            let exec = parse_transaction(&read_json(&tx, c)).unwrap_or_else(|e| fail(c, e));
            let stats = reconcile(&sim_data, Some(&exec)).unwrap_or_else(|e| fail(c, e));

            if json {
                print_json(&stats, c);
            } else {
                let events =
                    contract_event_sizes(&sim_data.events).unwrap_or_else(|e| fail(c, e));
                print!("{}", format_tx_stats(&stats, &events));
            }
        }

        Commands::Version => {
            println!("sorobill {}", env!("CARGO_PKG_VERSION"));
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, c: &Colors) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(c, e),
    }
}

fn read_json(path: &str, c: &Colors) -> Value {
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(c, format!("cannot read {}: {}", path, e)));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| fail(c, format!("cannot parse {}: {}", path, e)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
