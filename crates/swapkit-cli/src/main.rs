//! swapkit Command-Line Interface
//!
//! Builds swap-test circuits and prints them as text diagrams, `OpenQASM` or
//! JSON.
//!
//! ```text
//! $ swapkit build --qubits 2
//! a[0]: ────X────────
//! a[1]: ────┼──X─────
//! b[0]: ────X──┼─────
//! b[1]: ────┼──X─────
//! d[0]: ─H──■──■──H──
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{OutputFormat, build, version};

/// swapkit - swap-test circuit builder
#[derive(Parser)]
#[command(name = "swapkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a swap-test circuit
    Build {
        /// Qubits in each data register
        #[arg(short = 'n', long, env = "SWAPKIT_QUBITS", allow_negative_numbers = true)]
        qubits: i64,

        /// Output format
        #[arg(short, long, env = "SWAPKIT_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Build {
            qubits,
            format,
            output,
        } => build::execute(qubits, format, output.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
