//! CLI command implementations.

pub mod build;
pub mod version;

use clap::ValueEnum;

/// How a circuit is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Text diagram, one line per qubit
    Text,
    /// OpenQASM 3.0
    Qasm3,
    /// OpenQASM 2.0
    Qasm2,
    /// Circuit IR as JSON
    Json,
    /// Registers, operation counts and depth
    Summary,
}
