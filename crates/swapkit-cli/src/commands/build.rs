//! Build command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fmt::Write as _;
use std::fs;
use tracing::info;

use swapkit_ir::{Circuit, swap_test};
use swapkit_qasm3::{emit, emit_qasm2};

use super::OutputFormat;

/// Execute the build command.
pub fn execute(qubits: i64, format: OutputFormat, output: Option<&str>) -> Result<()> {
    let circuit = swap_test(qubits).context("Failed to build swap test")?;
    info!(
        qubits = circuit.num_qubits(),
        ops = circuit.num_ops(),
        depth = circuit.depth(),
        "swap test ready"
    );

    let content = render(&circuit, format)?;

    match output {
        Some(path) => {
            fs::write(path, &content).with_context(|| format!("Failed to write file: {path}"))?;
            eprintln!(
                "{} Wrote {} ({} qubits, {} ops)",
                style("✓").green().bold(),
                style(path).green(),
                circuit.num_qubits(),
                circuit.num_ops()
            );
        }
        None => print!("{content}"),
    }

    Ok(())
}

/// Render a circuit in the requested format.
pub fn render(circuit: &Circuit, format: OutputFormat) -> Result<String> {
    let content = match format {
        OutputFormat::Text => circuit.to_string(),
        OutputFormat::Qasm3 => emit(circuit).context("Failed to emit QASM3")?,
        OutputFormat::Qasm2 => emit_qasm2(circuit).context("Failed to emit QASM2")?,
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(circuit).context("Failed to serialize circuit")?;
            json.push('\n');
            json
        }
        OutputFormat::Summary => summary(circuit),
    };
    Ok(content)
}

fn summary(circuit: &Circuit) -> String {
    let name = circuit.name().split_whitespace().collect::<Vec<_>>().join(" ");
    let registers = circuit
        .registers()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let ops = circuit
        .count_ops()
        .iter()
        .map(|(name, count)| format!("{name}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    let _ = writeln!(out, "Circuit:   {name}");
    let _ = writeln!(out, "Registers: {registers}");
    let _ = writeln!(out, "Qubits:    {}", circuit.num_qubits());
    let _ = writeln!(out, "Ops:       {ops}");
    let _ = writeln!(out, "Depth:     {}", circuit.depth());
    out
}
