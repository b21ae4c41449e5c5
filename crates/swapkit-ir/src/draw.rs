//! Plain-text circuit drawer.
//!
//! One line per qubit, one column per instruction:
//!
//! ```text
//! a[0]: ────X─────
//! b[0]: ────X─────
//! d[0]: ─H──■──H──
//! ```

use crate::circuit::Circuit;
use crate::gate::{GateKind, StandardGate};
use crate::instruction::{Instruction, InstructionKind};

const WIRE: char = '─';
const CONTROL: &str = "■";
const TARGET: &str = "⊕";
const SWAP: &str = "X";
const CROSSING: &str = "┼";
const BARRIER: &str = "░";

/// Render a circuit as text.
pub fn draw(circuit: &Circuit) -> String {
    let labels: Vec<String> = circuit.qubits().iter().map(ToString::to_string).collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut rows: Vec<String> = labels
        .iter()
        .map(|label| format!("{label:<label_width$}: "))
        .collect();

    for inst in circuit.instructions() {
        let column = column_cells(inst, rows.len());
        let width = column
            .iter()
            .flatten()
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(1);

        for (row, cell) in rows.iter_mut().zip(&column) {
            row.push(WIRE);
            push_centered(row, cell.as_deref().unwrap_or(""), width);
            row.push(WIRE);
        }
    }

    let mut out = String::new();
    for mut row in rows {
        row.push(WIRE);
        out.push_str(&row);
        out.push('\n');
    }
    out
}

/// Symbols for one instruction, indexed by qubit. `None` is an idle wire.
fn column_cells(inst: &Instruction, num_rows: usize) -> Vec<Option<String>> {
    let mut cells = vec![None; num_rows];
    let symbols = operand_symbols(inst);

    for (qubit, symbol) in inst.qubits.iter().zip(symbols) {
        if let Some(cell) = cells.get_mut(qubit.0 as usize) {
            *cell = Some(symbol);
        }
    }

    // Vertical link through idle wires spanned by a multi-qubit gate.
    if inst.is_gate() && inst.qubits.len() > 1 {
        let rows = inst.qubits.iter().map(|q| q.0 as usize);
        let (lo, hi) = (rows.clone().min().unwrap_or(0), rows.max().unwrap_or(0));
        for cell in cells.iter_mut().take(hi.min(num_rows)).skip(lo + 1) {
            if cell.is_none() {
                *cell = Some(CROSSING.to_string());
            }
        }
    }

    cells
}

fn operand_symbols(inst: &Instruction) -> Vec<String> {
    let n = inst.qubits.len();
    match &inst.kind {
        InstructionKind::Barrier => vec![BARRIER.to_string(); n],
        InstructionKind::Gate(gate) => match &gate.kind {
            GateKind::Standard(std) => standard_symbols(*std),
            GateKind::Custom(custom) => {
                let text = gate.label.as_deref().unwrap_or(&custom.name);
                vec![text.split_whitespace().collect::<Vec<_>>().join(" "); n]
            }
        },
    }
}

fn standard_symbols(gate: StandardGate) -> Vec<String> {
    let symbols: &[&str] = match gate {
        StandardGate::I => &["I"],
        StandardGate::X => &["X"],
        StandardGate::Y => &["Y"],
        StandardGate::Z => &["Z"],
        StandardGate::H => &["H"],
        StandardGate::S => &["S"],
        StandardGate::Sdg => &["Sdg"],
        StandardGate::T => &["T"],
        StandardGate::Tdg => &["Tdg"],
        StandardGate::CX => &[CONTROL, TARGET],
        StandardGate::CZ => &[CONTROL, CONTROL],
        StandardGate::Swap => &[SWAP, SWAP],
        StandardGate::CCX => &[CONTROL, CONTROL, TARGET],
        StandardGate::CSwap => &[CONTROL, SWAP, SWAP],
    };
    symbols.iter().map(|s| (*s).to_string()).collect()
}

fn push_centered(row: &mut String, text: &str, width: usize) {
    let len = text.chars().count();
    let pad = width.saturating_sub(len);
    let left = pad / 2;
    row.extend(std::iter::repeat_n(WIRE, left));
    row.push_str(text);
    row.extend(std::iter::repeat_n(WIRE, pad - left));
}
