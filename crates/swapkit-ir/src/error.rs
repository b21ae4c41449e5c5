//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building circuits.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum IrError {
    /// An argument was rejected before anything was built.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// A register with this name is already attached.
    #[error("Register '{0}' already exists in circuit")]
    DuplicateRegister(String),

    /// Register index past the end of the register.
    #[error("Index {index} out of range for register '{register}' of size {size}")]
    IndexOutOfRange {
        /// Register name.
        register: String,
        /// Requested index.
        index: usize,
        /// Register size.
        size: usize,
    },
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_context_in_message() {
        let err = IrError::QubitNotFound {
            qubit: QubitId(7),
            gate_name: Some("cswap".into()),
        };
        assert_eq!(err.to_string(), "Qubit q7 not found in circuit (gate: cswap)");

        let err = IrError::DuplicateQubit {
            qubit: QubitId(1),
            gate_name: None,
        };
        assert_eq!(err.to_string(), "Duplicate qubit q1 in operation");
    }
}
