//! Error types for the QASM emitter.

use thiserror::Error;

/// Errors that can occur during emission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// Gate has no QASM form (opaque custom gate or zero-qubit gate).
    #[error("Gate '{0}' has no QASM representation")]
    UnsupportedGate(String),

    /// IR error while reading the circuit.
    #[error("Circuit error: {0}")]
    CircuitError(#[from] swapkit_ir::IrError),
}

/// Result type for emission.
pub type EmitResult<T> = Result<T, EmitError>;
