//! `OpenQASM` Emitter for swapkit
//!
//! Serializes [`swapkit_ir::Circuit`]s to `OpenQASM` 3.0 (and 2.0 for older
//! toolchains), keeping register names so the output reads like the circuit
//! was written by hand.
//!
//! # Example
//!
//! ```rust
//! use swapkit_ir::swap_test;
//! use swapkit_qasm3::emit;
//!
//! let qasm = emit(&swap_test(1).unwrap()).unwrap();
//! assert!(qasm.contains("OPENQASM 3.0;"));
//! assert!(qasm.contains("qubit[1] d;"));
//! assert!(qasm.contains("cswap d[0], a[0], b[0];"));
//! ```
//!
//! Circuits placed as gates with [`swapkit_ir::Circuit::to_gate`] are written
//! as `gate` blocks ahead of the register declarations. Opaque custom gates
//! have no QASM form and are rejected with [`EmitError::UnsupportedGate`].

mod emitter;
mod error;

pub use emitter::{emit, emit_qasm2};
pub use error::{EmitError, EmitResult};
