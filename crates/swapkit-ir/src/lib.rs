//! swapkit Circuit Intermediate Representation
//!
//! This crate provides the data structures for describing quantum circuits in
//! swapkit, plus the circuit library that builds the swap test.
//!
//! # Core Components
//!
//! - **Registers**: [`QuantumRegister`] for named groups of qubits, attached to
//!   a circuit with [`Circuit::add_register`]
//! - **Qubits**: [`QubitId`] and [`Qubit`] for addressing wires
//! - **Gates**: [`StandardGate`] for built-in gates and [`CustomGate`] for
//!   composite gates built with [`Circuit::to_gate`]
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder API with validation on every append
//! - **Library**: [`swap_test`]
//!
//! # Example: The Swap Test
//!
//! ```rust
//! use swapkit_ir::{swap_test, StandardGate};
//!
//! let circuit = swap_test(3).unwrap();
//!
//! // Registers a[3], b[3] and the ancilla d[1]
//! assert_eq!(circuit.num_qubits(), 7);
//!
//! // H, three controlled swaps, H
//! let ops = circuit.instructions();
//! assert_eq!(ops.len(), 5);
//! assert!(ops[0].is_standard(StandardGate::H));
//! assert!(ops[1].is_standard(StandardGate::CSwap));
//! assert!(ops[4].is_standard(StandardGate::H));
//! ```
//!
//! # Example: Building by Hand
//!
//! ```rust
//! use swapkit_ir::{Circuit, QuantumRegister};
//!
//! let mut circuit = Circuit::new("pair");
//! let q = circuit.add_register(QuantumRegister::new(2, "q").unwrap()).unwrap();
//!
//! circuit.h(q.qubit(0).unwrap()).unwrap();
//! circuit.cx(q.qubit(0).unwrap(), q.qubit(1).unwrap()).unwrap();
//!
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `CX`, `CZ` | 2 | Controlled-X and Controlled-Z |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX` | 3 | Toffoli (CCNOT) gate |
//! | `CSwap` | 3 | Fredkin (controlled-SWAP) gate |

pub mod circuit;
pub mod draw;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod library;
pub mod qubit;
pub mod register;

pub use circuit::Circuit;
pub use draw::draw;
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use library::{SWAP_TEST_NAME, swap_test};
pub use qubit::{Qubit, QubitId};
pub use register::QuantumRegister;
