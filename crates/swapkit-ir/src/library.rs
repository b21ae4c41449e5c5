//! Pre-built circuits.

use std::fmt;

use tracing::{debug, instrument};

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::register::QuantumRegister;

/// Display name of [`swap_test`] circuits. Drawn on two lines when the
/// circuit is used as a composite gate.
pub const SWAP_TEST_NAME: &str = " SWAP \nTest";

/// Build a swap test over two `num_qubits`-qubit registers.
///
/// Registers are attached as `a`, `b` and the single-qubit ancilla `d`.
/// The gate sequence is `H(d)`, then `CSWAP(d, a[i], b[i])` for every `i`
/// in ascending order, then `H(d)`. With `num_qubits == 0` only the two
/// Hadamards remain.
///
/// A negative or oversized `num_qubits` fails with
/// [`IrError::InvalidArgument`](crate::IrError::InvalidArgument) before any
/// gate is recorded.
///
/// ```rust
/// use swapkit_ir::swap_test;
///
/// let circuit = swap_test(2).unwrap();
/// assert_eq!(circuit.num_qubits(), 5);
/// assert_eq!(circuit.count_ops(), vec![("h", 2), ("cswap", 2)]);
/// assert!(swap_test(-1).is_err());
/// ```
#[instrument(level = "debug")]
pub fn swap_test<N>(num_qubits: N) -> IrResult<Circuit>
where
    N: TryInto<u32> + fmt::Display + fmt::Debug + Copy,
{
    let a = QuantumRegister::new(num_qubits, "a")?;
    let b = QuantumRegister::new(num_qubits, "b")?;
    let d = QuantumRegister::new(1, "d")?;
    if u32::try_from(a.size())
        .ok()
        .and_then(|n| n.checked_mul(2))
        .and_then(|n| n.checked_add(1))
        .is_none()
    {
        return Err(IrError::InvalidArgument(format!(
            "swap test on {num_qubits} qubits per register exceeds the qubit limit"
        )));
    }

    let mut circuit = Circuit::new(SWAP_TEST_NAME);
    let a = circuit.add_register(a)?;
    let b = circuit.add_register(b)?;
    let d = circuit.add_register(d)?;
    let ancilla = d.qubit(0)?;

    circuit.h(ancilla)?;
    for (ai, bi) in a.iter().zip(b.iter()) {
        circuit.cswap(ancilla, ai, bi)?;
    }
    circuit.h(ancilla)?;

    debug!(
        qubits = circuit.num_qubits(),
        ops = circuit.num_ops(),
        "built swap test"
    );
    Ok(circuit)
}
