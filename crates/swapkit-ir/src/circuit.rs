//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::error::{IrError, IrResult};
use crate::gate::{CustomGate, Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Qubit, QubitId};
use crate::register::QuantumRegister;

/// A quantum circuit.
///
/// Qubits enter the circuit only through registers; gates are recorded in
/// the order they are applied. The circuit is a description of intended
/// operations and never holds a quantum state.
///
/// Deserialized circuits are rebuilt through [`Circuit::add_register`] and
/// [`Circuit::apply`], so malformed input is rejected with the same errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitData")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Attached registers, in attachment order.
    registers: Vec<QuantumRegister>,
    /// Qubits in the circuit, indexed by `QubitId`.
    qubits: Vec<Qubit>,
    /// Recorded instructions.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registers: vec![],
            qubits: vec![],
            instructions: vec![],
        }
    }

    /// Attach a register and return its attached handle.
    pub fn add_register(&mut self, register: QuantumRegister) -> IrResult<QuantumRegister> {
        if register.is_attached() {
            return Err(IrError::InvalidArgument(format!(
                "register '{}' is already attached to a circuit",
                register.name()
            )));
        }
        if self.register(register.name()).is_some() {
            return Err(IrError::DuplicateRegister(register.name().to_string()));
        }

        let offset = u32::try_from(self.qubits.len())
            .ok()
            .filter(|offset| offset.checked_add(register.size() as u32).is_some())
            .ok_or_else(|| {
                IrError::InvalidArgument(format!(
                    "register '{}' does not fit in the circuit",
                    register.name()
                ))
            })?;
        self.qubits
            .try_reserve(register.size())
            .map_err(|e| {
                IrError::InvalidArgument(format!(
                    "register '{}' cannot be allocated: {e}",
                    register.name()
                ))
            })?;

        let attached = register.attach(offset);
        for (index, id) in attached.iter().enumerate() {
            self.qubits
                .push(Qubit::with_register(id, attached.name(), index as u32));
        }
        trace!(register = %attached, offset, "attached register");

        self.registers.push(attached.clone());
        Ok(attached)
    }

    /// Create a register and attach it in one step.
    pub fn add_qreg<S>(&mut self, name: impl Into<String>, size: S) -> IrResult<QuantumRegister>
    where
        S: TryInto<u32> + fmt::Display + Copy,
    {
        self.add_register(QuantumRegister::new(size, name)?)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CZ,
            control,
            target,
        ))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CSwap, [control, t1, t2]))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate, e.g. one produced by [`Circuit::to_gate`].
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.apply(Instruction::barrier(qubits))
    }

    /// Validate and record an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        trace!(
            op = instruction.name(),
            qubits = ?instruction.qubits,
            "applied instruction"
        );
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let got = instruction.qubits.len() as u32;
            if got != gate.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got,
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if qubit.0 as usize >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Wrap this circuit as a custom gate named after the circuit.
    ///
    /// Operand `i` of the gate maps to qubit `QubitId(i)` of the circuit.
    pub fn to_gate(&self) -> CustomGate {
        CustomGate::new(self.name.clone(), self.width() as u32).with_definition(self.clone())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Total number of wires. Equal to [`Circuit::num_qubits`] as the IR
    /// carries no classical bits.
    pub fn width(&self) -> usize {
        self.num_qubits()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Look up a qubit by id.
    pub fn qubit(&self, id: QubitId) -> Option<&Qubit> {
        self.qubits.get(id.0 as usize)
    }

    /// Attached registers, in attachment order.
    pub fn registers(&self) -> &[QuantumRegister] {
        &self.registers
    }

    /// Find an attached register by name.
    pub fn register(&self, name: &str) -> Option<&QuantumRegister> {
        self.registers.iter().find(|r| r.name() == name)
    }

    /// Recorded instructions, in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of recorded instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Count instructions by name, in order of first appearance.
    pub fn count_ops(&self) -> Vec<(&str, usize)> {
        let mut order: Vec<(&str, usize)> = vec![];
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        for inst in &self.instructions {
            let name = inst.name();
            match index.get(name) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(name, order.len());
                    order.push((name, 1));
                }
            }
        }
        order
    }

    /// Get the circuit depth.
    ///
    /// Barriers align their operands but do not add a layer.
    pub fn depth(&self) -> usize {
        let mut levels: FxHashMap<QubitId, usize> = FxHashMap::default();
        let mut depth = 0;

        for inst in &self.instructions {
            let front = inst
                .qubits
                .iter()
                .map(|q| levels.get(q).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);
            let level = if inst.is_barrier() { front } else { front + 1 };
            for &q in &inst.qubits {
                levels.insert(q, level);
            }
            depth = depth.max(level);
        }

        depth
    }
}

/// Wire form of [`Circuit`], checked on conversion.
#[derive(Deserialize)]
struct CircuitData {
    name: String,
    registers: Vec<QuantumRegister>,
    qubits: Vec<Qubit>,
    instructions: Vec<Instruction>,
}

impl TryFrom<CircuitData> for Circuit {
    type Error = IrError;

    fn try_from(data: CircuitData) -> IrResult<Self> {
        let mut circuit = Circuit::new(data.name);
        for register in data.registers {
            let attached =
                circuit.add_register(QuantumRegister::new(register.size(), register.name())?)?;
            if attached != register {
                return Err(IrError::InvalidArgument(format!(
                    "register '{}' has inconsistent offset",
                    register.name()
                )));
            }
        }
        if data.qubits != circuit.qubits {
            return Err(IrError::InvalidArgument(
                "qubit table does not match registers".to_string(),
            ));
        }
        for instruction in data.instructions {
            circuit.apply(instruction)?;
        }
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::draw::draw(self))
    }
}
