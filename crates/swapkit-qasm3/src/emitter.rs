//! QASM emitter for serializing circuits.

use rustc_hash::FxHashSet;
use swapkit_ir::{Circuit, CustomGate, GateKind, Instruction, InstructionKind, IrError, QubitId};

use crate::error::{EmitError, EmitResult};

/// Emit a circuit as QASM3 source code.
pub fn emit(circuit: &Circuit) -> EmitResult<String> {
    Emitter::new(Dialect::Qasm3).emit_circuit(circuit)
}

/// Emit a circuit as QASM 2.0 source code.
///
/// Register declarations use the QASM2 style (`qreg a[n];`) and the
/// standard library include is `qelib1.inc`.
pub fn emit_qasm2(circuit: &Circuit) -> EmitResult<String> {
    Emitter::new(Dialect::Qasm2).emit_circuit(circuit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Qasm2,
    Qasm3,
}

struct Emitter {
    dialect: Dialect,
    output: String,
    /// Gate definitions already written, with the identifier each was given.
    defined: Vec<(CustomGate, String)>,
    /// Identifiers in use by registers or earlier definitions.
    taken: FxHashSet<String>,
}

impl Emitter {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            output: String::new(),
            defined: vec![],
            taken: FxHashSet::default(),
        }
    }

    fn emit_circuit(mut self, circuit: &Circuit) -> EmitResult<String> {
        match self.dialect {
            Dialect::Qasm3 => {
                self.writeln("OPENQASM 3.0;");
                self.writeln("include \"stdgates.inc\";");
            }
            Dialect::Qasm2 => {
                self.writeln("OPENQASM 2.0;");
                self.writeln("include \"qelib1.inc\";");
            }
        }
        self.writeln("");

        self.taken
            .extend(circuit.registers().iter().map(|r| r.name().to_string()));

        // Composite gates must be declared before use
        let before = self.output.len();
        self.emit_definitions(circuit)?;
        if self.output.len() > before {
            self.writeln("");
        }

        let registers: Vec<_> = circuit.registers().iter().filter(|r| !r.is_empty()).collect();
        for reg in &registers {
            let decl = match self.dialect {
                Dialect::Qasm3 => format!("qubit[{}] {};", reg.size(), reg.name()),
                Dialect::Qasm2 => format!("qreg {}[{}];", reg.name(), reg.size()),
            };
            self.writeln(&decl);
        }
        if !registers.is_empty() {
            self.writeln("");
        }

        for instruction in circuit.instructions() {
            let operands = instruction
                .qubits
                .iter()
                .map(|&q| {
                    circuit
                        .qubit(q)
                        .map(ToString::to_string)
                        .ok_or_else(|| IrError::QubitNotFound {
                            qubit: q,
                            gate_name: Some(instruction.name().to_string()),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let line = self.statement(instruction, &operands)?;
            self.writeln(&line);
        }

        Ok(self.output)
    }

    /// Write `gate` blocks for every custom gate reachable from `circuit`,
    /// dependencies first.
    fn emit_definitions(&mut self, circuit: &Circuit) -> EmitResult<()> {
        for instruction in circuit.instructions() {
            if let Some(GateKind::Custom(custom)) = instruction.as_gate().map(|g| &g.kind) {
                self.emit_definition(custom)?;
            }
        }
        Ok(())
    }

    fn emit_definition(&mut self, gate: &CustomGate) -> EmitResult<()> {
        if self.identifier(gate).is_some() {
            return Ok(());
        }

        let body = match &gate.definition {
            Some(body) if gate.num_qubits > 0 => body,
            _ => return Err(EmitError::UnsupportedGate(gate.name.clone())),
        };
        self.emit_definitions(body)?;

        let ident = self.fresh_identifier(&gate.name);
        let formals: Vec<String> = (0..gate.num_qubits).map(formal).collect();
        self.writeln(&format!("gate {ident} {} {{", formals.join(", ")));
        for instruction in body.instructions() {
            let operands: Vec<String> = instruction.qubits.iter().map(|q| formal(q.0)).collect();
            let line = self.statement(instruction, &operands)?;
            self.writeln(&format!("  {line}"));
        }
        self.writeln("}");

        self.defined.push((gate.clone(), ident));
        Ok(())
    }

    /// Identifier already assigned to an identical definition.
    fn identifier(&self, gate: &CustomGate) -> Option<&str> {
        self.defined
            .iter()
            .find(|(defined, _)| defined == gate)
            .map(|(_, ident)| ident.as_str())
    }

    /// Reserve an unused identifier derived from `name`.
    fn fresh_identifier(&mut self, name: &str) -> String {
        let base = gate_identifier(name);
        let mut ident = base.clone();
        let mut suffix = 0;
        while is_formal(&ident) || self.taken.contains(&ident) {
            suffix += 1;
            ident = format!("{base}_{suffix}");
        }
        self.taken.insert(ident.clone());
        ident
    }

    fn statement(&self, instruction: &Instruction, operands: &[String]) -> EmitResult<String> {
        let operands = operands.join(", ");
        let line = match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = match &gate.kind {
                    GateKind::Standard(std) => std.name(),
                    GateKind::Custom(custom) => self
                        .identifier(custom)
                        .ok_or_else(|| EmitError::UnsupportedGate(custom.name.clone()))?,
                };
                format!("{name} {operands};")
            }
            InstructionKind::Barrier if operands.is_empty() => "barrier;".to_string(),
            InstructionKind::Barrier => format!("barrier {operands};"),
        };
        Ok(line)
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn formal(index: u32) -> String {
    QubitId(index).to_string()
}

/// Whether `ident` has the shape of a gate formal (`q0`, `q1`, ...).
fn is_formal(ident: &str) -> bool {
    ident
        .strip_prefix('q')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

const RESERVED: &[&str] = &[
    "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "cx", "cz", "swap", "ccx", "cswap", "gate",
    "qubit", "qreg", "barrier", "measure", "reset",
];

/// Turn a free-form circuit name into a QASM identifier.
///
/// `" SWAP \nTest"` becomes `swap_test`.
pub(crate) fn gate_identifier(name: &str) -> String {
    let mut ident = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            ident.push(c.to_ascii_lowercase());
        } else if !ident.is_empty() && !ident.ends_with('_') {
            ident.push('_');
        }
    }
    while ident.ends_with('_') {
        ident.pop();
    }

    let starts_ok = ident.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    if !starts_ok || RESERVED.contains(&ident.as_str()) {
        ident.insert_str(0, "g_");
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapkit_ir::swap_test;

    #[test]
    fn test_gate_identifier() {
        assert_eq!(gate_identifier(" SWAP \nTest"), "swap_test");
        assert_eq!(gate_identifier("oracle"), "oracle");
        assert_eq!(gate_identifier("2q block"), "g_2q_block");
        assert_eq!(gate_identifier("h"), "g_h");
        assert_eq!(gate_identifier("***"), "g_");
    }

    #[test]
    fn test_emit_swap_test() {
        let circuit = swap_test(2).unwrap();
        let qasm = emit(&circuit).unwrap();

        assert_eq!(
            qasm,
            "OPENQASM 3.0;\n\
             include \"stdgates.inc\";\n\
             \n\
             qubit[2] a;\n\
             qubit[2] b;\n\
             qubit[1] d;\n\
             \n\
             h d[0];\n\
             cswap d[0], a[0], b[0];\n\
             cswap d[0], a[1], b[1];\n\
             h d[0];\n"
        );
    }

    #[test]
    fn test_emit_qasm2_swap_test() {
        let circuit = swap_test(1).unwrap();
        let qasm = emit_qasm2(&circuit).unwrap();

        assert!(qasm.starts_with("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n"));
        assert!(qasm.contains("qreg a[1];\nqreg b[1];\nqreg d[1];\n"));
        assert!(qasm.contains("cswap d[0], a[0], b[0];"));
    }

    #[test]
    fn test_emit_skips_empty_registers() {
        let circuit = swap_test(0).unwrap();
        let qasm = emit(&circuit).unwrap();

        assert!(!qasm.contains("qubit[0]"));
        assert!(qasm.contains("qubit[1] d;"));
        assert!(!qasm.contains("cswap"));
        assert_eq!(qasm.matches("h d[0];").count(), 2);
    }

    #[test]
    fn test_emit_barrier() {
        let mut circuit = Circuit::new("b");
        circuit.add_qreg("q", 2).unwrap();
        circuit.barrier_all().unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("barrier q[0], q[1];"));
    }

    #[test]
    fn test_emit_composite_gate() {
        let inner = swap_test(1).unwrap();

        let mut outer = Circuit::new("outer");
        let r = outer.add_qreg("r", 3).unwrap();
        outer.gate(inner.to_gate(), r.iter()).unwrap();
        outer.gate(inner.to_gate(), r.iter()).unwrap();

        let qasm = emit(&outer).unwrap();
        assert!(qasm.contains(
            "gate swap_test q0, q1, q2 {\n  h q2;\n  cswap q2, q0, q1;\n  h q2;\n}\n"
        ));
        assert_eq!(qasm.matches("gate swap_test").count(), 1);
        assert_eq!(qasm.matches("swap_test r[0], r[1], r[2];").count(), 2);
    }

    #[test]
    fn test_emit_opaque_gate_fails() {
        let mut circuit = Circuit::new("c");
        let q = circuit.add_qreg("q", 1).unwrap();
        circuit
            .gate(CustomGate::new("mystery", 1), [q.get(0).unwrap()])
            .unwrap();

        let err = emit(&circuit).unwrap_err();
        assert!(matches!(err, EmitError::UnsupportedGate(name) if name == "mystery"));
    }

    #[test]
    fn test_emit_same_name_different_definitions() {
        let small = swap_test(1).unwrap().to_gate();
        let large = swap_test(2).unwrap().to_gate();

        let mut outer = Circuit::new("outer");
        let r = outer.add_qreg("r", 5).unwrap();
        outer.gate(small.clone(), r.iter().take(3)).unwrap();
        outer.gate(large, r.iter()).unwrap();
        outer.gate(small, r.iter().take(3)).unwrap();

        let qasm = emit(&outer).unwrap();
        assert!(qasm.contains("gate swap_test q0, q1, q2 {\n"));
        assert!(qasm.contains("gate swap_test_1 q0, q1, q2, q3, q4 {\n"));
        assert!(qasm.contains(
            "swap_test r[0], r[1], r[2];\n\
             swap_test_1 r[0], r[1], r[2], r[3], r[4];\n\
             swap_test r[0], r[1], r[2];\n"
        ));
    }

    #[test]
    fn test_emit_gate_name_avoids_register_name() {
        let mut inner = Circuit::new("r");
        let q = inner.add_qreg("q", 1).unwrap();
        inner.x(q.get(0).unwrap()).unwrap();

        let mut outer = Circuit::new("outer");
        let r = outer.add_qreg("r", 1).unwrap();
        outer.gate(inner.to_gate(), r.iter()).unwrap();

        let qasm = emit_qasm2(&outer).unwrap();
        assert!(qasm.contains("gate r_1 q0 {\n  x q0;\n}\n"));
        assert!(qasm.contains("qreg r[1];"));
        assert!(qasm.contains("r_1 r[0];"));
    }

    #[test]
    fn test_emit_gate_name_avoids_formals() {
        let mut inner = Circuit::new("q1");
        let q = inner.add_qreg("q", 1).unwrap();
        inner.z(q.get(0).unwrap()).unwrap();

        let mut outer = Circuit::new("outer");
        let a = outer.add_qreg("a", 1).unwrap();
        outer.gate(inner.to_gate(), a.iter()).unwrap();

        let qasm = emit(&outer).unwrap();
        assert!(qasm.contains("gate q1_1 q0 {"));
        assert!(qasm.contains("q1_1 a[0];"));
    }
}
