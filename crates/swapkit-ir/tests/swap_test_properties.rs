//! Property-based tests for the swap-test builder.

use proptest::prelude::*;
use swapkit_ir::{IrError, StandardGate, swap_test};

proptest! {
    /// Registers a, b, d hold N, N and 1 qubits: 2N + 1 in total.
    #[test]
    fn test_register_layout(n in 0_u32..=64) {
        let circuit = swap_test(n).expect("swap test should build");

        prop_assert_eq!(circuit.num_qubits(), 2 * n as usize + 1);

        let layout: Vec<_> = circuit
            .registers()
            .iter()
            .map(|r| (r.name().to_string(), r.size()))
            .collect();
        prop_assert_eq!(
            layout,
            vec![
                ("a".to_string(), n as usize),
                ("b".to_string(), n as usize),
                ("d".to_string(), 1),
            ]
        );
    }

    /// H, N controlled swaps, H, in that order.
    #[test]
    fn test_gate_sequence(n in 0_u32..=64) {
        let circuit = swap_test(n).expect("swap test should build");
        let ops = circuit.instructions();

        prop_assert_eq!(ops.len(), n as usize + 2);
        prop_assert!(ops[0].is_standard(StandardGate::H));
        prop_assert!(ops[ops.len() - 1].is_standard(StandardGate::H));
        for op in &ops[1..ops.len() - 1] {
            prop_assert!(op.is_standard(StandardGate::CSwap));
        }
    }

    /// CSWAP i is controlled by the ancilla and swaps a[i] with b[i].
    #[test]
    fn test_cswap_index_alignment(n in 0_u32..=64) {
        let circuit = swap_test(n).expect("swap test should build");
        let a = circuit.register("a").unwrap();
        let b = circuit.register("b").unwrap();
        let ancilla = circuit.register("d").unwrap().qubit(0).unwrap();

        prop_assert_eq!(&circuit.instructions()[0].qubits, &vec![ancilla]);
        for (i, op) in circuit.instructions()[1..=n as usize].iter().enumerate() {
            prop_assert_eq!(
                &op.qubits,
                &vec![ancilla, a.qubit(i).unwrap(), b.qubit(i).unwrap()]
            );
        }
    }

    /// The ancilla is on every gate, so nothing runs in parallel.
    #[test]
    fn test_depth_is_op_count(n in 0_u32..=64) {
        let circuit = swap_test(n).expect("swap test should build");
        prop_assert_eq!(circuit.depth(), n as usize + 2);
    }

    /// Two calls give equal circuits that do not share state.
    #[test]
    fn test_calls_are_independent(n in 0_u32..=16) {
        let first = swap_test(n).expect("swap test should build");
        let mut second = swap_test(n).expect("swap test should build");
        prop_assert_eq!(&first, &second);

        let ancilla = second.register("d").unwrap().qubit(0).unwrap();
        second.x(ancilla).unwrap();
        prop_assert_eq!(first.num_ops(), n as usize + 2);
        prop_assert_eq!(second.num_ops(), n as usize + 3);
    }

    /// Negative sizes fail with InvalidArgument.
    #[test]
    fn test_negative_rejected(n in i64::MIN..0) {
        let err = swap_test(n).unwrap_err();
        prop_assert!(matches!(err, IrError::InvalidArgument(_)));
    }
}
