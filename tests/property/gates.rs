//! Property-based tests for gates, qubits and collapse

use proptest::prelude::*;
use quantumfs::collapse::measure_content;
use quantumfs::evolve::apply_gate;
use quantumfs::{BranchStore, LogicGate, MetadataRecord, Qubit};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn gate_strategy() -> impl Strategy<Value = LogicGate> {
    prop::sample::select(LogicGate::ALL.to_vec())
}

proptest! {
    /// Gate names parse back to the same gate in any case
    #[test]
    fn prop_gate_name_roundtrip(gate in gate_strategy(), upper in any::<bool>()) {
        let name = if upper { gate.as_str().to_uppercase() } else { gate.as_str().to_string() };
        prop_assert_eq!(name.parse::<LogicGate>().unwrap(), gate);
    }

    /// NOT ignores its second input
    #[test]
    fn prop_not_ignores_second_input(a in any::<bool>()) {
        prop_assert_eq!(
            apply_gate(LogicGate::Not, a, true),
            apply_gate(LogicGate::Not, a, false)
        );
    }

    /// Any number of Hadamards keeps the amplitudes normalized
    #[test]
    fn prop_hadamard_preserves_norm(applications in 0usize..64) {
        let mut qubit = Qubit::new();
        for _ in 0..applications {
            qubit.hadamard();
        }
        let norm = qubit.alpha * qubit.alpha + qubit.beta * qubit.beta;
        prop_assert!((norm - 1.0).abs() < 1e-9);
        prop_assert!(!qubit.measured);
    }

    /// Measurement yields 0 or 1 and is stable afterwards
    #[test]
    fn prop_measurement_is_terminal(seed in any::<u64>(), hadamards in 0usize..4) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut qubit = Qubit::new();
        for _ in 0..hadamards {
            qubit.hadamard();
        }
        let first = qubit.measure(&mut rng).unwrap();
        prop_assert!(first == 0 || first == 1);
        prop_assert_eq!(qubit.measure(&mut rng).unwrap(), first);
        prop_assert_eq!(qubit.outcome(), Some(first));
    }

    /// Observed content is always one of the branches, with aligned metadata
    #[test]
    fn prop_measure_content_stays_in_store(
        seed in any::<u64>(),
        branches in prop::collection::vec("[a-z]{1,8}", 1..16),
        metadata_len in 0usize..5,
    ) {
        let mut store = BranchStore::new("s");
        store.branches = branches;
        for i in 0..metadata_len {
            store.metadata.push(MetadataRecord::new(format!("user{}", i), "rw-r--r--", "2025-01-01", i as u64));
        }
        let mut rng = StdRng::seed_from_u64(seed);

        let index = measure_content(&mut store, &mut rng).unwrap();
        prop_assert_eq!(&store.observed_content, &store.branches[index]);
        if metadata_len > 0 {
            prop_assert_eq!(&store.observed_metadata, &store.metadata[index % metadata_len]);
        }
    }
}
