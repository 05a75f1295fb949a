//! Integration tests for parallel evolution

use quantumfs::evolve::{Evolver, EVOLUTION_FAN_OUT};
use quantumfs::randomness::RngSource;
use quantumfs::{BranchStore, LogicGate, StoreHandle};
use std::sync::Arc;

fn sorted_branches(handle: &StoreHandle) -> Vec<String> {
    let mut branches = handle.lock().list();
    branches.sort();
    branches
}

/// Every accepted round appends exactly one branch and one record per task
#[test]
fn test_rounds_keep_branches_and_metadata_aligned() {
    let handle = StoreHandle::new(BranchStore::with_seed("fileA", "initA"));
    let evolver = Evolver::new(RngSource::from_seed(Some(5)));

    for _ in 0..4 {
        let report = evolver.evolve(&handle, LogicGate::Or, false, true);
        assert!(report.passed);
        assert_eq!(report.appended, EVOLUTION_FAN_OUT as usize);
    }

    let store = handle.snapshot();
    assert_eq!(store.branches.len(), 1 + 4 * EVOLUTION_FAN_OUT as usize);
    assert_eq!(store.metadata.len(), 4 * EVOLUTION_FAN_OUT as usize);
    for branch in &store.branches[1..] {
        assert!(branch.starts_with("Branch_"), "unexpected branch {}", branch);
    }
    for meta in &store.metadata {
        assert!(meta.owner.starts_with("user"));
        assert_eq!(meta.permissions, "rw-r--r--");
        assert!(meta.size < 1000);
    }
}

/// A rejected gate leaves the store untouched
#[test]
fn test_rejected_gate_is_a_no_op() {
    let handle = StoreHandle::new(BranchStore::with_seed("fileB", "initB"));
    let evolver = Evolver::new(RngSource::from_seed(Some(5)));

    let report = evolver.evolve(&handle, LogicGate::And, true, false);
    assert!(!report.passed);
    assert_eq!(report.appended, 0);
    assert_eq!(handle.lock().list(), vec!["initB".to_string()]);
    assert!(handle.lock().metadata.is_empty());
}

/// Same seed, same branch multiset, whatever order the tasks finished in
#[test]
fn test_seeded_evolution_is_reproducible() {
    let run = || {
        let handle = StoreHandle::new(BranchStore::with_seed("fileA", "initA"));
        let evolver = Evolver::new(RngSource::from_seed(Some(1234)));
        evolver.evolve(&handle, LogicGate::And, true, true);
        evolver.evolve(&handle, LogicGate::Not, false, false);
        sorted_branches(&handle)
    };

    assert_eq!(run(), run());
}

/// Evolutions racing on one store from several threads lose no appends
#[test]
fn test_concurrent_evolutions_on_shared_store() {
    let handle = StoreHandle::new(BranchStore::with_seed("fileA", "initA"));
    let evolver = Arc::new(Evolver::new(RngSource::from_seed(Some(9))));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let handle = handle.clone();
            let evolver = Arc::clone(&evolver);
            scope.spawn(move || {
                evolver.evolve(&handle, LogicGate::And, true, true);
            });
        }
    });

    let store = handle.snapshot();
    assert_eq!(store.branches.len(), 1 + 4 * EVOLUTION_FAN_OUT as usize);
    assert_eq!(store.metadata.len(), 4 * EVOLUTION_FAN_OUT as usize);
}
