//! Collapse Engine
//!
//! Content-level measurement picks one branch uniformly at random and records
//! it (with its aligned metadata) as the observed state. Qubit-level
//! measurement delegates to [`Qubit::measure`](crate::qubit::Qubit::measure).
//!
//! Neither function locks anything; callers hold the store lock.

use crate::error::StoreError;
use crate::store::BranchStore;
use rand::Rng;

/// Collapse the store's superposition of contents.
///
/// Returns the drawn branch index, or `None` (observed fields untouched)
/// when there are no branches. Observed metadata is only replaced when the
/// store holds metadata.
pub fn measure_content<R: Rng + ?Sized>(store: &mut BranchStore, rng: &mut R) -> Option<usize> {
    if store.branches.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..store.branches.len());
    store.observed_content = store.branches[index].clone();
    if let Some(meta) = store.metadata_for(index).cloned() {
        store.observed_metadata = meta;
    }
    Some(index)
}

/// Measure qubit `index`. Errors leave the store unchanged.
pub fn measure_qubit<R: Rng + ?Sized>(
    store: &mut BranchStore,
    index: usize,
    rng: &mut R,
) -> Result<i32, StoreError> {
    store.qubit_mut(index)?.measure(rng)
}
