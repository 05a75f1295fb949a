//! Entanglement Monitor
//!
//! Links two stores of a registry and detects branch changes on either side
//! through a fingerprint taken when the link is made.
//!
//! The fingerprint is an order-independent XOR fold of the BLAKE3 hash of
//! every branch. It is a best-effort check: branch sets that differ only by
//! pairs of identical branches fold to the same value.

use crate::error::StoreError;
use crate::store::{BranchStore, StoreId, StoreRegistry};
use blake3::Hasher;
use tracing::{info, warn};

/// Fingerprint of a store's branch contents, hex encoded.
pub fn fingerprint(store: &BranchStore) -> String {
    let mut folded = [0u8; 32];
    for branch in &store.branches {
        let mut hasher = Hasher::new();
        hasher.update(branch.as_bytes());
        for (acc, byte) in folded.iter_mut().zip(hasher.finalize().as_bytes()) {
            *acc ^= byte;
        }
    }
    hex::encode(folded)
}

/// Link between two stores of a [`StoreRegistry`].
///
/// Holds store ids, not references; the registry that issued them must be
/// passed back for every check. Disentangling only deactivates the link.
#[derive(Debug, Clone, Default)]
pub struct EntanglementLink {
    pair: Option<(StoreId, StoreId)>,
    active: bool,
    fingerprint: String,
}

impl EntanglementLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `a` and `b`, recording `fingerprint(a) ++ fingerprint(b)`.
    pub fn entangle(
        &mut self,
        registry: &StoreRegistry,
        a: StoreId,
        b: StoreId,
    ) -> Result<(), StoreError> {
        let fingerprint = Self::combined_fingerprint(registry, a, b)?;
        self.pair = Some((a, b));
        self.active = true;
        self.fingerprint = fingerprint;
        info!(store_a = %a, store_b = %b, "Stores entangled");
        Ok(())
    }

    /// Deactivate the link. The pair and fingerprint are kept.
    pub fn disentangle(&mut self) {
        self.active = false;
    }

    /// Compare a fresh fingerprint with the recorded one.
    ///
    /// Inactive links always report `true`.
    pub fn check_integrity(&self, registry: &StoreRegistry) -> Result<bool, StoreError> {
        let (a, b) = match (self.active, self.pair) {
            (true, Some(pair)) => pair,
            _ => return Ok(true),
        };

        let intact = Self::combined_fingerprint(registry, a, b)? == self.fingerprint;
        if !intact {
            warn!(store_a = %a, store_b = %b, "Entanglement integrity broken");
        }
        Ok(intact)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pair(&self) -> Option<(StoreId, StoreId)> {
        self.pair
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    // Locks are taken one at a time so `a == b` cannot deadlock.
    fn combined_fingerprint(
        registry: &StoreRegistry,
        a: StoreId,
        b: StoreId,
    ) -> Result<String, StoreError> {
        let left = fingerprint(&registry.get(a)?.lock());
        let right = fingerprint(&registry.get(b)?.lock());
        Ok(left + &right)
    }
}
