//! Branch Store
//!
//! The superposition container for one logical file: ordered branch
//! contents, a parallel (independently sized) metadata list and a qubit list.
//! Observed fields hold the result of the most recent content measurement.

pub mod branch_metadata;
pub mod persistence;
pub mod registry;

pub use branch_metadata::MetadataRecord;
pub use persistence::{load_store, save_store};
pub use registry::{StoreId, StoreRegistry};

use crate::error::StoreError;
use crate::qubit::Qubit;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchStore {
    pub name: String,
    pub branches: Vec<String>,
    /// Not required to match `branches` in length; see [`BranchStore::metadata_for`].
    pub metadata: Vec<MetadataRecord>,
    pub qubits: Vec<Qubit>,
    pub observed_content: String,
    pub observed_metadata: MetadataRecord,
}

impl BranchStore {
    /// Create an empty store.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a store holding a single seed branch.
    pub fn with_seed(name: impl Into<String>, seed_branch: impl Into<String>) -> Self {
        let mut store = Self::new(name);
        store.branches.push(seed_branch.into());
        store
    }

    /// Append a branch. No metadata is appended alongside it.
    pub fn edit(&mut self, content: impl Into<String>) {
        self.branches.push(content.into());
    }

    /// Append a branch together with its metadata record.
    pub fn append(&mut self, content: impl Into<String>, metadata: MetadataRecord) {
        self.branches.push(content.into());
        self.metadata.push(metadata);
    }

    /// Drop every branch and metadata record. Qubits are kept.
    pub fn delete(&mut self) {
        self.branches.clear();
        self.metadata.clear();
    }

    /// Snapshot of the current branch contents.
    pub fn list(&self) -> Vec<String> {
        self.branches.clone()
    }

    /// Metadata aligned with branch `index`: `metadata[index mod len]`.
    pub fn metadata_for(&self, index: usize) -> Option<&MetadataRecord> {
        if self.metadata.is_empty() {
            None
        } else {
            self.metadata.get(index % self.metadata.len())
        }
    }

    /// Push a fresh |0> qubit and return its index.
    pub fn create_qubit(&mut self) -> usize {
        self.qubits.push(Qubit::new());
        self.qubits.len() - 1
    }

    pub fn qubit(&self, index: usize) -> Result<&Qubit, StoreError> {
        let len = self.qubits.len();
        self.qubits.get(index).ok_or(StoreError::IndexOutOfRange {
            what: "qubit",
            index,
            len,
        })
    }

    pub fn qubit_mut(&mut self, index: usize) -> Result<&mut Qubit, StoreError> {
        let len = self.qubits.len();
        self.qubits.get_mut(index).ok_or(StoreError::IndexOutOfRange {
            what: "qubit",
            index,
            len,
        })
    }

    pub fn apply_hadamard(&mut self, index: usize) -> Result<(), StoreError> {
        self.qubit_mut(index)?.hadamard();
        Ok(())
    }

    /// Swap in the persisted sections of `staged`.
    ///
    /// `name` and the observed fields are not part of the wire format and
    /// are left as they are.
    pub fn restore_from(&mut self, staged: BranchStore) {
        self.branches = staged.branches;
        self.metadata = staged.metadata;
        self.qubits = staged.qubits;
    }
}

/// Shared, lock-guarded handle to a branch store.
///
/// Every read or mutation goes through [`StoreHandle::lock`]; the evolver
/// takes the lock only for each individual append.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    inner: Arc<Mutex<BranchStore>>,
}

impl StoreHandle {
    pub fn new(store: BranchStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, BranchStore> {
        self.inner.lock()
    }

    pub fn name(&self) -> String {
        self.inner.lock().name.clone()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> BranchStore {
        self.inner.lock().clone()
    }
}
