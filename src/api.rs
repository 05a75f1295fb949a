//! Core quantumfs API
//!
//! `QuantumFs` owns the store registry, the entanglement link, the evolver
//! and the collapse generator, and exposes the operation surface used by the
//! CLI. Every store access goes through the store's lock.

use crate::collapse;
use crate::config::{QuantumFsConfig, StorageConfig};
use crate::entangle::EntanglementLink;
use crate::error::ApiError;
use crate::evolve::{EvolutionReport, Evolver, LogicGate};
use crate::qubit::Qubit;
use crate::randomness::RngSource;
use crate::store::{
    load_store, save_store, BranchStore, MetadataRecord, StoreHandle, StoreId, StoreRegistry,
};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Stream id of the collapse generator; evolver streams count up from 0.
const COLLAPSE_STREAM: u64 = u64::MAX;

/// Result of a content measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub index: usize,
    pub content: String,
    /// Metadata aligned with the drawn branch, when the store has any
    pub metadata: Option<MetadataRecord>,
}

/// Per-store result of [`QuantumFs::save_all`] or [`QuantumFs::load_all`].
#[derive(Debug)]
pub struct StoreOutcome {
    pub store: String,
    pub result: Result<PathBuf, ApiError>,
}

impl StoreOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct QuantumFs {
    registry: StoreRegistry,
    link: EntanglementLink,
    evolver: Evolver,
    collapse_rng: Mutex<StdRng>,
    storage: StorageConfig,
}

impl QuantumFs {
    pub fn new(storage: StorageConfig, rng: RngSource) -> Self {
        Self {
            registry: StoreRegistry::new(),
            link: EntanglementLink::new(),
            evolver: Evolver::new(rng),
            collapse_rng: Mutex::new(rng.stream(COLLAPSE_STREAM)),
            storage,
        }
    }

    /// Build from configuration, registering the configured seed stores.
    pub fn from_config(config: &QuantumFsConfig) -> Self {
        let mut fs = Self::new(
            config.storage.clone(),
            RngSource::from_seed(config.randomness.seed),
        );
        for seed in &config.stores {
            fs.add_store(BranchStore::with_seed(&seed.name, &seed.seed_branch));
        }
        fs
    }

    pub fn add_store(&mut self, store: BranchStore) -> StoreId {
        debug!(store = %store.name, "Store registered");
        self.registry.insert(store)
    }

    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn resolve(&self, name: &str) -> Result<StoreId, ApiError> {
        Ok(self.registry.resolve(name)?)
    }

    pub fn store(&self, id: StoreId) -> Result<&StoreHandle, ApiError> {
        Ok(self.registry.get(id)?)
    }

    /// Names of every registered store, in registry order.
    pub fn store_names(&self) -> Vec<String> {
        self.registry
            .ids()
            .filter_map(|id| self.registry.get(id).ok().map(|h| h.name()))
            .collect()
    }

    pub fn evolve(
        &self,
        id: StoreId,
        gate: LogicGate,
        cond1: bool,
        cond2: bool,
    ) -> Result<EvolutionReport, ApiError> {
        let handle = self.store(id)?;
        Ok(self.evolver.evolve(handle, gate, cond1, cond2))
    }

    /// Append a branch; returns the new branch count.
    pub fn edit(&self, id: StoreId, content: &str) -> Result<usize, ApiError> {
        let mut store = self.store(id)?.lock();
        store.edit(content);
        debug!(store = %store.name, branches = store.branches.len(), "Branch added");
        Ok(store.branches.len())
    }

    pub fn delete(&self, id: StoreId) -> Result<(), ApiError> {
        let mut store = self.store(id)?.lock();
        store.delete();
        info!(store = %store.name, "All branches deleted");
        Ok(())
    }

    /// Collapse the store's contents. `None` when the store has no branches.
    pub fn measure_content(&self, id: StoreId) -> Result<Option<Observation>, ApiError> {
        let mut store = self.store(id)?.lock();
        let drawn = {
            let mut rng = self.collapse_rng.lock();
            collapse::measure_content(&mut store, &mut *rng)
        };

        Ok(drawn.map(|index| {
            debug!(store = %store.name, index, "Content measured");
            Observation {
                index,
                content: store.observed_content.clone(),
                metadata: store.metadata_for(index).cloned(),
            }
        }))
    }

    pub fn list(&self, id: StoreId) -> Result<Vec<String>, ApiError> {
        Ok(self.store(id)?.lock().list())
    }

    /// Create a |0> qubit; returns its index.
    pub fn create_qubit(&self, id: StoreId) -> Result<usize, ApiError> {
        let mut store = self.store(id)?.lock();
        let index = store.create_qubit();
        debug!(store = %store.name, index, "Qubit created");
        Ok(index)
    }

    pub fn show_qubits(&self, id: StoreId) -> Result<Vec<Qubit>, ApiError> {
        Ok(self.store(id)?.lock().qubits.clone())
    }

    pub fn apply_hadamard(&self, id: StoreId, index: usize) -> Result<Qubit, ApiError> {
        let mut store = self.store(id)?.lock();
        store.apply_hadamard(index)?;
        Ok(*store.qubit(index)?)
    }

    pub fn measure_qubit(&self, id: StoreId, index: usize) -> Result<i32, ApiError> {
        let mut store = self.store(id)?.lock();
        let mut rng = self.collapse_rng.lock();
        let value = collapse::measure_qubit(&mut store, index, &mut *rng)?;
        debug!(store = %store.name, index, value, "Qubit measured");
        Ok(value)
    }

    pub fn entangle(&mut self, a: StoreId, b: StoreId) -> Result<(), ApiError> {
        self.link.entangle(&self.registry, a, b)?;
        Ok(())
    }

    pub fn disentangle(&mut self) {
        self.link.disentangle();
        info!("Stores disentangled");
    }

    pub fn check_integrity(&self) -> Result<bool, ApiError> {
        Ok(self.link.check_integrity(&self.registry)?)
    }

    pub fn link(&self) -> &EntanglementLink {
        &self.link
    }

    /// Save to `<data_dir>/<name>.bin`.
    pub fn save(&self, id: StoreId) -> Result<PathBuf, ApiError> {
        let path = self.storage.store_path(&self.store(id)?.name());
        self.save_to(id, &path)?;
        Ok(path)
    }

    pub fn save_to(&self, id: StoreId, path: &Path) -> Result<(), ApiError> {
        let store = self.store(id)?.lock();
        save_store(&store, path)?;
        info!(store = %store.name, path = %path.display(), "Store saved");
        Ok(())
    }

    /// Load from `<data_dir>/<name>.bin`. The store is unchanged on failure.
    pub fn load(&self, id: StoreId) -> Result<PathBuf, ApiError> {
        let path = self.storage.store_path(&self.store(id)?.name());
        self.load_from(id, &path)?;
        Ok(path)
    }

    pub fn load_from(&self, id: StoreId, path: &Path) -> Result<(), ApiError> {
        let mut store = self.store(id)?.lock();
        load_store(&mut store, path)?;
        info!(store = %store.name, path = %path.display(), "Store loaded");
        Ok(())
    }

    /// Save every registered store. Each store is attempted regardless of
    /// earlier failures.
    pub fn save_all(&self) -> Vec<StoreOutcome> {
        self.for_each_store("save", |id| self.save(id))
    }

    /// Load every registered store. Each store is attempted regardless of
    /// earlier failures; a failed store keeps its current state.
    pub fn load_all(&self) -> Vec<StoreOutcome> {
        self.for_each_store("load", |id| self.load(id))
    }

    fn for_each_store<F>(&self, action: &'static str, mut op: F) -> Vec<StoreOutcome>
    where
        F: FnMut(StoreId) -> Result<PathBuf, ApiError>,
    {
        self.registry
            .ids()
            .filter_map(|id| self.registry.get(id).ok().map(|h| (id, h.name())))
            .map(|(id, store)| {
                let result = op(id);
                if let Err(ref e) = result {
                    warn!(store = %store, action, error = %e, "Store operation failed");
                }
                StoreOutcome { store, result }
            })
            .collect()
    }
}
