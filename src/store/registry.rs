//! Store registry: owns every branch store and hands out stable ids.
//!
//! Stores are never removed, so a `StoreId` stays valid for the lifetime of
//! the registry that issued it.

use crate::error::StoreError;
use crate::store::{BranchStore, StoreHandle};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(usize);

impl StoreId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: Vec<StoreHandle>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self { stores: Vec::new() }
    }

    pub fn insert(&mut self, store: BranchStore) -> StoreId {
        self.stores.push(StoreHandle::new(store));
        StoreId(self.stores.len() - 1)
    }

    pub fn get(&self, id: StoreId) -> Result<&StoreHandle, StoreError> {
        self.stores
            .get(id.0)
            .ok_or_else(|| StoreError::UnknownStore(id.to_string()))
    }

    /// Find a store by name (first match).
    pub fn find(&self, name: &str) -> Option<StoreId> {
        self.stores
            .iter()
            .position(|handle| handle.lock().name == name)
            .map(StoreId)
    }

    /// Resolve a name, failing with `UnknownStore`.
    pub fn resolve(&self, name: &str) -> Result<StoreId, StoreError> {
        self.find(name)
            .ok_or_else(|| StoreError::UnknownStore(name.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = StoreId> + '_ {
        (0..self.stores.len()).map(StoreId)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
