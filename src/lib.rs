//! QuantumFS: Superposed File Storage
//!
//! Named stores hold a set of possible contents (branches) with metadata and
//! a qubit register. Stores grow through gate-driven parallel evolution,
//! collapse on measurement, can be linked for change detection and persist
//! through a bounded binary format.

pub mod api;
pub mod cli;
pub mod codec;
pub mod collapse;
pub mod config;
pub mod entangle;
pub mod error;
pub mod evolve;
pub mod logging;
pub mod qubit;
pub mod randomness;
pub mod store;

pub use api::{Observation, QuantumFs, StoreOutcome};
pub use error::{ApiError, DecodeError, StoreError};
pub use evolve::LogicGate;
pub use qubit::Qubit;
pub use store::{BranchStore, MetadataRecord, StoreHandle, StoreId, StoreRegistry};
