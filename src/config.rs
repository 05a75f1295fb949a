//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, workspace
//! config files, then `QFS__SECTION__KEY` environment variables.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantumFsConfig {
    /// Where store files live
    #[serde(default)]
    pub storage: StorageConfig,

    /// Random number generation
    #[serde(default)]
    pub randomness: RandomnessConfig,

    /// Stores created at startup, in registry order
    #[serde(default = "default_stores")]
    pub stores: Vec<StoreSeed>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `<store name>.bin` files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Path of the persisted file for `store_name`.
    pub fn store_path(&self, store_name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.bin", store_name))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomnessConfig {
    /// Fixed seed for reproducible runs; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// A store created at startup with one seed branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSeed {
    pub name: String,
    pub seed_branch: String,
}

impl StoreSeed {
    pub fn new(name: impl Into<String>, seed_branch: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seed_branch: seed_branch.into(),
        }
    }
}

fn default_stores() -> Vec<StoreSeed> {
    vec![StoreSeed::new("fileA", "initA"), StoreSeed::new("fileB", "initB")]
}

impl Default for QuantumFsConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            randomness: RandomnessConfig::default(),
            stores: default_stores(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Storage(String),
    Store(String, String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Store(name, msg) => write!(f, "Store '{}': {}", name, msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl QuantumFsConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.storage.data_dir.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Data directory cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for store in &self.stores {
            if store.name.trim().is_empty() {
                errors.push(ValidationError::Store(
                    store.name.clone(),
                    "Store name cannot be empty".to_string(),
                ));
            } else if store.name.contains(|c: char| c == '/' || c == '\\') {
                errors.push(ValidationError::Store(
                    store.name.clone(),
                    "Store name cannot contain path separators".to_string(),
                ));
            }
            if !seen.insert(store.name.as_str()) {
                errors.push(ValidationError::Store(
                    store.name.clone(),
                    "Duplicate store name".to_string(),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
