//! Merge rules: defaults and the environment override layer.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("storage.data_dir", ".")?
        .set_default("logging.level", "info")
}

/// Environment layer: `QFS__STORAGE__DATA_DIR`, `QFS__RANDOMNESS__SEED`, ...
pub fn environment() -> Environment {
    Environment::with_prefix("QFS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
