//! Integration tests for layered configuration

use quantumfs::config::ConfigLoader;
use quantumfs::QuantumFs;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variables override workspace files
#[test]
fn test_environment_overrides_workspace_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[storage]\ndata_dir = \"from-file\"\n\n[randomness]\nseed = 1\n",
    )
    .unwrap();

    std::env::set_var("QFS__RANDOMNESS__SEED", "77");
    let result = ConfigLoader::load(temp_dir.path());
    std::env::remove_var("QFS__RANDOMNESS__SEED");

    let config = result.unwrap();
    assert_eq!(config.storage.data_dir, PathBuf::from("from-file"));
    assert_eq!(config.randomness.seed, Some(77));
}

/// Custom store lists replace the default pair
#[test]
fn test_custom_stores_from_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("qfs.toml");
    fs::write(
        &path,
        r#"
[[stores]]
name = "left"
seed_branch = "L"

[[stores]]
name = "right"
seed_branch = "R"

[[stores]]
name = "middle"
seed_branch = "M"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    let fs = QuantumFs::from_config(&config);
    assert_eq!(
        fs.store_names(),
        vec!["left".to_string(), "right".to_string(), "middle".to_string()]
    );
    let middle = fs.resolve("middle").unwrap();
    assert_eq!(fs.list(middle).unwrap(), vec!["M".to_string()]);
}

/// Path separators in store names are rejected
#[test]
fn test_store_name_with_separator_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("qfs.toml");
    fs::write(&path, "[[stores]]\nname = \"a/b\"\nseed_branch = \"x\"\n").unwrap();

    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("path separators"));
}
