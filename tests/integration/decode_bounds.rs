//! Integration tests for decoding untrusted store files

use quantumfs::codec::{
    decode, encode, MAX_BRANCHES, MAX_BRANCH_LEN, MAX_METADATA, MAX_METADATA_FIELD_LEN, MAX_QUBITS,
};
use quantumfs::store::load_store;
use quantumfs::{BranchStore, DecodeError, MetadataRecord, Qubit, StoreError};
use std::fs;
use tempfile::TempDir;

fn u64_bytes(v: u64) -> [u8; 8] {
    v.to_ne_bytes()
}

/// A branch count of 20000 is rejected before any branch is read
#[test]
fn test_oversized_branch_count() {
    let bytes = u64_bytes(20_000).to_vec();
    assert_eq!(
        decode(&bytes),
        Err(DecodeError::OversizedCount {
            field: "branch",
            count: 20_000,
            limit: MAX_BRANCHES,
        })
    );
}

/// Metadata and qubit counts one past their limit are rejected
#[test]
fn test_oversized_metadata_and_qubit_counts() {
    let mut metadata = u64_bytes(0).to_vec();
    metadata.extend_from_slice(&u64_bytes(MAX_METADATA + 1));
    assert_eq!(
        decode(&metadata),
        Err(DecodeError::OversizedCount {
            field: "metadata",
            count: MAX_METADATA + 1,
            limit: MAX_METADATA,
        })
    );

    let mut qubits = u64_bytes(0).to_vec();
    qubits.extend_from_slice(&u64_bytes(0));
    qubits.extend_from_slice(&u64_bytes(MAX_QUBITS + 1));
    assert_eq!(
        decode(&qubits),
        Err(DecodeError::OversizedCount {
            field: "qubit",
            count: MAX_QUBITS + 1,
            limit: MAX_QUBITS,
        })
    );
}

/// Counts exactly at every limit are accepted
#[test]
fn test_counts_at_limit_accepted() {
    let mut store = BranchStore::new("full");
    for i in 0..MAX_BRANCHES {
        store.append(
            format!("b{}", i),
            MetadataRecord::new("u", "rw-r--r--", "2025-01-01", i),
        );
    }
    for _ in 0..MAX_QUBITS {
        store.create_qubit();
    }
    assert_eq!(store.metadata.len() as u64, MAX_METADATA);

    let decoded = decode(&encode(&store)).unwrap();
    assert_eq!(decoded.branches.len() as u64, MAX_BRANCHES);
    assert_eq!(decoded.metadata.len() as u64, MAX_METADATA);
    assert_eq!(decoded.qubits.len() as u64, MAX_QUBITS);
    assert_eq!(decoded.qubits[0], Qubit::new());
}

/// Lengths exactly at the branch and metadata field limits are accepted,
/// one byte more is rejected
#[test]
fn test_lengths_at_limit() {
    let field = "f".repeat(MAX_METADATA_FIELD_LEN as usize);
    let mut store = BranchStore::with_seed("wide", "x".repeat(MAX_BRANCH_LEN as usize));
    store.metadata.push(MetadataRecord::new(
        field.clone(),
        field.clone(),
        field.clone(),
        7,
    ));

    let decoded = decode(&encode(&store)).unwrap();
    assert_eq!(decoded.branches[0].len() as u64, MAX_BRANCH_LEN);
    assert_eq!(decoded.metadata[0].timestamp, field);

    let mut long_branch = BranchStore::with_seed("wide", "x".repeat(MAX_BRANCH_LEN as usize + 1));
    assert!(matches!(
        decode(&encode(&long_branch)),
        Err(DecodeError::OversizedLength { field: "branch", .. })
    ));

    long_branch.branches.clear();
    long_branch.metadata.push(MetadataRecord::new(
        "u",
        "p".repeat(MAX_METADATA_FIELD_LEN as usize + 1),
        "t",
        0,
    ));
    assert!(matches!(
        decode(&encode(&long_branch)),
        Err(DecodeError::OversizedLength {
            field: "permissions",
            ..
        })
    ));
}

/// A huge length prefix is rejected without allocating for it
#[test]
fn test_oversized_branch_length() {
    let mut bytes = u64_bytes(1).to_vec();
    bytes.extend_from_slice(&u64_bytes(u64::MAX));
    assert_eq!(
        decode(&bytes),
        Err(DecodeError::OversizedLength {
            field: "branch",
            length: u64::MAX,
            limit: MAX_BRANCH_LEN,
        })
    );
}

/// Metadata fields have their own, tighter bound
#[test]
fn test_oversized_metadata_field() {
    let mut bytes = u64_bytes(0).to_vec();
    bytes.extend_from_slice(&u64_bytes(1));
    bytes.extend_from_slice(&u64_bytes(MAX_METADATA_FIELD_LEN + 1));
    assert!(matches!(
        decode(&bytes),
        Err(DecodeError::OversizedLength { field: "owner", .. })
    ));
}

/// Every strict prefix of a valid encoding fails
#[test]
fn test_every_prefix_is_truncated() {
    let mut store = BranchStore::with_seed("s", "hello");
    store.append("world", MetadataRecord::new("u", "rw", "2025-01-01", 4));
    store.create_qubit();
    let bytes = encode(&store);

    for cut in 0..bytes.len() {
        assert!(
            decode(&bytes[..cut]).is_err(),
            "prefix of {} bytes decoded",
            cut
        );
    }
    assert!(decode(&bytes).is_ok());
}

/// A hostile file leaves the target store untouched
#[test]
fn test_hostile_file_rejected_by_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hostile.bin");
    fs::write(&path, u64_bytes(20_000)).unwrap();

    let mut store = BranchStore::with_seed("fileA", "initA");
    store.create_qubit();
    let before = store.clone();

    let result = load_store(&mut store, &path);
    assert!(matches!(
        result,
        Err(StoreError::Decode(DecodeError::OversizedCount { .. }))
    ));
    assert_eq!(store, before);
}
