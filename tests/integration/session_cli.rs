//! Integration tests for the line-oriented session

use quantumfs::cli::{LineOutcome, RunContext};
use quantumfs::config::{QuantumFsConfig, RandomnessConfig, StorageConfig};
use std::fs;
use std::io::Cursor;
use std::process::Command;
use tempfile::TempDir;

fn context(dir: &TempDir) -> RunContext {
    RunContext::new(&QuantumFsConfig {
        storage: StorageConfig {
            data_dir: dir.path().to_path_buf(),
        },
        randomness: RandomnessConfig { seed: Some(8) },
        ..Default::default()
    })
}

fn run(ctx: &mut RunContext, script: &str) -> String {
    let mut out = Vec::new();
    ctx.run_session(Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// A full session: evolve, entangle, persist, measure
#[test]
fn test_scripted_session() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = context(&temp_dir);

    let output = run(
        &mut ctx,
        "# setup\n\
         evolve fileA --gate or --cond1 false --cond2 true\n\
         entangle fileA fileB\n\
         integrity\n\
         qubit fileB\n\
         hadamard fileB 0\n\
         measure-qubit fileB 0\n\
         save\n\
         edit fileB late\n\
         integrity\n\
         measure fileA\n",
    );

    assert!(output.contains("Evolution complete: 5 new branch(es) in fileA (gate or)."));
    assert!(output.contains("Entangled fileA and fileB."));
    assert!(output.contains("Entanglement integrity OK."));
    assert!(output.contains("Entanglement integrity BROKEN!"));
    assert!(output.contains("Created qubit 0 in fileB."));
    assert!(output.contains("Saved 2 of 2 store(s)."));
    assert!(output.contains("Measured content: "));
    assert!(temp_dir.path().join("fileA.bin").exists());

    let b = ctx.api().resolve("fileB").unwrap();
    let qubit = ctx.api().show_qubits(b).unwrap()[0];
    assert!(qubit.measured);
    assert!(qubit.value == 0 || qubit.value == 1);
}

/// Edited content is stored exactly as typed
#[test]
fn test_edit_roundtrips_whitespace() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = context(&temp_dir);

    run(&mut ctx, "edit fileA a   b\tc\nsave fileA\ndelete fileA\nload fileA\n");
    let a = ctx.api().resolve("fileA").unwrap();
    assert_eq!(
        ctx.api().list(a).unwrap(),
        vec!["initA".to_string(), "a   b\tc".to_string()]
    );
}

/// A missing file for one store does not stop the others from loading
#[test]
fn test_load_all_continues_past_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = context(&temp_dir);

    let output = run(
        &mut ctx,
        "edit fileB saved\nsave fileB\nedit fileB unsaved\nload\n",
    );

    assert!(!temp_dir.path().join("fileA.bin").exists());
    assert!(output.contains("Loaded 1 of 2 store(s)."));
    assert!(output.contains("fileA: Error: Store error: Storage I/O error"));
    let b = ctx.api().resolve("fileB").unwrap();
    assert_eq!(
        ctx.api().list(b).unwrap(),
        vec!["initB".to_string(), "saved".to_string()]
    );
}

/// Errors are reported inline and the session keeps going
#[test]
fn test_errors_do_not_end_session() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = context(&temp_dir);

    let output = run(
        &mut ctx,
        "hadamard fileA 3\nevolve fileA --gate xor\nload fileA\nstores\n",
    );

    assert!(output.contains("qubit index 3 out of range (len 0)"));
    assert!(output.contains("xor"));
    assert!(output.contains("Storage I/O error"));
    assert!(output.contains("Stores:\n  fileA\n  fileB"));
}

#[test]
fn test_exit_outcome() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = context(&temp_dir);
    assert_eq!(ctx.execute_line("quit"), LineOutcome::Exit);
    assert_eq!(ctx.execute_line(""), LineOutcome::Skip);
}

/// The binary runs a script file end to end
#[test]
fn test_binary_runs_script() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("session.txt");
    fs::write(&script, "edit fileA from-binary\nshow fileA\nsave fileA\nexit\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_quantumfs"))
        .arg("--quiet")
        .arg("--workspace")
        .arg(temp_dir.path())
        .arg("--data-dir")
        .arg(temp_dir.path().join("data"))
        .arg("--seed")
        .arg("1")
        .arg("--script")
        .arg(&script)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Possible contents of fileA:\n  initA\n  from-binary"));
    assert!(temp_dir.path().join("data").join("fileA.bin").exists());
}
