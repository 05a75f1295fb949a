//! CLI parse: clap types for quantumfs. No behavior; definitions only.

use crate::evolve::LogicGate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// quantumfs - superposed file storage session
///
/// Reads one command per line from `--script` or stdin.
#[derive(Parser, Debug)]
#[command(name = "quantumfs")]
#[command(about = "Superposed file storage with qubits, entanglement checks and binary persistence")]
pub struct Cli {
    /// Workspace root directory (for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for store files (overrides config)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Fixed random seed for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Read session commands from this file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Disable logging
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// One session line.
#[derive(Parser, Debug)]
#[command(name = "quantumfs", no_binary_name = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Grow a store through a logic gate (5 parallel branch tasks)
    Evolve {
        store: String,
        /// Logic gate: and, or, not
        #[arg(long, default_value = "and")]
        gate: LogicGate,
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        cond1: bool,
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        cond2: bool,
    },
    /// Append a branch with the given content
    Edit {
        store: String,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        content: Vec<String>,
    },
    /// Delete every branch and metadata record
    Delete { store: String },
    /// Collapse the store to one observed branch
    Measure { store: String },
    /// Show the branch contents
    Show { store: String },
    /// Create a qubit in |0>
    Qubit { store: String },
    /// Show the store's qubits
    Qubits { store: String },
    /// Apply Hadamard to a qubit
    Hadamard { store: String, index: usize },
    /// Measure a qubit
    MeasureQubit { store: String, index: usize },
    /// Entangle two stores
    Entangle { a: String, b: String },
    /// Deactivate the entanglement link
    Disentangle,
    /// Check entanglement integrity
    Integrity,
    /// Save one store, or all when omitted
    Save { store: Option<String> },
    /// Load one store, or all when omitted
    Load { store: Option<String> },
    /// List registered stores
    Stores,
    /// End the session
    #[command(alias = "quit")]
    Exit,
}
