//! CLI route: single route table and run context. Dispatches session lines to
//! the core API and presentation.

use crate::api::QuantumFs;
use crate::cli::output::map_error;
use crate::cli::parse::{SessionCommand, SessionLine};
use crate::cli::presentation::{
    format_batch, format_branch_list, format_evolution, format_integrity, format_observation,
    format_qubits, format_saved, format_store_list,
};
use crate::config::QuantumFsConfig;
use crate::error::{ApiError, StoreError};
use clap::error::ErrorKind;
use clap::Parser;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{debug, info};

/// What a single session line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line or comment
    Skip,
    Output(String),
    Exit,
}

/// Runtime context for a session: owns the core facade.
pub struct RunContext {
    fs: QuantumFs,
}

impl RunContext {
    pub fn new(config: &QuantumFsConfig) -> Self {
        Self {
            fs: QuantumFs::from_config(config),
        }
    }

    pub fn from_fs(fs: QuantumFs) -> Self {
        Self { fs }
    }

    /// Reference to the underlying facade.
    pub fn api(&self) -> &QuantumFs {
        &self.fs
    }

    /// Execute a parsed command and return its text output.
    pub fn execute(&mut self, command: &SessionCommand) -> Result<String, ApiError> {
        let fs = &mut self.fs;
        match command {
            SessionCommand::Evolve {
                store,
                gate,
                cond1,
                cond2,
            } => {
                let id = fs.resolve(store)?;
                let report = fs.evolve(id, *gate, *cond1, *cond2)?;
                Ok(format_evolution(store, &report))
            }
            SessionCommand::Edit { store, content } => {
                let id = fs.resolve(store)?;
                let count = fs.edit(id, &content.join(" "))?;
                Ok(format!("Added branch to {} ({} total).", store, count))
            }
            SessionCommand::Delete { store } => {
                let id = fs.resolve(store)?;
                fs.delete(id)?;
                Ok(format!("All branches of {} deleted.", store))
            }
            SessionCommand::Measure { store } => {
                let id = fs.resolve(store)?;
                let observation = fs.measure_content(id)?;
                Ok(format_observation(store, observation.as_ref()))
            }
            SessionCommand::Show { store } => {
                let id = fs.resolve(store)?;
                Ok(format_branch_list(store, &fs.list(id)?))
            }
            SessionCommand::Qubit { store } => {
                let id = fs.resolve(store)?;
                let index = fs.create_qubit(id)?;
                Ok(format!("Created qubit {} in {}.", index, store))
            }
            SessionCommand::Qubits { store } => {
                let id = fs.resolve(store)?;
                Ok(format_qubits(store, &fs.show_qubits(id)?))
            }
            SessionCommand::Hadamard { store, index } => {
                let id = fs.resolve(store)?;
                let qubit = fs.apply_hadamard(id, *index)?;
                Ok(format!(
                    "Hadamard applied to qubit {} in {}: alpha={:.6} beta={:.6}",
                    index, store, qubit.alpha, qubit.beta
                ))
            }
            SessionCommand::MeasureQubit { store, index } => {
                let id = fs.resolve(store)?;
                let value = fs.measure_qubit(id, *index)?;
                Ok(format!("Qubit {} in {} measured: {}", index, store, value))
            }
            SessionCommand::Entangle { a, b } => {
                let id_a = fs.resolve(a)?;
                let id_b = fs.resolve(b)?;
                fs.entangle(id_a, id_b)?;
                Ok(format!("Entangled {} and {}.", a, b))
            }
            SessionCommand::Disentangle => {
                fs.disentangle();
                Ok("Stores disentangled.".to_string())
            }
            SessionCommand::Integrity => Ok(format_integrity(fs.check_integrity()?)),
            SessionCommand::Save { store } => match store {
                Some(name) => {
                    let path = fs.save(fs.resolve(name)?)?;
                    Ok(format_saved(name, &path, "Saved"))
                }
                None => Ok(format_batch(&fs.save_all(), "Saved")),
            },
            SessionCommand::Load { store } => match store {
                Some(name) => {
                    let path = fs.load(fs.resolve(name)?)?;
                    Ok(format_saved(name, &path, "Loaded"))
                }
                None => Ok(format_batch(&fs.load_all(), "Loaded")),
            },
            SessionCommand::Stores => Ok(format_store_list(&fs.store_names())),
            SessionCommand::Exit => Ok("Goodbye.".to_string()),
        }
    }

    /// Parse and execute one session line. Parse and command failures are
    /// rendered as output so a session keeps going.
    pub fn execute_line(&mut self, line: &str) -> LineOutcome {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return LineOutcome::Skip;
        }

        let command = match SessionLine::try_parse_from(trimmed.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                let text = err.to_string().trim_end().to_string();
                return match err.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        LineOutcome::Output(text)
                    }
                    _ => LineOutcome::Output(map_error(&ApiError::InvalidCommand(text))),
                };
            }
        };
        let command = match command {
            SessionCommand::Exit => return LineOutcome::Exit,
            SessionCommand::Edit { store, content } => SessionCommand::Edit {
                store,
                content: raw_edit_content(line)
                    .map(|raw| vec![raw.to_string()])
                    .unwrap_or(content),
            },
            other => other,
        };

        let start = Instant::now();
        match self.execute(&command) {
            Ok(text) => {
                debug!(
                    command = ?command,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Command completed"
                );
                LineOutcome::Output(text)
            }
            Err(err) => {
                debug!(command = ?command, error = %err, "Command failed");
                LineOutcome::Output(map_error(&err))
            }
        }
    }

    /// Run a session over `input` until end of input or `exit`.
    pub fn run_session<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> Result<(), ApiError> {
        info!(stores = self.fs.registry().len(), "Session started");
        let mut executed = 0usize;

        for line in input.lines() {
            let line = line.map_err(StoreError::IoError)?;
            match self.execute_line(&line) {
                LineOutcome::Skip => continue,
                LineOutcome::Output(text) => {
                    executed += 1;
                    writeln!(output, "{}", text).map_err(StoreError::IoError)?;
                }
                LineOutcome::Exit => break,
            }
        }

        output.flush().map_err(StoreError::IoError)?;
        info!(commands = executed, "Session ended");
        Ok(())
    }
}

/// Text after `edit <store>` exactly as typed, minus the one separator
/// following the store name.
fn raw_edit_content(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("edit")?;
    let rest = rest.strip_prefix(|c: char| c.is_whitespace())?.trim_start();
    let store_end = rest.find(char::is_whitespace)?;
    let mut remainder = rest[store_end..].chars();
    remainder.next();
    Some(remainder.as_str())
}
