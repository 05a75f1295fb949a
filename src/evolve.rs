//! Branch Evolver
//!
//! Fork-join mutator: each `evolve` call spawns a fixed fan-out of tasks,
//! every task evaluates the same logic gate, and successful tasks append one
//! branch (plus metadata) under the store lock. The lock is held only for the
//! append; random draws happen beforehand on a task-local generator.

use crate::randomness::RngSource;
use crate::store::{MetadataRecord, StoreHandle};
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Number of concurrent branch-evaluation tasks per `evolve` call.
pub const EVOLUTION_FAN_OUT: u64 = 5;

const EVOLVED_PERMISSIONS: &str = "rw-r--r--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicGate {
    And,
    Or,
    Not,
}

/// Evaluate `gate`. `Not` ignores the second input.
pub fn apply_gate(gate: LogicGate, a: bool, b: bool) -> bool {
    match gate {
        LogicGate::And => a && b,
        LogicGate::Or => a || b,
        LogicGate::Not => !a,
    }
}

impl LogicGate {
    pub const ALL: [LogicGate; 3] = [LogicGate::And, LogicGate::Or, LogicGate::Not];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicGate::And => "and",
            LogicGate::Or => "or",
            LogicGate::Not => "not",
        }
    }
}

impl fmt::Display for LogicGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown logic gate '{0}' (expected and, or, not)")]
pub struct ParseGateError(pub String);

impl FromStr for LogicGate {
    type Err = ParseGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(LogicGate::And),
            "or" => Ok(LogicGate::Or),
            "not" => Ok(LogicGate::Not),
            _ => Err(ParseGateError(s.to_string())),
        }
    }
}

/// Outcome of one `evolve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionReport {
    pub gate: LogicGate,
    pub passed: bool,
    pub appended: usize,
}

pub struct Evolver {
    rng: RngSource,
    generation: AtomicU64,
}

impl Default for Evolver {
    fn default() -> Self {
        Self::new(RngSource::Entropy)
    }
}

impl Evolver {
    pub fn new(rng: RngSource) -> Self {
        Self {
            rng,
            generation: AtomicU64::new(0),
        }
    }

    /// Run one fork-join evolution round against `store`.
    ///
    /// Blocks until every task has finished.
    pub fn evolve(
        &self,
        store: &StoreHandle,
        gate: LogicGate,
        cond1: bool,
        cond2: bool,
    ) -> EvolutionReport {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let timestamp = chrono::Utc::now().format("%Y-%m-%d").to_string();

        let appended = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..EVOLUTION_FAN_OUT)
                .map(|task_id| {
                    let timestamp = timestamp.as_str();
                    let mut rng = self.rng.stream(generation * EVOLUTION_FAN_OUT + task_id);
                    scope.spawn(move || {
                        if !apply_gate(gate, cond1, cond2) {
                            return false;
                        }
                        let content = format!("Branch_{}_State_{}", task_id, rng.gen_range(0..100u32));
                        let metadata = MetadataRecord::new(
                            format!("user{}", task_id),
                            EVOLVED_PERMISSIONS,
                            timestamp,
                            rng.gen_range(0..1000u64),
                        );
                        store.lock().append(content, metadata);
                        true
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(appended) => appended,
                    Err(_) => {
                        warn!("Evolution task panicked");
                        false
                    }
                })
                .filter(|appended| *appended)
                .count()
        });

        let passed = apply_gate(gate, cond1, cond2);
        if passed {
            info!(gate = %gate, appended, "Evolution complete");
        } else {
            debug!(gate = %gate, cond1, cond2, "Gate rejected evolution");
        }

        EvolutionReport {
            gate,
            passed,
            appended,
        }
    }
}
