//! CLI presentation: text formatting of command results.

use crate::api::{Observation, StoreOutcome};
use crate::cli::output::map_error;
use crate::evolve::EvolutionReport;
use crate::qubit::Qubit;
use comfy_table::{presets::UTF8_FULL, Table};
use std::path::Path;

pub fn format_evolution(store: &str, report: &EvolutionReport) -> String {
    if report.passed {
        format!(
            "Evolution complete: {} new branch(es) in {} (gate {}).",
            report.appended, store, report.gate
        )
    } else {
        format!(
            "Evolution complete: gate {} rejected the inputs, {} unchanged.",
            report.gate, store
        )
    }
}

pub fn format_branch_list(store: &str, branches: &[String]) -> String {
    let mut out = format!("Possible contents of {}:", store);
    if branches.is_empty() {
        out.push_str("\n  (none)");
    }
    for branch in branches {
        out.push_str("\n  ");
        out.push_str(branch);
    }
    out
}

pub fn format_observation(store: &str, observation: Option<&Observation>) -> String {
    match observation {
        None => format!("{} has no branches to measure.", store),
        Some(obs) => {
            let mut out = format!("Measured content: {}", obs.content);
            if let Some(meta) = &obs.metadata {
                out.push_str(&format!(
                    "\nMetadata: owner={} permissions={} timestamp={} size={}",
                    meta.owner, meta.permissions, meta.timestamp, meta.size
                ));
            }
            out
        }
    }
}

pub fn format_qubits(store: &str, qubits: &[Qubit]) -> String {
    if qubits.is_empty() {
        return format!("No qubits in {}.", store);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Qubit", "|0> amplitude", "|1> amplitude", "Measured", "Value"]);
    for (index, qubit) in qubits.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            format!("{:.6}", qubit.alpha),
            format!("{:.6}", qubit.beta),
            qubit.measured.to_string(),
            qubit.value.to_string(),
        ]);
    }
    format!("Qubits in {}:\n{}", store, table)
}

pub fn format_integrity(intact: bool) -> String {
    if intact {
        "Entanglement integrity OK.".to_string()
    } else {
        "Entanglement integrity BROKEN!".to_string()
    }
}

pub fn format_saved(store: &str, path: &Path, verb: &str) -> String {
    format!("{} {} ({}).", verb, store, path.display())
}

/// Batch save/load summary: one line per store, failures included.
pub fn format_batch(outcomes: &[StoreOutcome], verb: &str) -> String {
    let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
    let mut out = format!("{} {} of {} store(s).", verb, succeeded, outcomes.len());
    for outcome in outcomes {
        match &outcome.result {
            Ok(path) => out.push_str(&format!("\n  {}: {}", outcome.store, path.display())),
            Err(e) => out.push_str(&format!("\n  {}: {}", outcome.store, map_error(e))),
        }
    }
    out
}

pub fn format_store_list(names: &[String]) -> String {
    let mut out = String::from("Stores:");
    for name in names {
        out.push_str("\n  ");
        out.push_str(name);
    }
    out
}
