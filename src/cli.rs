//! CLI domain: parse, route, output and presentation only.
//! Session lines are dispatched through a single route table onto the core API.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, SessionCommand, SessionLine};
pub use presentation::{
    format_batch, format_branch_list, format_evolution, format_integrity, format_observation, format_qubits,
    format_saved, format_store_list,
};
pub use route::{LineOutcome, RunContext};
