//! Integration tests for the quantumfs branch storage system

mod config_loading;
mod decode_bounds;
mod evolution_concurrency;
mod session_cli;
