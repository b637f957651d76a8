//! # Simulation Data Repository
//!
//! This crate is the only part of the toolkit that touches the filesystem. It
//! turns the flat files written by the evacuation simulator into
//! `SimulationRecord`s and can write records back out in the same grammar.
//!
//! ## File Layout
//!
//! A data directory holds pairs of files: `<name>` (the primary file with the
//! parameters and one evacuation time per run) and an optional
//! `<name>.extra` companion with the cumulative evacuated-agent counts per
//! timestep for each run.
//!
//! ## Public API
//!
//! - `parse_simulation_file`: Parses one primary file and its companion.
//! - `load_directory` / `SimulationRepository`: Parses every primary file in a directory.
//! - `write_record`: Writes a record back out as primary and companion files.
//! - `RepositoryError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod loader;
pub mod parser;
pub mod writer;

/// Suffix appended to a primary file name to locate its companion file.
pub const COMPANION_SUFFIX: &str = ".extra";

// Re-export the key components to create a clean, public-facing API.
pub use error::RepositoryError;
pub use loader::{load_directory, SimulationRepository};
pub use parser::{companion_path, parse_simulation_file};
pub use writer::{simulation_file_name, write_record};
