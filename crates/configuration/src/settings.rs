use core_types::TTestKind;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub data: Data,
    pub analysis: Analysis,
    pub logging: Logging,
}

/// Where the simulation output lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Data {
    /// Directory holding the primary and `.extra` companion files.
    pub directory: PathBuf,
}

/// Contains parameters for comparing simulated conditions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Analysis {
    /// A p-value below this threshold is reported as significant.
    pub significance_level: f64,
    pub t_test: TTestKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Logging {
    /// Default `tracing` filter, used when `RUST_LOG` is not set.
    pub level: String,
}
