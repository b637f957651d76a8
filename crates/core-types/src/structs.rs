use crate::enums::ParameterKey;
use crate::error::CoreError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The parsed, in-memory representation of one simulation's output.
///
/// A record is built once (normally by the repository parser) and is
/// read-only afterwards: all fields are private and only exposed through
/// borrowing accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRecord {
    source_path: PathBuf,
    parameters: BTreeMap<String, f64>,
    evacuation_times: Vec<f64>,
    agents_vs_time: Vec<Vec<f64>>,
}

impl SimulationRecord {
    pub fn new(
        source_path: impl Into<PathBuf>,
        parameters: BTreeMap<String, f64>,
        evacuation_times: Vec<f64>,
        agents_vs_time: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            parameters,
            evacuation_times,
            agents_vs_time,
        }
    }

    /// All parameters from the first line of the primary file.
    pub fn parameters(&self) -> &BTreeMap<String, f64> {
        &self.parameters
    }

    /// One evacuation time per run, in file order.
    pub fn evacuation_times(&self) -> &[f64] {
        &self.evacuation_times
    }

    /// Cumulative evacuated agents per timestep, one row per run.
    /// Empty when the simulation was not recorded with a companion file.
    pub fn agents_vs_time(&self) -> &[Vec<f64>] {
        &self.agents_vs_time
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The last component of the source path, for display.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }

    pub fn parameter(&self, key: impl AsRef<str>) -> Option<f64> {
        self.parameters.get(key.as_ref()).copied()
    }

    /// Looks up a parameter that the caller cannot proceed without.
    pub fn require(&self, key: impl AsRef<str>) -> Result<f64, CoreError> {
        let key = key.as_ref();
        self.parameter(key).ok_or_else(|| CoreError::MissingParameter {
            key: key.to_string(),
            source_path: self.source_path.clone(),
        })
    }

    pub fn num_agents(&self) -> Result<f64, CoreError> {
        self.require(ParameterKey::NumAgents)
    }

    pub fn num_exits(&self) -> Result<f64, CoreError> {
        self.require(ParameterKey::NumExits)
    }

    pub fn runs(&self) -> Result<f64, CoreError> {
        self.require(ParameterKey::Runs)
    }

    pub fn time_step(&self) -> Result<f64, CoreError> {
        self.require(ParameterKey::SimulationTimeStep)
    }

    /// Whether the number of recorded evacuation times agrees with `Runs`.
    /// Returns `false` when `Runs` is absent.
    pub fn recorded_runs_match(&self) -> bool {
        self.parameter(ParameterKey::Runs)
            .is_some_and(|runs| runs == self.evacuation_times.len() as f64)
    }
}
