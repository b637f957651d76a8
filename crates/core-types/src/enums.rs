use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The named parameters every simulation file carries on its first line.
///
/// The string forms are the literal keys written by the simulator, so they
/// must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParameterKey {
    NumExits,
    Runs,
    NumAgents,
    SimulationTimeStep,
}

impl ParameterKey {
    /// Every known key, in the order the simulator writes them.
    pub const ALL: [ParameterKey; 4] = [
        ParameterKey::NumExits,
        ParameterKey::Runs,
        ParameterKey::NumAgents,
        ParameterKey::SimulationTimeStep,
    ];

    /// Keys a primary file must define to be accepted by the parser.
    pub const REQUIRED: [ParameterKey; 4] = Self::ALL;

    /// Returns the key exactly as it appears in the file grammar.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKey::NumExits => "NumExits",
            ParameterKey::Runs => "Runs",
            ParameterKey::NumAgents => "NumAgents",
            ParameterKey::SimulationTimeStep => "SimulationTimeStep",
        }
    }
}

impl AsRef<str> for ParameterKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown parameter key '{s}'"))
    }
}

/// Which independent two-sample t-test to run when comparing conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TTestKind {
    /// Pooled variance, assumes both conditions share one variance.
    #[default]
    Student,
    /// Unequal variances with Welch-Satterthwaite degrees of freedom.
    Welch,
}
