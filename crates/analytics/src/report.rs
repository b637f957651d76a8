use crate::error::AnalyticsError;
use crate::stats::{self, TTestResult};
use core_types::SimulationRecord;
use serde::Serialize;
use std::path::PathBuf;

/// Evacuation-time statistics for one simulated condition (one file).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionSummary {
    pub source_path: PathBuf,
    pub num_agents: f64,
    pub num_exits: f64,
    /// Number of evacuation times actually recorded.
    pub runs: usize,
    pub mean: f64,
    /// `None` when only a single run was recorded.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl ConditionSummary {
    pub fn from_record(record: &SimulationRecord) -> Result<Self, AnalyticsError> {
        let times = record.evacuation_times();
        let mean = stats::mean(times).map_err(|_| {
            AnalyticsError::EmptySample(format!(
                "{} has no evacuation times",
                record.source_path().display()
            ))
        })?;
        let std_dev = if times.len() > 1 {
            Some(stats::std_dev(times)?)
        } else {
            None
        };

        Ok(Self {
            source_path: record.source_path().to_path_buf(),
            num_agents: record.num_agents()?,
            num_exits: record.num_exits()?,
            runs: times.len(),
            mean,
            std_dev,
            min: times.iter().copied().fold(f64::INFINITY, f64::min),
            max: times.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

/// One line of the "agents vs evacuation time" chart: every simulation with
/// a given number of exits, ordered by agent count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitSeries {
    pub num_exits: f64,
    pub points: Vec<ConditionSummary>,
}

/// A significance test between two simulated conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub control: ConditionSummary,
    pub treatment: ConditionSummary,
    pub test: TTestResult,
}

impl Comparison {
    /// Whether the difference in mean evacuation time is significant at `alpha`.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.test.p_value < alpha
    }

    /// `mean(treatment) - mean(control)`.
    pub fn mean_difference(&self) -> f64 {
        self.treatment.mean - self.control.mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(times: Vec<f64>) -> SimulationRecord {
        let parameters = BTreeMap::from([
            ("NumExits".to_string(), 2.0),
            ("Runs".to_string(), times.len() as f64),
            ("NumAgents".to_string(), 50.0),
            ("SimulationTimeStep".to_string(), 0.5),
        ]);
        SimulationRecord::new("Evac_A50_E2_R3.txt", parameters, times, Vec::new())
    }

    #[test]
    fn test_summary_from_record() {
        let summary = ConditionSummary::from_record(&record(vec![10.0, 12.5, 11.0])).unwrap();

        assert_eq!(summary.num_agents, 50.0);
        assert_eq!(summary.num_exits, 2.0);
        assert_eq!(summary.runs, 3);
        assert!((summary.mean - 11.166_666_666_666_666).abs() < 1e-12);
        assert!(summary.std_dev.is_some());
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 12.5);
    }

    #[test]
    fn test_single_run_has_no_std_dev() {
        let summary = ConditionSummary::from_record(&record(vec![9.0])).unwrap();
        assert_eq!(summary.std_dev, None);
        assert_eq!(summary.mean, 9.0);
    }

    #[test]
    fn test_record_without_times_is_an_error() {
        let err = ConditionSummary::from_record(&record(Vec::new())).unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptySample(_)));
    }
}
