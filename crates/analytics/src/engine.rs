use crate::curve::{mean_evacuation_curve, CurvePoint};
use crate::error::AnalyticsError;
use crate::report::{Comparison, ConditionSummary, ExitSeries};
use crate::stats;
use analyzer::{group_by_parameter, sort_by_parameter};
use core_types::{ParameterKey, SimulationRecord, TTestKind};
use std::borrow::Borrow;

/// A stateless calculator for deriving evacuation statistics from parsed
/// simulation records.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {
    test_kind: TTestKind,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `kind` for every comparison made by this engine.
    pub fn with_test_kind(kind: TTestKind) -> Self {
        Self { test_kind: kind }
    }

    pub fn test_kind(&self) -> TTestKind {
        self.test_kind
    }

    /// Summarizes every record, ordered by exit count and then agent count.
    pub fn summarize<T>(&self, records: &[T]) -> Result<Vec<ConditionSummary>, AnalyticsError>
    where
        T: Borrow<SimulationRecord>,
    {
        let by_agents = sort_by_parameter(records, ParameterKey::NumAgents)?;
        let by_exits = sort_by_parameter(&by_agents, ParameterKey::NumExits)?;
        by_exits
            .into_iter()
            .map(ConditionSummary::from_record)
            .collect()
    }

    /// Builds one series per exit count, each ordered by agent count.
    ///
    /// # Returns
    ///
    /// Series in ascending exit-count order. A series holds every simulation
    /// with that exit count, so the caller can chart mean evacuation time
    /// (with its standard deviation) against the number of agents.
    pub fn series_by_exits<T>(&self, records: &[T]) -> Result<Vec<ExitSeries>, AnalyticsError>
    where
        T: Borrow<SimulationRecord>,
    {
        group_by_parameter(records, ParameterKey::NumExits)?
            .into_iter()
            .map(|group| -> Result<ExitSeries, AnalyticsError> {
                let points = sort_by_parameter(&group.records, ParameterKey::NumAgents)?
                    .into_iter()
                    .map(ConditionSummary::from_record)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ExitSeries {
                    num_exits: group.value,
                    points,
                })
            })
            .collect()
    }

    /// Tests whether the evacuation times of `treatment` differ from those of
    /// `control`.
    pub fn compare(
        &self,
        control: &SimulationRecord,
        treatment: &SimulationRecord,
    ) -> Result<Comparison, AnalyticsError> {
        let test = stats::t_test(
            control.evacuation_times(),
            treatment.evacuation_times(),
            self.test_kind,
        )?;
        Ok(Comparison {
            control: ConditionSummary::from_record(control)?,
            treatment: ConditionSummary::from_record(treatment)?,
            test,
        })
    }

    /// Mean evacuated-agent curve for one simulation. See [`mean_evacuation_curve`].
    pub fn evacuation_curve(
        &self,
        record: &SimulationRecord,
    ) -> Result<Vec<CurvePoint>, AnalyticsError> {
        mean_evacuation_curve(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(name: &str, exits: f64, agents: f64, times: Vec<f64>) -> SimulationRecord {
        let parameters = BTreeMap::from([
            ("NumExits".to_string(), exits),
            ("Runs".to_string(), times.len() as f64),
            ("NumAgents".to_string(), agents),
            ("SimulationTimeStep".to_string(), 0.5),
        ]);
        SimulationRecord::new(name, parameters, times, Vec::new())
    }

    fn dataset() -> Vec<SimulationRecord> {
        vec![
            record("a", 2.0, 100.0, vec![30.0, 32.0]),
            record("b", 1.0, 100.0, vec![50.0, 54.0]),
            record("c", 2.0, 50.0, vec![20.0, 21.0]),
            record("d", 1.0, 50.0, vec![35.0, 37.0]),
        ]
    }

    #[test]
    fn test_summaries_are_ordered_by_exits_then_agents() {
        let summaries = AnalyticsEngine::new().summarize(&dataset()).unwrap();

        let order: Vec<(f64, f64)> = summaries
            .iter()
            .map(|s| (s.num_exits, s.num_agents))
            .collect();
        assert_eq!(order, vec![(1.0, 50.0), (1.0, 100.0), (2.0, 50.0), (2.0, 100.0)]);
        assert_eq!(summaries[0].mean, 36.0);
    }

    #[test]
    fn test_series_by_exits() {
        let series = AnalyticsEngine::new().series_by_exits(&dataset()).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].num_exits, 1.0);
        let agents: Vec<f64> = series[1].points.iter().map(|p| p.num_agents).collect();
        assert_eq!(agents, vec![50.0, 100.0]);
        assert_eq!(series[1].points[1].mean, 31.0);
    }

    #[test]
    fn test_compare_two_conditions() {
        let records = vec![
            record("one-exit", 1.0, 50.0, vec![35.0, 37.0, 36.0, 38.0]),
            record("two-exits", 2.0, 50.0, vec![20.0, 21.0, 19.5, 22.0]),
        ];

        let comparison = AnalyticsEngine::new()
            .compare(&records[0], &records[1])
            .unwrap();

        assert_eq!(comparison.test.kind, TTestKind::Student);
        assert!(comparison.test.p_value < 0.001);
        assert!(comparison.is_significant(0.05));
        assert!(comparison.mean_difference() < 0.0);
    }

    #[test]
    fn test_compare_uses_configured_test_kind() {
        let records = dataset();
        let engine = AnalyticsEngine::with_test_kind(TTestKind::Welch);

        let comparison = engine.compare(&records[0], &records[2]).unwrap();

        assert_eq!(engine.test_kind(), TTestKind::Welch);
        assert_eq!(comparison.test.kind, TTestKind::Welch);
        assert!(comparison.test.p_value > 0.0 && comparison.test.p_value <= 1.0);
    }
}
