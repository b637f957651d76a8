use crate::error::AnalyticsError;
use core_types::SimulationRecord;
use serde::Serialize;

/// Mean cumulative number of evacuated agents at one point in simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub step: usize,
    /// `step * SimulationTimeStep`.
    pub time: f64,
    pub mean_evacuated: f64,
}

/// Averages the agents-vs-time rows of a record across runs.
///
/// Runs end at different timesteps; a run that has already finished keeps
/// contributing its final (cumulative) count. Returns an empty curve when the
/// record has no companion data.
pub fn mean_evacuation_curve(record: &SimulationRecord) -> Result<Vec<CurvePoint>, AnalyticsError> {
    let rows: Vec<&Vec<f64>> = record
        .agents_vs_time()
        .iter()
        .filter(|row| !row.is_empty())
        .collect();
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let time_step = record.time_step()?;
    let steps = rows.iter().map(|row| row.len()).max().unwrap_or(0);
    let run_count = rows.len() as f64;

    let curve = (0..steps)
        .map(|step| {
            let total: f64 = rows
                .iter()
                .map(|row| row.get(step).or(row.last()).copied().unwrap_or(0.0))
                .sum();
            CurvePoint {
                step,
                time: step as f64 * time_step,
                mean_evacuated: total / run_count,
            }
        })
        .collect();

    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(agents_vs_time: Vec<Vec<f64>>) -> SimulationRecord {
        let parameters = BTreeMap::from([
            ("NumExits".to_string(), 2.0),
            ("Runs".to_string(), 3.0),
            ("NumAgents".to_string(), 6.0),
            ("SimulationTimeStep".to_string(), 0.5),
        ]);
        SimulationRecord::new("sim", parameters, vec![1.0, 1.0, 1.0], agents_vs_time)
    }

    #[test]
    fn test_curve_averages_runs() {
        let curve = mean_evacuation_curve(&record(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![0.0, 1.0, 2.0],
        ]))
        .unwrap();

        let means: Vec<f64> = curve.iter().map(|p| p.mean_evacuated).collect();
        assert_eq!(means, vec![5.0 / 3.0, 8.0 / 3.0, 11.0 / 3.0]);
        assert_eq!(curve[2].time, 1.0);
    }

    #[test]
    fn test_finished_runs_carry_their_final_count() {
        let uneven = record(vec![vec![2.0, 6.0], vec![1.0, 3.0, 5.0, 6.0]]);

        let curve = mean_evacuation_curve(&uneven).unwrap();

        assert_eq!(curve.len(), 4);
        assert_eq!(curve[3].mean_evacuated, 6.0);
        assert_eq!(curve[2].mean_evacuated, 5.5);
    }

    #[test]
    fn test_no_companion_data_gives_empty_curve() {
        assert!(mean_evacuation_curve(&record(Vec::new())).unwrap().is_empty());
    }
}
