use crate::error::AnalyzerError;
use core_types::{ParameterKey, SimulationRecord};
use std::borrow::Borrow;

fn as_record<T: Borrow<SimulationRecord>>(record: &T) -> &SimulationRecord {
    record.borrow()
}

/// Returns the records whose `key` parameter equals `value` exactly, in their
/// original relative order. Records without the key never match.
pub fn filter_by_parameter<'a, T>(
    records: &'a [T],
    key: impl AsRef<str>,
    value: f64,
) -> Vec<&'a SimulationRecord>
where
    T: Borrow<SimulationRecord>,
{
    let key = key.as_ref();
    records
        .iter()
        .map(as_record)
        .filter(|record| record.parameter(key) == Some(value))
        .collect()
}

/// Applies two exact-match filters, e.g. to select one simulation by agent
/// count and exit count.
pub fn filter_by_two_parameters<'a, T>(
    records: &'a [T],
    key_a: impl AsRef<str>,
    value_a: f64,
    key_b: impl AsRef<str>,
    value_b: f64,
) -> Vec<&'a SimulationRecord>
where
    T: Borrow<SimulationRecord>,
{
    let (key_a, key_b) = (key_a.as_ref(), key_b.as_ref());
    records
        .iter()
        .map(as_record)
        .filter(|record| {
            record.parameter(key_a) == Some(value_a) && record.parameter(key_b) == Some(value_b)
        })
        .collect()
}

/// Returns the first simulation run with exactly `num_agents` agents and
/// `num_exits` exits.
pub fn find_simulation<T>(
    records: &[T],
    num_agents: f64,
    num_exits: f64,
) -> Option<&SimulationRecord>
where
    T: Borrow<SimulationRecord>,
{
    records.iter().map(as_record).find(|record| {
        record.parameter(ParameterKey::NumAgents) == Some(num_agents)
            && record.parameter(ParameterKey::NumExits) == Some(num_exits)
    })
}

/// Returns the records ordered ascending by `key`. The sort is stable, so
/// records with equal values keep their input order.
///
/// # Errors
///
/// `AnalyzerError::MissingParameter` if any record does not define `key`.
pub fn sort_by_parameter<'a, T>(
    records: &'a [T],
    key: impl AsRef<str>,
) -> Result<Vec<&'a SimulationRecord>, AnalyzerError>
where
    T: Borrow<SimulationRecord>,
{
    let key = key.as_ref();
    let mut keyed = records
        .iter()
        .map(as_record)
        .map(|record| record.require(key).map(|value| (value, record)))
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

/// Returns each distinct value of `key` in first-seen order. Records without
/// the key are ignored.
pub fn distinct_parameter_values<T>(records: &[T], key: impl AsRef<str>) -> Vec<f64>
where
    T: Borrow<SimulationRecord>,
{
    let key = key.as_ref();
    let mut values: Vec<f64> = Vec::new();
    for value in records
        .iter()
        .filter_map(|record| as_record(record).parameter(key))
    {
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}
