use crate::error::AnalyzerError;
use crate::query::sort_by_parameter;
use core_types::SimulationRecord;
use serde::Serialize;
use std::borrow::Borrow;

/// All records sharing one value of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterGroup<'a> {
    pub value: f64,
    pub records: Vec<&'a SimulationRecord>,
}

/// Partitions `records` by the value of `key`.
///
/// Groups are ordered by ascending value; inside a group, records keep their
/// input order.
///
/// # Errors
///
/// `AnalyzerError::MissingParameter` if any record does not define `key`.
pub fn group_by_parameter<'a, T>(
    records: &'a [T],
    key: impl AsRef<str>,
) -> Result<Vec<ParameterGroup<'a>>, AnalyzerError>
where
    T: Borrow<SimulationRecord>,
{
    let key = key.as_ref();
    let sorted = sort_by_parameter(records, key)?;

    let mut groups: Vec<ParameterGroup<'a>> = Vec::new();
    for record in sorted {
        // Present on every record: sort_by_parameter already checked.
        let value = record.require(key)?;
        match groups.last_mut() {
            Some(group) if group.value == value => group.records.push(record),
            _ => groups.push(ParameterGroup {
                value,
                records: vec![record],
            }),
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ParameterKey;
    use std::collections::BTreeMap;

    fn record(name: &str, exits: f64, agents: f64) -> SimulationRecord {
        let parameters = BTreeMap::from([
            ("NumExits".to_string(), exits),
            ("Runs".to_string(), 1.0),
            ("NumAgents".to_string(), agents),
            ("SimulationTimeStep".to_string(), 0.5),
        ]);
        SimulationRecord::new(name, parameters, vec![10.0], Vec::new())
    }

    #[test]
    fn test_groups_are_sorted_by_value() {
        let records = vec![
            record("a", 2.0, 10.0),
            record("b", 1.0, 20.0),
            record("c", 2.0, 30.0),
            record("d", 1.0, 40.0),
        ];

        let groups = group_by_parameter(&records, ParameterKey::NumExits).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].value, 1.0);
        assert_eq!(groups[1].value, 2.0);
        let second: Vec<String> = groups[1].records.iter().map(|r| r.file_name()).collect();
        assert_eq!(second, vec!["a", "c"]);
    }

    #[test]
    fn test_grouping_empty_input() {
        let records: Vec<SimulationRecord> = Vec::new();
        assert!(group_by_parameter(&records, "NumExits").unwrap().is_empty());
    }

    #[test]
    fn test_grouping_requires_key_on_every_record() {
        let records = vec![record("a", 2.0, 10.0)];
        assert!(group_by_parameter(&records, "Seed").is_err());
    }
}
