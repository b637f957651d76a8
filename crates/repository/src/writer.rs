use crate::error::RepositoryError;
use crate::parser::companion_path;
use core_types::SimulationRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Label the simulator writes in front of each evacuation time.
const TIME_LABEL: &str = "Total time";

/// The file name the simulator uses for a given configuration.
pub fn simulation_file_name(num_agents: u32, num_exits: u32, runs: u32) -> String {
    format!("Evac_A{num_agents}_E{num_exits}_R{runs}.txt")
}

/// Renders the primary file: the parameter line followed by one
/// `Total time: <t>` line per run.
pub fn format_primary(record: &SimulationRecord) -> String {
    let header = record
        .parameters()
        .iter()
        .map(|(key, value)| format!("{key}:{value}"))
        .collect::<Vec<_>>()
        .join(",");

    let mut out = header;
    out.push('\n');
    for time in record.evacuation_times() {
        out.push_str(&format!("{TIME_LABEL}: {time}\n"));
    }
    out
}

/// Renders the companion file, or `None` if the record has no per-timestep data.
///
/// Every run becomes one line, so a run without samples renders as a blank
/// line; `write_record` refuses such records.
pub fn format_companion(record: &SimulationRecord) -> Option<String> {
    if record.agents_vs_time().is_empty() {
        return None;
    }
    let mut out = String::new();
    for run in record.agents_vs_time() {
        let row = run
            .iter()
            .map(|count| count.to_string())
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&row);
        out.push('\n');
    }
    Some(out)
}

/// Writes `record` into `dir` as `file_name` (plus its companion file when it
/// has agents-vs-time data) and returns the primary file's path.
///
/// Fails with `RepositoryError::InvalidRecord`, before touching the
/// filesystem, if any run has an empty agents-vs-time row.
///
/// Each file is written to a temporary sibling first and then renamed into
/// place, so an interrupted write never leaves a truncated data file behind.
pub fn write_record(
    dir: impl AsRef<Path>,
    file_name: &str,
    record: &SimulationRecord,
) -> Result<PathBuf, RepositoryError> {
    let path = dir.as_ref().join(file_name);
    if let Some(run) = record.agents_vs_time().iter().position(Vec::is_empty) {
        return Err(RepositoryError::InvalidRecord {
            path,
            message: format!("run {} has no agents-vs-time samples", run + 1),
        });
    }
    atomic_write(&path, &format_primary(record))?;

    if let Some(companion) = format_companion(record) {
        atomic_write(&companion_path(&path), &companion)?;
    }

    tracing::debug!(path = %path.display(), "Wrote simulation file.");
    Ok(path)
}

fn atomic_write(path: &Path, content: &str) -> Result<(), RepositoryError> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, content).map_err(|e| RepositoryError::from_io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| RepositoryError::from_io(path, e))?;
    Ok(())
}
