use crate::error::RepositoryError;
use crate::COMPANION_SUFFIX;
use core_types::{ParameterKey, SimulationRecord};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Returns the path of the companion file for a primary data file.
///
/// The suffix is appended to the full file name, so `Evac_A50_E2_R3.txt`
/// becomes `Evac_A50_E2_R3.txt.extra`.
pub fn companion_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(COMPANION_SUFFIX);
    PathBuf::from(name)
}

/// Parses one simulation result file and its optional companion file into a
/// `SimulationRecord`.
///
/// # Errors
///
/// - `RepositoryError::NotFound` if the primary file does not exist.
/// - `RepositoryError::Parse` if any line of either file is malformed, or if
///   a required parameter is missing from the first line.
/// - `RepositoryError::Io` for any other read failure.
///
/// A missing companion file is not an error; the record's `agents_vs_time`
/// is simply left empty.
pub fn parse_simulation_file(path: impl AsRef<Path>) -> Result<SimulationRecord, RepositoryError> {
    let path = path.as_ref();
    let (parameters, evacuation_times) = read_primary(path)?;
    let agents_vs_time = read_companion(&companion_path(path))?;

    tracing::debug!(
        path = %path.display(),
        runs = evacuation_times.len(),
        companion_rows = agents_vs_time.len(),
        "Parsed simulation file."
    );

    Ok(SimulationRecord::new(
        path,
        parameters,
        evacuation_times,
        agents_vs_time,
    ))
}

/// Reads the parameter line and the per-run evacuation times.
fn read_primary(path: &Path) -> Result<(BTreeMap<String, f64>, Vec<f64>), RepositoryError> {
    let file = File::open(path).map_err(|e| RepositoryError::from_io(path, e))?;
    let lines = read_lines(path, file)?;

    let Some(header) = lines.first() else {
        return Err(parse_error(path, 1, "file is empty".to_string()));
    };
    let parameters = parse_parameters_line(header).map_err(|msg| parse_error(path, 1, msg))?;

    for key in ParameterKey::REQUIRED {
        if !parameters.contains_key(key.as_str()) {
            return Err(parse_error(
                path,
                1,
                format!("missing required parameter '{key}'"),
            ));
        }
    }

    let mut evacuation_times = Vec::new();
    for (index, line) in lines.iter().enumerate().skip(1) {
        let line_number = index + 1;
        if line.trim().is_empty() {
            return Err(parse_error(
                path,
                line_number,
                "blank line between evacuation times".to_string(),
            ));
        }
        let time = parse_evacuation_time_line(line)
            .map_err(|msg| parse_error(path, line_number, msg))?;
        evacuation_times.push(time);
    }

    Ok((parameters, evacuation_times))
}

/// Reads the per-run, per-timestep agent counts. A missing file yields no rows.
///
/// Each line is one run, so a blank line before the last row is an error
/// rather than a skipped run.
fn read_companion(path: &Path) -> Result<Vec<Vec<f64>>, RepositoryError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No companion file; skipping agents-vs-time.");
            return Ok(Vec::new());
        }
        Err(e) => return Err(RepositoryError::from_io(path, e)),
    };

    let mut rows = Vec::new();
    for (index, line) in read_lines(path, file)?.iter().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            return Err(parse_error(
                path,
                line_number,
                format!("run {line_number} has no values"),
            ));
        }
        let row = parse_agents_line(line).map_err(|msg| parse_error(path, line_number, msg))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Reads all lines of `file`, dropping blank lines at the end only.
fn read_lines(path: &Path, file: File) -> Result<Vec<String>, RepositoryError> {
    let mut lines = BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RepositoryError::from_io(path, e))?;
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    Ok(lines)
}

fn parse_error(path: &Path, line: usize, message: String) -> RepositoryError {
    RepositoryError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    }
}

fn parse_number(text: &str) -> Result<f64, String> {
    let text = text.trim();
    text.parse::<f64>()
        .map_err(|_| format!("'{text}' is not a number"))
}

/// Parses the `key1:value1,key2:value2,...` header of a primary file.
///
/// If a key appears more than once the last value wins.
pub fn parse_parameters_line(line: &str) -> Result<BTreeMap<String, f64>, String> {
    let mut parameters = BTreeMap::new();
    for token in line.split(',') {
        let (key, value) = token
            .split_once(':')
            .ok_or_else(|| format!("parameter '{}' has no ':' separator", token.trim()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("parameter '{}' has an empty name", token.trim()));
        }
        parameters.insert(key.to_string(), parse_number(value)?);
    }
    Ok(parameters)
}

/// Parses a `<label>:<number>` data line. Only the field after the last colon
/// is used, so labels may themselves contain colons.
pub fn parse_evacuation_time_line(line: &str) -> Result<f64, String> {
    let (_label, value) = line
        .rsplit_once(':')
        .ok_or_else(|| format!("line '{}' has no ':' separator", line.trim()))?;
    parse_number(value)
}

/// Parses one companion-file row of comma-separated cumulative agent counts.
pub fn parse_agents_line(line: &str) -> Result<Vec<f64>, String> {
    line.split(',')
        .enumerate()
        .map(|(column, field)| {
            if field.trim().is_empty() {
                Err(format!("field {} is empty", column + 1))
            } else {
                parse_number(field)
            }
        })
        .collect()
}
