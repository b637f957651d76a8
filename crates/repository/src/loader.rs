use crate::error::RepositoryError;
use crate::parser::parse_simulation_file;
use crate::COMPANION_SUFFIX;
use core_types::SimulationRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Parses every primary data file in `dir`.
///
/// Entries whose names end in the companion suffix are skipped (they are read
/// alongside their primary file), as are subdirectories. The result is in
/// directory-listing order, which the OS does not guarantee to be sorted.
///
/// The first file that fails to parse aborts the whole load.
pub fn load_directory(dir: impl AsRef<Path>) -> Result<Vec<SimulationRecord>, RepositoryError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(RepositoryError::NotFound(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| RepositoryError::from_io(dir, e))?;
    let mut records = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| RepositoryError::from_io(dir, e))?;
        let path = entry.path();

        if entry.file_name().to_string_lossy().ends_with(COMPANION_SUFFIX) {
            continue;
        }
        let file_type = entry
            .file_type()
            .map_err(|e| RepositoryError::from_io(&path, e))?;
        if file_type.is_dir() {
            tracing::debug!(path = %path.display(), "Skipping subdirectory.");
            continue;
        }

        records.push(parse_simulation_file(&path)?);
    }

    tracing::debug!(
        dir = %dir.display(),
        count = records.len(),
        "Loaded simulation records."
    );
    Ok(records)
}

/// The loaded contents of one data directory.
#[derive(Debug, Clone)]
pub struct SimulationRepository {
    directory: PathBuf,
    records: Vec<SimulationRecord>,
}

impl SimulationRepository {
    /// Loads every simulation in `dir`. See [`load_directory`].
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let dir = dir.as_ref();
        let records = load_directory(dir)?;
        Ok(Self {
            directory: dir.to_path_buf(),
            records,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Records in directory-listing order.
    pub fn records(&self) -> &[SimulationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SimulationRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered by source path, for output that must not depend on
    /// the directory-listing order.
    pub fn sorted_by_path(&self) -> Vec<&SimulationRecord> {
        let mut sorted: Vec<&SimulationRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.source_path().cmp(b.source_path()));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_sim(dir: &Path, name: &str, agents: u32, exits: u32) {
        let body = format!(
            "NumExits:{exits},Runs:2,NumAgents:{agents},SimulationTimeStep:0.5\n\
             Run1:10.0\nRun2:11.0\n"
        );
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_load_skips_companion_files() {
        let dir = tempdir().unwrap();
        write_sim(dir.path(), "a.txt", 10, 1);
        write_sim(dir.path(), "b.txt", 20, 2);
        fs::write(dir.path().join("a.txt.extra"), "1,2\n3,4\n").unwrap();

        let records = load_directory(dir.path()).unwrap();

        assert_eq!(records.len(), 2);
        let with_companion = records
            .iter()
            .find(|r| r.file_name() == "a.txt")
            .unwrap();
        assert_eq!(with_companion.agents_vs_time().len(), 2);
    }

    #[test]
    fn test_load_skips_subdirectories() {
        let dir = tempdir().unwrap();
        write_sim(dir.path(), "a.txt", 10, 1);
        fs::create_dir(dir.path().join("plots")).unwrap();

        let records = load_directory(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_directory_loads_nothing() {
        let dir = tempdir().unwrap();
        assert!(load_directory(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_directory(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[test]
    fn test_one_bad_file_fails_the_whole_load() {
        let dir = tempdir().unwrap();
        write_sim(dir.path(), "a.txt", 10, 1);
        fs::write(dir.path().join("broken.txt"), "NumExits:1\nnot a time line").unwrap();

        let err = load_directory(dir.path()).unwrap_err();
        assert!(matches!(err, RepositoryError::Parse { .. }));
    }

    #[test]
    fn test_repository_sorted_by_path() {
        let dir = tempdir().unwrap();
        write_sim(dir.path(), "c.txt", 30, 3);
        write_sim(dir.path(), "a.txt", 10, 1);
        write_sim(dir.path(), "b.txt", 20, 2);

        let repo = SimulationRepository::open(dir.path()).unwrap();

        assert_eq!(repo.len(), 3);
        assert!(!repo.is_empty());
        let names: Vec<String> = repo.sorted_by_path().iter().map(|r| r.file_name()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_repository_hands_over_its_records() {
        let dir = tempdir().unwrap();
        write_sim(dir.path(), "a.txt", 10, 1);
        write_sim(dir.path(), "b.txt", 20, 2);

        let repo = SimulationRepository::open(dir.path()).unwrap();
        assert_eq!(repo.directory(), dir.path());
        let records = repo.into_records();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.evacuation_times() == [10.0, 11.0]));
    }
}
