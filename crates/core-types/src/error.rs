use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Parameter '{key}' is missing from simulation file {}", source_path.display())]
    MissingParameter { key: String, source_path: PathBuf },
}
