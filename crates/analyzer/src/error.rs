use core_types::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("Parameter '{key}' is not defined by simulation {}", source_path.display())]
    MissingParameter { key: String, source_path: PathBuf },
}

impl From<CoreError> for AnalyzerError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MissingParameter { key, source_path } => {
                AnalyzerError::MissingParameter { key, source_path }
            }
        }
    }
}
