use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("File or directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Parse error in {} at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        /// 1-based line number within `path`.
        line: usize,
        message: String,
    },

    #[error("Cannot write {}: {message}", path.display())]
    InvalidRecord { path: PathBuf, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RepositoryError {
    /// Maps an I/O failure on `path`, promoting "not found" to its own variant.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            RepositoryError::NotFound(path)
        } else {
            RepositoryError::Io { path, source }
        }
    }
}
