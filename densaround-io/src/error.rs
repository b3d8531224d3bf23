use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for densaround-io operations.
#[derive(Error, Debug)]
pub enum OutputError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to create parent directories for file.
    #[error("Failed to create parent directories for {0}")]
    ParentDirectoryCreation(PathBuf),

    /// The temporary file could not be moved onto the output path.
    #[error("Cannot open output file '{path}': {source}")]
    Persist { path: PathBuf, source: io::Error },
}

/// Result type alias for densaround-io operations.
pub type Result<T> = std::result::Result<T, OutputError>;
