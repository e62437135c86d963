use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create output file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}'")]
    Csv(PathBuf, #[source] csv::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
