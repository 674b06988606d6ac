//! CLI error type

use crate::config::ConfigError;
use crate::designer::DesignError;
use crate::export::ExportError;
use crate::inventory::OperationError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),
    #[error("Failed to write {0}: {1}")]
    FileWriteError(PathBuf, String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid stock file {0}: {1}")]
    StockFileError(PathBuf, String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Design(#[from] DesignError),
    #[error(transparent)]
    Operation(#[from] OperationError),
}
