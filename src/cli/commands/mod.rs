//! CLI command implementations

pub mod design;
pub mod export;
pub mod import;
pub mod summary;
pub mod upload;

use crate::cli::error::CliError;
use crate::export::ExportResult;
use crate::models::InventoryRecord;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Load input content from a file, or stdin for `-`
pub fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Read the local stock file; a missing file is an empty inventory
pub fn load_records(path: &Path) -> Result<Vec<InventoryRecord>, CliError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::StockFileError(path.to_path_buf(), e.to_string()))
}

/// Write the local stock file in the JSON export shape
pub fn save_records(path: &Path, records: &[InventoryRecord]) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(records)
        .map_err(|e| CliError::StockFileError(path.to_path_buf(), e.to_string()))?;
    std::fs::write(path, text).map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))
}

/// Write an export into `dir` under its suggested file name
pub fn write_export(result: &ExportResult, dir: &Path) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::FileWriteError(dir.to_path_buf(), e.to_string()))?;
    let path = dir.join(&result.file_name);
    std::fs::write(&path, &result.content)
        .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
    Ok(path)
}
