//! Export functionality
//!
//! Provides exporters for various formats:
//! - CSV (unescaped, comma-joined)
//! - JSON (pretty-printed record array)
//! - SQL (stock dump, and designer schema)
//! - Spreadsheet (.xlsx workbook, or HTML table saved as .xls)
//!
//! Every exporter returns an [`ExportResult`] carrying the bytes and the
//! download file name; writing the file is up to the caller.

pub mod csv;
pub mod json;
pub mod spreadsheet;
pub mod sql;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use crate::models::InventoryRecord;
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};

/// Column headers shared by the CSV and spreadsheet stock exports
pub const STOCK_HEADERS: [&str; 5] = [
    "Batch Number",
    "Stock Number",
    "Description",
    "Quantity",
    "Date Added",
];

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Sql,
    Xlsx,
    /// HTML table that spreadsheet applications open as `.xls`
    HtmlTable,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Sql => "sql",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::HtmlTable => "xls",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Sql => "text/sql",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::HtmlTable => "application/vnd.ms-excel",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "sql" => Ok(ExportFormat::Sql),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "xls" | "html" => Ok(ExportFormat::HtmlTable),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Download file name: `<prefix>-<unix-ms>.<ext>`
pub fn file_name(prefix: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    format!("{}-{}.{}", prefix, at.timestamp_millis(), format.extension())
}

/// Result of an export operation
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    /// Exported bytes (UTF-8 text for every format except xlsx)
    pub content: Vec<u8>,
    /// Format identifier
    pub format: ExportFormat,
    /// Suggested download file name
    pub file_name: String,
}

impl ExportResult {
    pub fn text(content: String, format: ExportFormat, file_name: String) -> Self {
        Self {
            content: content.into_bytes(),
            format,
            file_name,
        }
    }

    /// Content as text, `None` for binary formats
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Export error: {0}")]
    ExportError(String),
}

/// Stock exports refuse an empty record list
pub(crate) fn ensure_records(records: &[InventoryRecord]) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ValidationError::NoData.into());
    }
    Ok(())
}

/// Short US-style date used by the CSV and spreadsheet exports (`3/7/2024`)
pub(crate) fn short_date(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

/// ISO-8601 timestamp with milliseconds (`2024-03-07T09:15:00.000Z`)
pub(crate) fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

// Re-export for convenience
pub use csv::CSVExporter;
pub use json::JSONExporter;
pub use spreadsheet::SpreadsheetExporter;
pub use sql::SQLExporter;
