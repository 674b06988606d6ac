//! Import functionality
//!
//! Provides parsers for bringing data into the SDK:
//! - CSV (pasted text with fuzzy header mapping)
//! - Spreadsheet rows (header-keyed rows, e.g. the first sheet of an .xlsx)
//! - SQL (CREATE TABLE statements for the schema designer)
//!
//! The stock parsers only turn text into [`ImportRow`]s. Creating records is
//! left to the inventory service, which walks the rows in order.

pub mod csv;
pub mod spreadsheet;
pub mod sql;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use crate::models::{InventoryRecord, SchemaTable, StockInput};
use std::fmt;

/// Error during import
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    #[error("Please paste CSV data to import")]
    EmptyInput,
    #[error("CSV must contain batch_number and stock_number columns (found: {})", found.join(", "))]
    MissingRequiredColumns { found: Vec<String> },
    #[error("Workbook error: {0}")]
    Workbook(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("No valid CREATE TABLE statements found")]
    NoStatements,
}

/// Why a single row was not imported
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line (CSV) or sheet row number
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.line, self.reason)
    }
}

/// One parsed input row, accepted or rejected
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub line: usize,
    pub outcome: Result<StockInput, RowError>,
}

impl ImportRow {
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Counts reported at the end of a stock import batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    /// Records created by the store, in input order
    pub records: Vec<InventoryRecord>,
    pub failures: Vec<RowError>,
}

impl ImportSummary {
    pub fn imported(&self) -> usize {
        self.records.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported {} items. {} failed.",
            self.imported(),
            self.failed()
        )
    }
}

/// Result of a schema (SQL) import
#[derive(Debug, Clone, Default)]
pub struct SchemaImportResult {
    /// Tables extracted from the import
    pub tables: Vec<SchemaTable>,
    /// Parse errors/warnings
    pub errors: Vec<ImportError>,
}

impl SchemaImportResult {
    pub fn found_statements(&self) -> bool {
        !self.tables.is_empty()
    }
}

// Re-export for convenience
pub use csv::CsvImporter;
pub use spreadsheet::{SheetRow, SpreadsheetImporter};
pub use sql::SQLImporter;
