//! Spreadsheet row import
//!
//! Rows arrive keyed by their column header (the first sheet row). Each stock
//! field is resolved by trying literal header variants in priority order; the
//! first non-empty value wins.

use super::csv::{RowFields, parse_quantity};
use super::{ImportError, ImportRow};
use std::collections::HashMap;

/// A sheet row keyed by column header
pub type SheetRow = HashMap<String, String>;

const BATCH_HEADERS: [&str; 3] = ["Batch Number", "batch_number", "Batch"];
const STOCK_HEADERS: [&str; 3] = ["Stock Number", "stock_number", "Stock"];
const DESCRIPTION_HEADERS: [&str; 2] = ["Description", "description"];
const QUANTITY_HEADERS: [&str; 2] = ["Quantity", "quantity"];

fn first_present<'a>(row: &'a SheetRow, headers: &[&str]) -> Option<&'a str> {
    headers
        .iter()
        .filter_map(|h| row.get(*h))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

/// Importer for header-keyed spreadsheet rows
#[derive(Debug, Default, Clone, Copy)]
pub struct SpreadsheetImporter;

impl SpreadsheetImporter {
    pub fn new() -> Self {
        Self
    }

    fn parse_row(row: &SheetRow, line: usize) -> ImportRow {
        let fields = RowFields {
            batch_number: first_present(row, &BATCH_HEADERS).map(str::to_string),
            stock_number: first_present(row, &STOCK_HEADERS).map(str::to_string),
            description: first_present(row, &DESCRIPTION_HEADERS).map(str::to_string),
            quantity: first_present(row, &QUANTITY_HEADERS).map(parse_quantity),
        };
        fields.into_row(line)
    }

    /// Resolve contiguous rows into [`ImportRow`]s; the header is sheet row 1
    pub fn parse_rows(&self, rows: &[SheetRow]) -> Vec<ImportRow> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| Self::parse_row(row, index + 2))
            .collect()
    }

    /// Resolve rows that carry their own sheet row number
    pub fn parse_numbered_rows(&self, rows: &[(usize, SheetRow)]) -> Vec<ImportRow> {
        rows.iter()
            .map(|(line, row)| Self::parse_row(row, *line))
            .collect()
    }

    /// Read the first sheet of an .xlsx workbook and resolve its rows
    #[cfg(feature = "xlsx")]
    pub fn parse_workbook(&self, bytes: &[u8]) -> Result<Vec<ImportRow>, ImportError> {
        let rows = super::xlsx::read_first_sheet_numbered(bytes)?;
        Ok(self.parse_numbered_rows(&rows))
    }

    /// Workbook support is compiled out
    #[cfg(not(feature = "xlsx"))]
    pub fn parse_workbook(&self, _bytes: &[u8]) -> Result<Vec<ImportRow>, ImportError> {
        Err(ImportError::Workbook(
            "Workbook support not enabled. Build with --features xlsx".to_string(),
        ))
    }
}
