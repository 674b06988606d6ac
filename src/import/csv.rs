//! CSV import for pasted stock data
//!
//! Lines are split on `\n` and values on `,` with no quoting support, so a
//! comma inside a value shifts the remaining columns.

use super::{ImportError, ImportRow, RowError};
use crate::models::StockInput;
use tracing::debug;

/// Canonical stock fields a CSV header can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockField {
    BatchNumber,
    StockNumber,
    Description,
    Quantity,
}

/// Map a header to its canonical field through the fixed synonym table.
///
/// The header is trimmed and lowercased first; unknown headers map to `None`
/// and their column is ignored.
pub fn map_header(header: &str) -> Option<StockField> {
    match header.trim().to_lowercase().as_str() {
        "batch_number" | "batch number" | "batch" => Some(StockField::BatchNumber),
        "stock_number" | "stock number" | "stock" => Some(StockField::StockNumber),
        "description" | "desc" => Some(StockField::Description),
        "quantity" | "qty" | "amount" => Some(StockField::Quantity),
        _ => None,
    }
}

/// Parse the leading integer of a value, falling back to 0.
///
/// `"50"` and `"50 units"` both give 50; `"abc"` and negative values give 0.
pub fn parse_quantity(value: &str) -> u32 {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<u32>().unwrap_or(0)
}

/// Field values collected for one row before the required-field check
#[derive(Debug, Default)]
pub(crate) struct RowFields {
    pub batch_number: Option<String>,
    pub stock_number: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
}

impl RowFields {
    fn set(&mut self, field: StockField, value: &str) {
        match field {
            StockField::BatchNumber => self.batch_number = Some(value.to_string()),
            StockField::StockNumber => self.stock_number = Some(value.to_string()),
            StockField::Description => self.description = Some(value.to_string()),
            StockField::Quantity => self.quantity = Some(parse_quantity(value)),
        }
    }

    /// Build the input, or reject the row when batch or stock is missing
    pub(crate) fn into_row(self, line: usize) -> ImportRow {
        let outcome = match (self.batch_number, self.stock_number) {
            (Some(batch), Some(stock)) if !batch.is_empty() && !stock.is_empty() => Ok(
                StockInput::new(batch, stock)
                    .with_description(self.description.unwrap_or_default())
                    .with_quantity(self.quantity.unwrap_or(0)),
            ),
            (batch, _) => {
                let missing = if batch.as_deref().is_none_or(str::is_empty) {
                    "batch number"
                } else {
                    "stock number"
                };
                Err(RowError {
                    line,
                    reason: format!("missing {}", missing),
                })
            }
        };
        ImportRow { line, outcome }
    }
}

/// CSV importer for pasted stock text
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvImporter;

impl CsvImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse CSV text into rows.
    ///
    /// Fails as a whole, with no rows produced, when the input is blank or
    /// when the headers map to neither batch nor stock number. Otherwise every
    /// data line yields one [`ImportRow`], accepted or rejected.
    pub fn parse(&self, text: &str) -> Result<Vec<ImportRow>, ImportError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ImportError::EmptyInput);
        }

        let mut lines = text.split('\n');
        let header_line = lines.next().unwrap_or_default();
        let raw_headers: Vec<String> = header_line
            .split(',')
            .map(|h| h.trim().to_lowercase())
            .collect();
        let headers: Vec<Option<StockField>> =
            raw_headers.iter().map(|h| map_header(h)).collect();

        let has = |field| headers.contains(&Some(field));
        if !has(StockField::BatchNumber) || !has(StockField::StockNumber) {
            return Err(ImportError::MissingRequiredColumns { found: raw_headers });
        }

        let rows: Vec<ImportRow> = lines
            .enumerate()
            .map(|(index, line)| {
                let values: Vec<&str> = line.split(',').map(str::trim).collect();
                let mut fields = RowFields::default();
                for (column, field) in headers.iter().enumerate() {
                    let Some(field) = field else { continue };
                    match values.get(column) {
                        Some(value) if !value.is_empty() => fields.set(*field, value),
                        _ => {}
                    }
                }
                // Header is line 1
                fields.into_row(index + 2)
            })
            .collect();

        debug!(
            rows = rows.len(),
            accepted = rows.iter().filter(|r| r.is_accepted()).count(),
            "Parsed CSV import"
        );
        Ok(rows)
    }
}
