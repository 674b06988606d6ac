//! CSV exporter for stock records
//!
//! Values are joined with commas and never quoted, so a comma inside a
//! description spills into the next column. Descriptions without commas
//! survive a round trip through the CSV importer.

use super::{
    ExportError, ExportFormat, ExportResult, STOCK_HEADERS, ensure_records, file_name, short_date,
};
use crate::models::InventoryRecord;
use chrono::{DateTime, Utc};

/// Exporter for CSV format.
pub struct CSVExporter;

impl CSVExporter {
    /// Render the header line and one line per record, in input order
    pub fn to_csv(records: &[InventoryRecord]) -> String {
        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(STOCK_HEADERS.join(","));
        for record in records {
            lines.push(
                [
                    record.batch_number.clone(),
                    record.stock_number.clone(),
                    record.description.clone(),
                    record.quantity.to_string(),
                    short_date(&record.date_added),
                ]
                .join(","),
            );
        }
        lines.join("\n")
    }

    /// Export records as `stock-export-<unix-ms>.csv`
    pub fn export(
        &self,
        records: &[InventoryRecord],
        at: DateTime<Utc>,
    ) -> Result<ExportResult, ExportError> {
        ensure_records(records)?;
        Ok(ExportResult::text(
            Self::to_csv(records),
            ExportFormat::Csv,
            file_name("stock-export", ExportFormat::Csv, at),
        ))
    }
}
