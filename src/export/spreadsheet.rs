//! Spreadsheet exporter for stock records
//!
//! Writes a real `.xlsx` workbook when the `xlsx` feature is enabled, and an
//! HTML table saved as `.xls` otherwise (or on request).

use super::{
    ExportError, ExportFormat, ExportResult, STOCK_HEADERS, ensure_records, file_name, short_date,
};
use crate::grid::html_table;
use crate::models::InventoryRecord;
use chrono::{DateTime, Utc};

/// Sheet name used for stock workbooks
pub const STOCK_SHEET_NAME: &str = "Stock Data";

/// Exporter for spreadsheet formats.
pub struct SpreadsheetExporter;

impl SpreadsheetExporter {
    fn text_rows(records: &[InventoryRecord]) -> Vec<Vec<String>> {
        let mut rows = vec![STOCK_HEADERS.iter().map(|h| h.to_string()).collect()];
        rows.extend(records.iter().map(|r| {
            vec![
                r.batch_number.clone(),
                r.stock_number.clone(),
                r.description.clone(),
                r.quantity.to_string(),
                short_date(&r.date_added),
            ]
        }));
        rows
    }

    /// Export records as an HTML table named `stock-export-<unix-ms>.xls`
    pub fn export_html(
        &self,
        records: &[InventoryRecord],
        at: DateTime<Utc>,
    ) -> Result<ExportResult, ExportError> {
        ensure_records(records)?;
        Ok(ExportResult::text(
            html_table(Self::text_rows(records)),
            ExportFormat::HtmlTable,
            file_name("stock-export", ExportFormat::HtmlTable, at),
        ))
    }

    /// Export records as `stock-export-<unix-ms>.xlsx` with a `Stock Data` sheet
    #[cfg(feature = "xlsx")]
    pub fn export_xlsx(
        &self,
        records: &[InventoryRecord],
        at: DateTime<Utc>,
    ) -> Result<ExportResult, ExportError> {
        use super::xlsx::{WorkbookCell, write_workbook};

        ensure_records(records)?;
        let mut rows: Vec<Vec<WorkbookCell>> =
            vec![STOCK_HEADERS.iter().map(|h| WorkbookCell::from(*h)).collect()];
        rows.extend(records.iter().map(|r| {
            vec![
                WorkbookCell::from(r.batch_number.as_str()),
                WorkbookCell::from(r.stock_number.as_str()),
                WorkbookCell::from(r.description.as_str()),
                WorkbookCell::from(r.quantity),
                WorkbookCell::from(short_date(&r.date_added)),
            ]
        }));

        Ok(ExportResult {
            content: write_workbook(STOCK_SHEET_NAME, &rows)?,
            format: ExportFormat::Xlsx,
            file_name: file_name("stock-export", ExportFormat::Xlsx, at),
        })
    }

    /// Best available spreadsheet export for this build
    pub fn export(
        &self,
        records: &[InventoryRecord],
        at: DateTime<Utc>,
    ) -> Result<ExportResult, ExportError> {
        #[cfg(feature = "xlsx")]
        {
            self.export_xlsx(records, at)
        }
        #[cfg(not(feature = "xlsx"))]
        {
            self.export_html(records, at)
        }
    }
}
