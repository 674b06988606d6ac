//! Stock list operations

use super::OperationError;
use crate::import::{CsvImporter, ImportRow, ImportSummary, RowError, SpreadsheetImporter};
use crate::models::{InventoryRecord, StockInput, StockUpdate};
use crate::storage::{OrderBy, RecordStore};
use crate::validation::{validate_stock_input, validate_stock_update};
use tracing::{debug, info, warn};

/// Session view of the stock table
pub struct StockService<S: RecordStore> {
    store: S,
    records: Vec<InventoryRecord>,
}

impl<S: RecordStore> StockService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            records: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current records, newest first after a refresh
    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&InventoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Reload every record ordered by `date_added` descending.
    ///
    /// On failure the previous list is kept.
    pub async fn refresh(&mut self) -> Result<&[InventoryRecord], OperationError> {
        match self.store.list(&OrderBy::newest_stock()).await {
            Ok(rows) => {
                self.records = rows.into_iter().map(InventoryRecord::from).collect();
                debug!(records = self.records.len(), "Refreshed stock list");
                Ok(&self.records)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch stocks, keeping previous list");
                Err(e.into())
            }
        }
    }

    /// Create a record and put it at the front of the list
    pub async fn add(&mut self, input: StockInput) -> Result<InventoryRecord, OperationError> {
        validate_stock_input(&input)?;
        let row = self.store.create(&input.to_new_row()).await?;
        let record = InventoryRecord::from(row);
        self.records.insert(0, record.clone());
        info!(id = %record.id, stock = %record.stock_number, "Added stock item");
        Ok(record)
    }

    /// Send only the present fields and replace the record in place
    pub async fn update(
        &mut self,
        id: &str,
        changes: StockUpdate,
    ) -> Result<InventoryRecord, OperationError> {
        validate_stock_update(&changes)?;
        let row = self.store.update(id, &changes).await?;
        let record = InventoryRecord::from(row);
        if let Some(existing) = self.records.iter_mut().find(|r| r.id == id) {
            *existing = record.clone();
        }
        info!(id, "Updated stock item");
        Ok(record)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), OperationError> {
        self.store.delete(id).await?;
        self.records.retain(|r| r.id != id);
        info!(id, "Deleted stock item");
        Ok(())
    }

    /// Import pasted CSV text.
    ///
    /// A malformed header rejects the whole batch before any row is created.
    pub async fn import_csv(&mut self, text: &str) -> Result<ImportSummary, OperationError> {
        let rows = CsvImporter::new().parse(text)?;
        Ok(self.import_rows(rows).await)
    }

    /// Import the first sheet of an uploaded `.xlsx` workbook
    pub async fn import_spreadsheet(
        &mut self,
        bytes: &[u8],
    ) -> Result<ImportSummary, OperationError> {
        let rows = SpreadsheetImporter::new().parse_workbook(bytes)?;
        Ok(self.import_rows(rows).await)
    }

    /// Create each accepted row in input order, one awaited call at a time.
    ///
    /// Rejected rows and failed creates are counted and the batch continues;
    /// nothing is retried.
    pub async fn import_rows(&mut self, rows: Vec<ImportRow>) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for row in rows {
            let input = match row.outcome {
                Ok(input) => input,
                Err(failure) => {
                    summary.failures.push(failure);
                    continue;
                }
            };
            match self.add(input).await {
                Ok(record) => summary.records.push(record),
                Err(e) => {
                    warn!(line = row.line, error = %e, "Import row rejected");
                    summary.failures.push(RowError {
                        line: row.line,
                        reason: e.to_string(),
                    });
                }
            }
        }
        info!(
            imported = summary.imported(),
            failed = summary.failed(),
            "Stock import finished"
        );
        summary
    }
}
