//! JSON exporter for stock records

use super::{ExportError, ExportFormat, ExportResult, ensure_records, file_name};
use crate::models::InventoryRecord;
use chrono::{DateTime, Utc};

/// Exporter for JSON format.
pub struct JSONExporter;

impl JSONExporter {
    /// Export records as a 2-space indented array with camelCase keys
    pub fn export(
        &self,
        records: &[InventoryRecord],
        at: DateTime<Utc>,
    ) -> Result<ExportResult, ExportError> {
        ensure_records(records)?;
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        Ok(ExportResult::text(
            content,
            ExportFormat::Json,
            file_name("stock-export", ExportFormat::Json, at),
        ))
    }
}
