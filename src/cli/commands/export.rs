//! Export command implementation

use super::{load_records, write_export};
use crate::cli::error::CliError;
use crate::export::{
    CSVExporter, ExportFormat, ExportResult, JSONExporter, SQLExporter, SpreadsheetExporter,
};
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the `export` command
pub struct ExportArgs {
    /// Local stock file to read
    pub store: PathBuf,
    /// csv, json, sql, xlsx or xls
    pub format: String,
    /// Directory receiving the export file
    pub output_dir: PathBuf,
}

/// Handle the `export` command
pub fn handle_export(args: &ExportArgs) -> Result<PathBuf, CliError> {
    let format: ExportFormat = args.format.parse().map_err(CliError::InvalidArgument)?;
    let records = load_records(&args.store)?;
    let now = Utc::now();

    let result: ExportResult = match format {
        ExportFormat::Csv => CSVExporter.export(&records, now)?,
        ExportFormat::Json => JSONExporter.export(&records, now)?,
        ExportFormat::Sql => SQLExporter.export_stocks(&records, now)?,
        ExportFormat::Xlsx => SpreadsheetExporter.export(&records, now)?,
        ExportFormat::HtmlTable => SpreadsheetExporter.export_html(&records, now)?,
    };

    let path = write_export(&result, &args.output_dir)?;
    info!(records = records.len(), path = %path.display(), "Exported stock data");
    println!("Exported {} records to {}", records.len(), path.display());
    Ok(path)
}
