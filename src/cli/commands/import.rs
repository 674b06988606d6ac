//! Import command implementation

use super::{load_records, save_records};
use crate::cli::error::CliError;
use crate::cli::output::format_import_summary;
use crate::config::StockPailConfig;
use crate::import::ImportSummary;
use crate::inventory::StockService;
use crate::models::StockRow;
use crate::storage::{MemoryRecordStore, RecordStore};
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for the `import` command
pub struct ImportArgs {
    /// CSV text or an .xlsx workbook
    pub file: PathBuf,
    /// Local stock file to extend
    pub store: PathBuf,
    /// Send rows to the configured backend instead of the local file
    pub remote: bool,
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"))
}

async fn import_into<S: RecordStore>(
    service: &mut StockService<S>,
    file: &Path,
) -> Result<ImportSummary, CliError> {
    let bytes =
        std::fs::read(file).map_err(|e| CliError::FileReadError(file.to_path_buf(), e.to_string()))?;
    let summary = if is_workbook(file) {
        service.import_spreadsheet(&bytes).await?
    } else {
        service.import_csv(&String::from_utf8_lossy(&bytes)).await?
    };
    Ok(summary)
}

/// Handle the `import` command
pub async fn handle_import(
    args: &ImportArgs,
    config: &StockPailConfig,
) -> Result<ImportSummary, CliError> {
    let summary = if args.remote {
        import_remote(args, config).await?
    } else {
        let records = load_records(&args.store)?;
        let store = MemoryRecordStore::with_rows(records.iter().map(StockRow::from).collect());
        let mut service = StockService::new(store);
        let summary = import_into(&mut service, &args.file).await?;
        service.refresh().await?;
        save_records(&args.store, service.records())?;
        info!(store = %args.store.display(), "Saved stock file");
        summary
    };

    print!("{}", format_import_summary(&summary));
    Ok(summary)
}

#[cfg(feature = "api-backend")]
async fn import_remote(
    args: &ImportArgs,
    config: &StockPailConfig,
) -> Result<ImportSummary, CliError> {
    let backend = crate::storage::api::ApiBackend::from_config(&config.backend)?;
    let mut service = StockService::new(backend);
    import_into(&mut service, &args.file).await
}

#[cfg(not(feature = "api-backend"))]
async fn import_remote(
    _args: &ImportArgs,
    _config: &StockPailConfig,
) -> Result<ImportSummary, CliError> {
    Err(CliError::InvalidArgument(
        "Remote import requires the api-backend feature".to_string(),
    ))
}
