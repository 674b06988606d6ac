//! Upload command implementation

use crate::cli::error::CliError;
use crate::config::StockPailConfig;
use crate::documents::{DocumentService, LocalDocumentParser};
use crate::models::UploadFile;
use crate::storage::MemoryDocumentStore;
use crate::storage::filesystem::FileSystemFileStore;
use chrono::Utc;
use std::path::PathBuf;

/// Arguments for the `upload` command
pub struct UploadArgs {
    pub file: PathBuf,
    /// MIME type; guessed from the extension when absent
    pub mime_type: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

fn guess_mime(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("csv") => "text/csv",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Handle the `upload` command
pub async fn handle_upload(args: &UploadArgs, config: &StockPailConfig) -> Result<(), CliError> {
    let bytes = std::fs::read(&args.file)
        .map_err(|e| CliError::FileReadError(args.file.clone(), e.to_string()))?;
    let name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidArgument("Upload path has no file name".to_string()))?;
    let mime_type = args
        .mime_type
        .clone()
        .unwrap_or_else(|| guess_mime(&args.file).to_string());

    let service = DocumentService::new(
        MemoryDocumentStore::new(),
        FileSystemFileStore::new(&config.storage.documents_dir),
        LocalDocumentParser::new(),
    );
    let document = service
        .upload(
            &UploadFile::new(name, mime_type, bytes),
            args.category.clone(),
            args.description.clone(),
            Utc::now(),
        )
        .await?;

    let text = serde_json::to_string_pretty(&document)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
