//! Stock Pail SDK - inventory logic shared by every Stock Pail front end
//!
//! Provides unified interfaces for:
//! - Stock import/export (CSV, JSON, SQL, spreadsheet)
//! - The schema designer and its SQL round trip
//! - Inventory, document and analytics services
//! - Collaborator backends (in-memory, file system, HTTP API)
//! - Configuration and input validation

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod designer;
pub mod documents;
pub mod export;
pub mod grid;
pub mod import;
pub mod inventory;
pub mod models;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use storage::{
    DocumentParser, DocumentStore, FileStore, MemoryDocumentStore, MemoryFileStore,
    MemoryRecordStore, OrderBy, RecordStore, StorageError,
};
#[cfg(feature = "native-fs")]
pub use storage::filesystem::FileSystemFileStore;
#[cfg(feature = "api-backend")]
pub use storage::api::ApiBackend;

pub use analytics::{InventorySummary, SortState, TableView};
pub use config::{ConfigError, StockPailConfig};
pub use designer::{DesignError, SchemaDesigner};
pub use documents::{DocumentService, LocalDocumentParser};
pub use export::{
    CSVExporter, ExportError, ExportFormat, ExportResult, JSONExporter, SQLExporter,
    SpreadsheetExporter,
};
pub use grid::Spreadsheet;
pub use import::{
    CsvImporter, ImportError, ImportSummary, SQLImporter, SchemaImportResult, SpreadsheetImporter,
};
pub use inventory::{OperationError, StockService};
pub use validation::ValidationError;

// Re-export models
pub use models::enums::*;
pub use models::{
    Document, InventoryRecord, ParsedDocument, SchemaField, SchemaTable, StockInput, StockUpdate,
    UploadFile,
};
