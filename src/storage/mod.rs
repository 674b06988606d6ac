//! Collaborator abstraction
//!
//! The SDK never talks to a database, an object store or the document parse
//! function directly. Services are generic over these traits:
//! - [`RecordStore`]: the `stocks` table
//! - [`DocumentStore`]: the `documents` table
//! - [`FileStore`]: the document object bucket
//! - [`DocumentParser`]: the document parse function
//!
//! Implementations:
//! - `memory`: in-process stores (always available, used by tests and the CLI)
//! - `filesystem::FileSystemFileStore`: object files under a base directory
//! - `api::ApiBackend`: PostgREST-style HTTP backend (online mode)

use crate::models::{
    Document, NewDocument, NewStockRow, ParsedDocument, StockRow, StockUpdate, UploadFile,
};
use async_trait::async_trait;

/// Error type for collaborator operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Record not found: {0}")]
    RecordNotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// Ordering requested from a list call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    /// Newest stock first, the order every stock view starts from
    pub fn newest_stock() -> Self {
        Self::descending("date_added")
    }

    /// PostgREST `order` query value, e.g. `date_added.desc`
    pub fn to_query(&self) -> String {
        format!(
            "{}.{}",
            self.column,
            if self.ascending { "asc" } else { "desc" }
        )
    }
}

impl Default for OrderBy {
    fn default() -> Self {
        Self::newest_stock()
    }
}

/// Persistence of stock rows
#[async_trait(?Send)]
pub trait RecordStore: Send + Sync {
    /// List every row in the requested order
    async fn list(&self, order: &OrderBy) -> Result<Vec<StockRow>, StorageError>;

    /// Insert a row; the store assigns `id` and `date_added`
    async fn create(&self, row: &NewStockRow) -> Result<StockRow, StorageError>;

    /// Update the present fields of a row and return the stored result
    async fn update(&self, id: &str, changes: &StockUpdate) -> Result<StockRow, StorageError>;

    /// Delete a row by id
    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// Persistence of document metadata records
#[async_trait(?Send)]
pub trait DocumentStore: Send + Sync {
    /// List documents, newest upload first
    async fn list(&self) -> Result<Vec<Document>, StorageError>;

    async fn create(&self, document: &NewDocument) -> Result<Document, StorageError>;

    /// Store the parse result and flag the record as processed
    async fn mark_processed(&self, id: &str, parsed: &ParsedDocument)
    -> Result<(), StorageError>;

    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// Object storage for uploaded document bytes
#[async_trait(?Send)]
pub trait FileStore: Send + Sync {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError>;

    async fn download(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Remove objects; missing paths are not an error
    async fn remove(&self, paths: &[String]) -> Result<(), StorageError>;
}

/// The document parse function
#[async_trait(?Send)]
pub trait DocumentParser: Send + Sync {
    async fn parse(&self, file: &UploadFile) -> Result<ParsedDocument, StorageError>;
}

pub mod memory;

#[cfg(feature = "native-fs")]
pub mod filesystem;

#[cfg(feature = "api-backend")]
pub mod api;

// Re-export for convenience
pub use memory::{MemoryDocumentStore, MemoryFileStore, MemoryRecordStore};
