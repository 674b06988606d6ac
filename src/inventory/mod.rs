//! Inventory service
//!
//! Holds the session's list of stock records on top of a [`RecordStore`] and
//! runs stock imports row by row against it.
//!
//! [`RecordStore`]: crate::storage::RecordStore

pub mod service;

use crate::import::ImportError;
use crate::storage::StorageError;
use crate::validation::ValidationError;

/// Error returned by every inventory operation
///
/// The service reports outcomes; turning them into user notifications is the
/// caller's job.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] StorageError),
}

// Re-export for convenience
pub use service::StockService;
