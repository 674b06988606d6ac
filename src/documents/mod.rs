//! Document upload, download and parsing
//!
//! Uploads go to a [`FileStore`] under `<unix-ms>-<file name>`, get a record in
//! the [`DocumentStore`] and are then handed to a [`DocumentParser`]. Parsing
//! is best-effort: a failure is logged and the upload still succeeds.
//!
//! [`FileStore`]: crate::storage::FileStore
//! [`DocumentStore`]: crate::storage::DocumentStore
//! [`DocumentParser`]: crate::storage::DocumentParser

pub mod parser;
pub mod service;

// Re-export for convenience
pub use parser::LocalDocumentParser;
pub use service::{DocumentService, object_path};
