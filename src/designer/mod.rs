//! Schema designer
//!
//! An in-memory set of [`SchemaTable`]s edited field by field, rendered to
//! `CREATE TABLE` SQL and rebuilt from pasted SQL.
//!
//! [`SchemaTable`]: crate::models::SchemaTable

pub mod schema_designer;
pub mod templates;

use crate::validation::ValidationError;
use uuid::Uuid;

/// Error during a designer edit
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DesignError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Table not found: {0}")]
    TableNotFound(Uuid),
    #[error("Field not found: {0}")]
    FieldNotFound(Uuid),
    #[error("Cannot delete primary key field '{0}'")]
    PrimaryKeyField(String),
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

// Re-export for convenience
pub use schema_designer::SchemaDesigner;
pub use templates::{SQL_TEMPLATES, SqlTemplate};
