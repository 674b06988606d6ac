//! Models module for the SDK
//!
//! Defines the stock, schema-designer and document structures shared by the
//! import/export codecs, the designer and the services.

pub mod document;
pub mod enums;
pub mod schema;
pub mod stock;

pub use document::{Document, DocumentKind, NewDocument, ParsedDocument, UploadFile};
pub use enums::*;
pub use schema::{FieldChanges, SchemaField, SchemaTable};
pub use stock::{InventoryRecord, NewStockRow, StockInput, StockRow, StockUpdate};
