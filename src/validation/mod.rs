//! Validation functionality
//!
//! Provides the input checks applied before any collaborator call:
//! - Stock records (required batch/stock numbers)
//! - Designer table and field names

pub mod input;

pub use input::{
    ValidationError, ValidationResult, validate_field_name, validate_stock_input,
    validate_stock_update, validate_table_name,
};
