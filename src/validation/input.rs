//! Input validation utilities.
//!
//! Every check here runs before the record store or the designer state is
//! touched, so a failure leaves everything as it was.

use crate::models::{StockInput, StockUpdate};
use thiserror::Error;

/// Maximum length for designer table names
pub const MAX_TABLE_NAME_LENGTH: usize = 255;

/// Maximum length for designer field names
pub const MAX_FIELD_NAME_LENGTH: usize = 255;

/// Errors that can occur during input validation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// A name is already taken
    #[error("{field} '{name}' already exists")]
    Duplicate { field: &'static str, name: String },

    /// Nothing to export
    #[error("No stock data to export")]
    NoData,
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Both batch and stock numbers must be present.
///
/// # Examples
///
/// ```
/// use stock_pail::models::StockInput;
/// use stock_pail::validation::validate_stock_input;
///
/// assert!(validate_stock_input(&StockInput::new("BT001", "SK001")).is_ok());
/// assert!(validate_stock_input(&StockInput::new("BT001", "")).is_err());
/// ```
pub fn validate_stock_input(input: &StockInput) -> ValidationResult<()> {
    if input.batch_number.trim().is_empty() {
        return Err(ValidationError::Empty("batch number"));
    }
    if input.stock_number.trim().is_empty() {
        return Err(ValidationError::Empty("stock number"));
    }
    Ok(())
}

/// Present fields of an update must not blank out required values.
pub fn validate_stock_update(update: &StockUpdate) -> ValidationResult<()> {
    if let Some(batch) = &update.batch_number
        && batch.trim().is_empty()
    {
        return Err(ValidationError::Empty("batch number"));
    }
    if let Some(stock) = &update.stock_number
        && stock.trim().is_empty()
    {
        return Err(ValidationError::Empty("stock number"));
    }
    Ok(())
}

fn validate_name(name: &str, field: &'static str, max: usize) -> ValidationResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if trimmed.len() > max {
        return Err(ValidationError::TooLong {
            field,
            max,
            actual: trimmed.len(),
        });
    }
    Ok(())
}

/// Validate a new table name (non-empty after trimming, bounded length)
pub fn validate_table_name(name: &str) -> ValidationResult<()> {
    validate_name(name, "table name", MAX_TABLE_NAME_LENGTH)
}

/// Validate a field name (non-empty after trimming, bounded length)
pub fn validate_field_name(name: &str) -> ValidationResult<()> {
    validate_name(name, "field name", MAX_FIELD_NAME_LENGTH)
}
