//! Stock record model
//!
//! Two shapes exist for the same data: [`InventoryRecord`] is the camelCase
//! in-memory/export shape, [`StockRow`] is the snake_case shape the record
//! store persists. Conversions between them live here.

use super::enums::{QuantityLevel, StockStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stock line as held in memory and exported to JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Opaque identifier assigned by the record store
    pub id: String,
    pub batch_number: String,
    pub stock_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub status: StockStatus,
    pub date_added: DateTime<Utc>,
}

impl InventoryRecord {
    pub fn level(&self) -> QuantityLevel {
        QuantityLevel::classify(self.quantity)
    }

    /// Case-insensitive match against batch, stock and description
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.batch_number.to_lowercase().contains(&term)
            || self.stock_number.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// Fields accepted when creating a record (no id, no date)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockInput {
    pub batch_number: String,
    pub stock_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub status: StockStatus,
}

impl StockInput {
    pub fn new(batch_number: impl Into<String>, stock_number: impl Into<String>) -> Self {
        Self {
            batch_number: batch_number.into(),
            stock_number: stock_number.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_status(mut self, status: StockStatus) -> Self {
        self.status = status;
        self
    }

    /// Payload sent to the record store on insert
    pub fn to_new_row(&self) -> NewStockRow {
        NewStockRow {
            batch_number: self.batch_number.clone(),
            stock_number: self.stock_number.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
            status: self.status,
        }
    }
}

/// Partial update; only fields that are `Some` reach the store
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StockUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
}

impl StockUpdate {
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.batch_number.is_none()
            && self.stock_number.is_none()
            && self.description.is_none()
            && self.quantity.is_none()
            && self.status.is_none()
    }

    /// Apply the present fields to a row in place
    pub fn apply_to(&self, row: &mut StockRow) {
        if let Some(batch) = &self.batch_number {
            row.batch_number = batch.clone();
        }
        if let Some(stock) = &self.stock_number {
            row.stock_number = stock.clone();
        }
        if let Some(description) = &self.description {
            row.description = description.clone();
        }
        if let Some(quantity) = self.quantity {
            row.quantity = quantity;
        }
        if let Some(status) = self.status {
            row.status = Some(status);
        }
    }
}

/// Insert payload in the store's snake_case shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewStockRow {
    pub batch_number: String,
    pub stock_number: String,
    pub description: String,
    pub quantity: u32,
    pub status: StockStatus,
}

/// A persisted row as returned by the record store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockRow {
    pub id: String,
    pub batch_number: String,
    pub stock_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
    pub date_added: DateTime<Utc>,
}

impl From<StockRow> for InventoryRecord {
    fn from(row: StockRow) -> Self {
        Self {
            id: row.id,
            batch_number: row.batch_number,
            stock_number: row.stock_number,
            description: row.description,
            quantity: row.quantity,
            status: row.status.unwrap_or_default(),
            date_added: row.date_added,
        }
    }
}

impl From<&InventoryRecord> for StockRow {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            id: record.id.clone(),
            batch_number: record.batch_number.clone(),
            stock_number: record.stock_number.clone(),
            description: record.description.clone(),
            quantity: record.quantity,
            status: Some(record.status),
            date_added: record.date_added,
        }
    }
}
