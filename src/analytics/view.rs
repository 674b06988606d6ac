//! Search, sort and grouping for stock tables

use crate::models::InventoryRecord;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    BatchNumber,
    StockNumber,
    Quantity,
    DateAdded,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "batch" | "batch_number" | "batchnumber" => Ok(SortField::BatchNumber),
            "stock" | "stock_number" | "stocknumber" => Ok(SortField::StockNumber),
            "quantity" | "qty" => Ok(SortField::Quantity),
            "date" | "date_added" | "dateadded" => Ok(SortField::DateAdded),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort column and direction of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    /// Newest first
    fn default() -> Self {
        Self {
            field: SortField::DateAdded,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Clicking the current column flips the direction; a new column starts ascending
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Text columns compare case-insensitively
    pub fn compare(&self, a: &InventoryRecord, b: &InventoryRecord) -> Ordering {
        let ordering = match self.field {
            SortField::BatchNumber => a
                .batch_number
                .to_lowercase()
                .cmp(&b.batch_number.to_lowercase()),
            SortField::StockNumber => a
                .stock_number
                .to_lowercase()
                .cmp(&b.stock_number.to_lowercase()),
            SortField::Quantity => a.quantity.cmp(&b.quantity),
            SortField::DateAdded => a.date_added.cmp(&b.date_added),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Search term plus sort state of the stock table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub search: String,
    pub sort: SortState,
}

impl TableView {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Matching records in display order
    pub fn apply<'a>(&self, records: &'a [InventoryRecord]) -> Vec<&'a InventoryRecord> {
        let mut rows: Vec<&InventoryRecord> =
            records.iter().filter(|r| r.matches(&self.search)).collect();
        rows.sort_by(|a, b| self.sort.compare(a, b));
        rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    StockNumber,
    BatchNumber,
}

impl GroupBy {
    fn key<'a>(&self, record: &'a InventoryRecord) -> &'a str {
        match self {
            GroupBy::StockNumber => &record.stock_number,
            GroupBy::BatchNumber => &record.batch_number,
        }
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stock" | "stock_number" => Ok(GroupBy::StockNumber),
            "batch" | "batch_number" => Ok(GroupBy::BatchNumber),
            _ => Err(format!("Unknown grouping: {}", s)),
        }
    }
}

/// Records sharing one stock or batch number
#[derive(Debug, Clone, PartialEq)]
pub struct StockGroup<'a> {
    pub key: String,
    pub items: Vec<&'a InventoryRecord>,
    pub total_quantity: u64,
}

impl StockGroup<'_> {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl fmt::Display for StockGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} items, total quantity {})",
            self.key,
            self.item_count(),
            self.total_quantity
        )
    }
}

/// Group records by key; groups come back ordered by key, items newest first
pub fn group_by(records: &[InventoryRecord], by: GroupBy) -> Vec<StockGroup<'_>> {
    let mut groups: BTreeMap<&str, StockGroup<'_>> = BTreeMap::new();
    for record in records {
        let key = by.key(record);
        let group = groups.entry(key).or_insert_with(|| StockGroup {
            key: key.to_string(),
            items: Vec::new(),
            total_quantity: 0,
        });
        group.items.push(record);
        group.total_quantity += u64::from(record.quantity);
    }
    groups
        .into_values()
        .map(|mut group| {
            group.items.sort_by(|a, b| b.date_added.cmp(&a.date_added));
            group
        })
        .collect()
}
