//! Analytics and table views over an in-memory record list
//!
//! Nothing here touches a collaborator; every function works on a slice of
//! [`InventoryRecord`]s, usually [`StockService::records`].
//!
//! [`InventoryRecord`]: crate::models::InventoryRecord
//! [`StockService::records`]: crate::inventory::StockService::records

pub mod summary;
pub mod view;

// Re-export for convenience
pub use summary::{InventorySummary, Ranked};
pub use view::{GroupBy, SortDirection, SortField, SortState, StockGroup, TableView, group_by};
