//! Inventory service tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use stock_pail::import::ImportError;
use stock_pail::inventory::{OperationError, StockService};
use stock_pail::models::{NewStockRow, StockInput, StockRow, StockStatus, StockUpdate};
use stock_pail::storage::{MemoryRecordStore, OrderBy, RecordStore, StorageError};
use stock_pail::validation::ValidationError;

fn row(id: &str, stock: &str, day: u32) -> StockRow {
    StockRow {
        id: id.to_string(),
        batch_number: "BT001".to_string(),
        stock_number: stock.to_string(),
        description: String::new(),
        quantity: 1,
        status: None,
        date_added: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
    }
}

/// Memory store that refuses to create one stock number and can fail listing
#[derive(Default)]
struct FlakyStore {
    inner: MemoryRecordStore,
    reject_stock: String,
    fail_list: AtomicBool,
}

#[async_trait(?Send)]
impl RecordStore for FlakyStore {
    async fn list(&self, order: &OrderBy) -> Result<Vec<StockRow>, StorageError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(StorageError::NetworkError("connection reset".to_string()));
        }
        self.inner.list(order).await
    }

    async fn create(&self, row: &NewStockRow) -> Result<StockRow, StorageError> {
        if row.stock_number == self.reject_stock {
            return Err(StorageError::BackendError("duplicate key".to_string()));
        }
        self.inner.create(row).await
    }

    async fn update(&self, id: &str, changes: &StockUpdate) -> Result<StockRow, StorageError> {
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.inner.delete(id).await
    }
}

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn test_refresh_orders_newest_first() {
        let store = MemoryRecordStore::with_rows(vec![
            row("a", "SK-A", 1),
            row("c", "SK-C", 3),
            row("b", "SK-B", 2),
        ]);
        let mut service = StockService::new(store);
        let records = service.refresh().await.unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(records[0].status, StockStatus::Available);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_list() {
        let store = FlakyStore {
            inner: MemoryRecordStore::with_rows(vec![row("a", "SK-A", 1)]),
            ..FlakyStore::default()
        };
        let mut service = StockService::new(store);
        service.refresh().await.unwrap();

        service.store().fail_list.store(true, Ordering::SeqCst);
        let err = service.refresh().await.unwrap_err();
        assert!(matches!(
            err,
            OperationError::Collaborator(StorageError::NetworkError(_))
        ));
        assert_eq!(service.records().len(), 1);
        assert_eq!(service.records()[0].id, "a");
    }
}

mod edit_tests {
    use super::*;

    #[tokio::test]
    async fn test_add_prepends() {
        let store = MemoryRecordStore::with_rows(vec![row("a", "SK-A", 1)]);
        let mut service = StockService::new(store);
        service.refresh().await.unwrap();

        let added = service
            .add(StockInput::new("BT002", "SK-NEW").with_quantity(12))
            .await
            .unwrap();
        assert_eq!(service.records()[0], added);
        assert_eq!(service.records().len(), 2);
        assert_eq!(added.quantity, 12);
        assert_eq!(service.store().len(), 2);
    }

    #[tokio::test]
    async fn test_add_requires_both_numbers() {
        let mut service = StockService::new(MemoryRecordStore::new());
        let err = service
            .add(StockInput::new("BT001", "  "))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OperationError::Validation(ValidationError::Empty("stock number"))
        ));
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let store = MemoryRecordStore::with_rows(vec![row("a", "SK-A", 1), row("b", "SK-B", 2)]);
        let mut service = StockService::new(store);
        service.refresh().await.unwrap();

        let changes = StockUpdate {
            status: Some(StockStatus::Shipped),
            ..StockUpdate::quantity(40)
        };
        let updated = service.update("a", changes).await.unwrap();
        assert_eq!(updated.quantity, 40);
        assert_eq!(updated.stock_number, "SK-A");

        let ids: Vec<&str> = service.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(service.get("a").unwrap().status, StockStatus::Shipped);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let mut service = StockService::new(MemoryRecordStore::new());
        let err = service
            .update("missing", StockUpdate::quantity(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OperationError::Collaborator(StorageError::RecordNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemoryRecordStore::with_rows(vec![row("a", "SK-A", 1), row("b", "SK-B", 2)]);
        let mut service = StockService::new(store);
        service.refresh().await.unwrap();

        service.delete("a").await.unwrap();
        assert!(service.get("a").is_none());
        assert_eq!(service.records().len(), 1);
        assert_eq!(service.store().len(), 1);
    }
}

mod import_tests {
    use super::*;

    #[tokio::test]
    async fn test_import_counts_created_and_failed_rows() {
        let store = FlakyStore {
            reject_stock: "SK3".to_string(),
            ..FlakyStore::default()
        };
        let mut service = StockService::new(store);

        let csv = "batch,stock,qty\nB1,SK1,5\nB1,,2\nB1,SK3,1\nB2,SK4,9";
        let summary = service.import_csv(csv).await.unwrap();

        assert_eq!(summary.imported(), 2);
        assert_eq!(summary.failed(), 2);
        assert_eq!(summary.to_string(), "Imported 2 items. 2 failed.");
        assert_eq!(summary.failures[0].line, 3);
        assert_eq!(summary.failures[1].line, 4);
        assert!(summary.failures[1].reason.contains("duplicate key"));

        // Each created row was prepended in turn
        let stocks: Vec<&str> = service
            .records()
            .iter()
            .map(|r| r.stock_number.as_str())
            .collect();
        assert_eq!(stocks, vec!["SK4", "SK1"]);
    }

    #[tokio::test]
    async fn test_missing_header_creates_nothing() {
        let mut service = StockService::new(MemoryRecordStore::new());
        let err = service
            .import_csv("name,qty\nwidget,3")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OperationError::Import(ImportError::MissingRequiredColumns { .. })
        ));
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn test_empty_paste_rejected() {
        let mut service = StockService::new(MemoryRecordStore::new());
        let err = service.import_csv("   ").await.unwrap_err();
        assert_eq!(err.to_string(), "Please paste CSV data to import");
    }

    #[cfg(feature = "xlsx")]
    #[tokio::test]
    async fn test_import_exported_workbook() {
        use stock_pail::export::SpreadsheetExporter;

        let mut source = StockService::new(MemoryRecordStore::new());
        source
            .add(StockInput::new("BT9", "SK9").with_description("Bolts").with_quantity(7))
            .await
            .unwrap();
        let workbook = SpreadsheetExporter
            .export_xlsx(source.records(), Utc::now())
            .unwrap();

        let mut target = StockService::new(MemoryRecordStore::new());
        let summary = target.import_spreadsheet(&workbook.content).await.unwrap();
        assert_eq!(summary.imported(), 1);
        assert_eq!(summary.records[0].description, "Bolts");
        assert_eq!(summary.records[0].quantity, 7);
    }
}
