//! In-memory collaborators
//!
//! Stores backed by a mutex-guarded vector or map. Ids are UUID v4 strings and
//! timestamps are taken from the system clock at insert time.

use super::{DocumentStore, FileStore, OrderBy, RecordStore, StorageError};
use crate::models::{Document, NewDocument, NewStockRow, ParsedDocument, StockRow, StockUpdate};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|_| StorageError::BackendError("Store lock poisoned".to_string()))
}

fn compare_rows(a: &StockRow, b: &StockRow, column: &str) -> std::cmp::Ordering {
    match column {
        "batch_number" => a.batch_number.cmp(&b.batch_number),
        "stock_number" => a.stock_number.cmp(&b.stock_number),
        "description" => a.description.cmp(&b.description),
        "quantity" => a.quantity.cmp(&b.quantity),
        _ => a.date_added.cmp(&b.date_added),
    }
}

/// Stock rows kept in process memory
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    rows: Mutex<Vec<StockRow>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing rows
    pub fn with_rows(rows: Vec<StockRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait(?Send)]
impl RecordStore for MemoryRecordStore {
    async fn list(&self, order: &OrderBy) -> Result<Vec<StockRow>, StorageError> {
        let mut rows = lock(&self.rows)?.clone();
        rows.sort_by(|a, b| {
            let ordering = compare_rows(a, b, &order.column);
            if order.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        Ok(rows)
    }

    async fn create(&self, row: &NewStockRow) -> Result<StockRow, StorageError> {
        let stored = StockRow {
            id: Uuid::new_v4().to_string(),
            batch_number: row.batch_number.clone(),
            stock_number: row.stock_number.clone(),
            description: row.description.clone(),
            quantity: row.quantity,
            status: Some(row.status),
            date_added: Utc::now(),
        };
        lock(&self.rows)?.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, changes: &StockUpdate) -> Result<StockRow, StorageError> {
        let mut rows = lock(&self.rows)?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::RecordNotFound(id.to_string()))?;
        changes.apply_to(row);
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut rows = lock(&self.rows)?;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(StorageError::RecordNotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Document records kept in process memory
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<Vec<Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single record
    pub fn get(&self, id: &str) -> Option<Document> {
        self.documents
            .lock()
            .ok()
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned())
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self) -> Result<Vec<Document>, StorageError> {
        let mut documents = lock(&self.documents)?.clone();
        documents.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(documents)
    }

    async fn create(&self, document: &NewDocument) -> Result<Document, StorageError> {
        let now = Utc::now();
        let stored = Document {
            id: Uuid::new_v4().to_string(),
            file_name: document.file_name.clone(),
            file_path: document.file_path.clone(),
            file_size: document.file_size,
            file_type: document.file_type.clone(),
            uploaded_by: None,
            uploaded_at: now,
            processed: false,
            parsed_data: None,
            category: document.category.clone(),
            description: document.description.clone(),
            created_at: now,
            updated_at: now,
        };
        lock(&self.documents)?.push(stored.clone());
        Ok(stored)
    }

    async fn mark_processed(
        &self,
        id: &str,
        parsed: &ParsedDocument,
    ) -> Result<(), StorageError> {
        let mut documents = lock(&self.documents)?;
        let document = documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StorageError::RecordNotFound(id.to_string()))?;
        document.processed = true;
        document.parsed_data = Some(parsed.clone());
        document.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut documents = lock(&self.documents)?;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Err(StorageError::RecordNotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Object bytes kept in process memory, keyed by path
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects
            .lock()
            .map(|objects| objects.contains_key(path))
            .unwrap_or(false)
    }

    /// Stored object paths in lexical order
    pub fn paths(&self) -> Vec<String> {
        self.objects
            .lock()
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait(?Send)]
impl FileStore for MemoryFileStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let mut objects = lock(&self.objects)?;
        if objects.contains_key(path) {
            return Err(StorageError::BackendError(format!(
                "Object already exists: {}",
                path
            )));
        }
        objects.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        lock(&self.objects)?
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::FileNotFound(path.to_string()))
    }

    async fn remove(&self, paths: &[String]) -> Result<(), StorageError> {
        let mut objects = lock(&self.objects)?;
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StockInput;

    #[tokio::test]
    async fn test_record_store_orders_and_updates() {
        let store = MemoryRecordStore::new();
        let first = store
            .create(&StockInput::new("B1", "S1").with_quantity(3).to_new_row())
            .await
            .unwrap();
        store
            .create(&StockInput::new("B2", "S2").to_new_row())
            .await
            .unwrap();

        let by_quantity = store.list(&OrderBy::descending("quantity")).await.unwrap();
        assert_eq!(by_quantity[0].id, first.id);

        let updated = store
            .update(&first.id, &StockUpdate::quantity(12))
            .await
            .unwrap();
        assert_eq!(updated.quantity, 12);
        assert_eq!(updated.batch_number, "B1");

        store.delete(&first.id).await.unwrap();
        assert!(matches!(
            store.delete(&first.id).await,
            Err(StorageError::RecordNotFound(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let store = MemoryFileStore::new();
        store.upload("1-a.csv", b"x,y").await.unwrap();
        assert!(store.upload("1-a.csv", b"again").await.is_err());
        assert_eq!(store.download("1-a.csv").await.unwrap(), b"x,y");
        store.remove(&["1-a.csv".to_string()]).await.unwrap();
        assert!(matches!(
            store.download("1-a.csv").await,
            Err(StorageError::FileNotFound(_))
        ));
    }
}
