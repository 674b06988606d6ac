//! Document operations over the three document collaborators

use crate::inventory::OperationError;
use crate::models::{Document, NewDocument, UploadFile};
use crate::storage::{DocumentParser, DocumentStore, FileStore};
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Object path for an upload: `<unix-ms>-<file name>`
pub fn object_path(file_name: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}", at.timestamp_millis(), file_name)
}

pub struct DocumentService<D, F, P>
where
    D: DocumentStore,
    F: FileStore,
    P: DocumentParser,
{
    documents: D,
    files: F,
    parser: P,
}

impl<D, F, P> DocumentService<D, F, P>
where
    D: DocumentStore,
    F: FileStore,
    P: DocumentParser,
{
    pub fn new(documents: D, files: F, parser: P) -> Self {
        Self {
            documents,
            files,
            parser,
        }
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    /// Every document, newest upload first
    pub async fn list(&self) -> Result<Vec<Document>, OperationError> {
        Ok(self.documents.list().await?)
    }

    /// Store the bytes, insert the record, then parse.
    ///
    /// The returned record reflects the parse outcome. A parse error or a
    /// result without content leaves the record unprocessed.
    pub async fn upload(
        &self,
        file: &UploadFile,
        category: Option<String>,
        description: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<Document, OperationError> {
        if file.name.trim().is_empty() {
            return Err(ValidationError::Empty("file name").into());
        }

        let path = object_path(&file.name, at);
        self.files.upload(&path, &file.bytes).await?;

        let mut document = self
            .documents
            .create(&NewDocument {
                file_name: file.name.clone(),
                file_path: path,
                file_size: file.size(),
                file_type: file.mime_type.clone(),
                category: category.filter(|c| !c.trim().is_empty()),
                description: description.filter(|d| !d.trim().is_empty()),
            })
            .await?;
        info!(id = %document.id, path = %document.file_path, "Uploaded document");

        match self.parser.parse(file).await {
            Ok(parsed) if parsed.has_content() => {
                match self.documents.mark_processed(&document.id, &parsed).await {
                    Ok(()) => {
                        document.processed = true;
                        document.parsed_data = Some(parsed);
                    }
                    Err(e) => warn!(id = %document.id, error = %e, "Failed to store parse result"),
                }
            }
            Ok(parsed) => warn!(
                id = %document.id,
                error = parsed.error.as_deref().unwrap_or("no content"),
                "Document parsing produced no content"
            ),
            Err(e) => warn!(id = %document.id, error = %e, "Document parsing failed"),
        }

        Ok(document)
    }

    pub async fn download(&self, document: &Document) -> Result<Vec<u8>, OperationError> {
        Ok(self.files.download(&document.file_path).await?)
    }

    /// Remove the stored object, then the record
    pub async fn delete(&self, document: &Document) -> Result<(), OperationError> {
        self.files
            .remove(std::slice::from_ref(&document.file_path))
            .await?;
        self.documents.delete(&document.id).await?;
        info!(id = %document.id, "Deleted document");
        Ok(())
    }
}
