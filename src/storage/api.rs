//! API backend
//!
//! Implements every collaborator trait over a PostgREST-style HTTP API:
//! - tables under `/rest/v1/<table>` with `eq.` filters and `order=` sorting
//! - objects under `/storage/v1/object/<bucket>/<path>`
//! - the parse function under `/functions/v1/<name>` (multipart upload)
//!
//! Every request carries the `apikey` header and a bearer token: the session
//! token when one is set, the API key otherwise.
//!
//! ## Security
//!
//! Record ids and object paths are validated before they are placed in a URL
//! and percent-encoded afterwards.

use super::{
    DocumentParser, DocumentStore, FileStore, OrderBy, RecordStore, StorageError,
};
use crate::config::{BackendConfig, ConfigError};
use crate::models::{
    Document, NewDocument, NewStockRow, ParsedDocument, StockRow, StockUpdate, UploadFile,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Maximum allowed length for ids and object paths
const MAX_KEY_LENGTH: usize = 512;

/// Validate a record id for use in a filter expression
fn validate_record_id(id: &str) -> Result<(), StorageError> {
    if id.is_empty() {
        return Err(StorageError::BackendError(
            "Record id cannot be empty".to_string(),
        ));
    }
    if id.len() > MAX_KEY_LENGTH {
        return Err(StorageError::BackendError(format!(
            "Record id too long (max {} characters)",
            MAX_KEY_LENGTH
        )));
    }
    if !id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Err(StorageError::BackendError(
            "Record id contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate an object path inside the bucket
fn validate_object_path(path: &str) -> Result<(), StorageError> {
    if path.trim().is_empty() {
        return Err(StorageError::BackendError(
            "Object path cannot be empty".to_string(),
        ));
    }
    if path.len() > MAX_KEY_LENGTH {
        return Err(StorageError::BackendError(format!(
            "Object path too long (max {} characters)",
            MAX_KEY_LENGTH
        )));
    }
    if path.starts_with('/') || path.split('/').any(|s| s.is_empty() || s == "." || s == "..") {
        return Err(StorageError::PermissionDenied(format!(
            "Invalid object path: {}",
            path
        )));
    }
    Ok(())
}

fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// HTTP backend for records, objects and the parse function
pub struct ApiBackend {
    base_url: String,
    api_key: Option<String>,
    auth_token: Option<String>,
    names: BackendConfig,
    client: reqwest::Client,
}

impl ApiBackend {
    /// Create a backend with the default table, bucket and function names
    ///
    /// # Example
    ///
    /// ```rust
    /// use stock_pail::storage::api::ApiBackend;
    ///
    /// let backend = ApiBackend::new(
    ///     "https://project.example.co",
    ///     Some("public-anon-key".to_string()),
    /// );
    /// assert_eq!(backend.base_url(), "https://project.example.co");
    /// ```
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            auth_token: None,
            names: BackendConfig::default(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a backend from the `[backend]` config section
    pub fn from_config(config: &BackendConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url()?.to_string();
        Ok(Self {
            base_url,
            api_key: config.api_key.clone(),
            auth_token: None,
            names: config.clone(),
            client: reqwest::Client::new(),
        })
    }

    /// Use a signed-in session token instead of the API key as bearer
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with authentication headers
    fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);

        if let Some(ref key) = self.api_key {
            request = request.header("apikey", key);
        }
        if let Some(bearer) = self.auth_token.as_ref().or(self.api_key.as_ref()) {
            request = request.header("Authorization", format!("Bearer {}", bearer));
        }

        request
    }

    fn table_path(table: &str, query: &str) -> String {
        format!("/rest/v1/{}?{}", urlencoding::encode(table), query)
    }

    fn object_path(&self, path: &str) -> String {
        format!(
            "/storage/v1/object/{}/{}",
            urlencoding::encode(&self.names.documents_bucket),
            encode_object_path(path)
        )
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, StorageError> {
        let response = request
            .send()
            .await
            .map_err(|e| StorageError::NetworkError(format!("Failed to {}: {}", what, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, what, "Backend request failed");
        Err(match status {
            StatusCode::NOT_FOUND => StorageError::FileNotFound(what.to_string()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                StorageError::PermissionDenied(format!("{}: {}", what, status))
            }
            _ => StorageError::BackendError(format!("{} failed ({}): {}", what, status, body)),
        })
    }

    async fn json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, StorageError> {
        response.json().await.map_err(|e| {
            StorageError::SerializationError(format!("Failed to parse {}: {}", what, e))
        })
    }

    /// First row of a `return=representation` response
    async fn single<T: DeserializeOwned>(
        response: Response,
        what: &str,
        id: &str,
    ) -> Result<T, StorageError> {
        let rows: Vec<T> = Self::json(response, what).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StorageError::RecordNotFound(id.to_string()))
    }
}

#[async_trait(?Send)]
impl RecordStore for ApiBackend {
    async fn list(&self, order: &OrderBy) -> Result<Vec<StockRow>, StorageError> {
        let path = Self::table_path(
            &self.names.stocks_table,
            &format!("select=*&order={}", urlencoding::encode(&order.to_query())),
        );
        let response = self
            .send(self.build_request(Method::GET, &path), "list stocks")
            .await?;
        let rows: Vec<StockRow> = Self::json(response, "stocks").await?;
        debug!(rows = rows.len(), "Loaded stock rows");
        Ok(rows)
    }

    async fn create(&self, row: &NewStockRow) -> Result<StockRow, StorageError> {
        let path = Self::table_path(&self.names.stocks_table, "select=*");
        let request = self
            .build_request(Method::POST, &path)
            .header("Prefer", "return=representation")
            .json(row);
        let response = self.send(request, "create stock").await?;
        Self::single(response, "created stock", &row.stock_number).await
    }

    async fn update(&self, id: &str, changes: &StockUpdate) -> Result<StockRow, StorageError> {
        validate_record_id(id)?;
        let path = Self::table_path(
            &self.names.stocks_table,
            &format!("id=eq.{}&select=*", urlencoding::encode(id)),
        );
        let request = self
            .build_request(Method::PATCH, &path)
            .header("Prefer", "return=representation")
            .json(changes);
        let response = self.send(request, "update stock").await?;
        Self::single(response, "updated stock", id).await
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        validate_record_id(id)?;
        let path = Self::table_path(
            &self.names.stocks_table,
            &format!("id=eq.{}", urlencoding::encode(id)),
        );
        self.send(self.build_request(Method::DELETE, &path), "delete stock")
            .await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl DocumentStore for ApiBackend {
    async fn list(&self) -> Result<Vec<Document>, StorageError> {
        let path = Self::table_path(
            &self.names.documents_table,
            "select=*&order=uploaded_at.desc",
        );
        let response = self
            .send(self.build_request(Method::GET, &path), "list documents")
            .await?;
        Self::json(response, "documents").await
    }

    async fn create(&self, document: &NewDocument) -> Result<Document, StorageError> {
        let path = Self::table_path(&self.names.documents_table, "select=*");
        let request = self
            .build_request(Method::POST, &path)
            .header("Prefer", "return=representation")
            .json(document);
        let response = self.send(request, "create document").await?;
        Self::single(response, "created document", &document.file_path).await
    }

    async fn mark_processed(
        &self,
        id: &str,
        parsed: &ParsedDocument,
    ) -> Result<(), StorageError> {
        validate_record_id(id)?;
        let path = Self::table_path(
            &self.names.documents_table,
            &format!("id=eq.{}", urlencoding::encode(id)),
        );
        let body = serde_json::json!({ "processed": true, "parsed_data": parsed });
        self.send(
            self.build_request(Method::PATCH, &path).json(&body),
            "update document",
        )
        .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        validate_record_id(id)?;
        let path = Self::table_path(
            &self.names.documents_table,
            &format!("id=eq.{}", urlencoding::encode(id)),
        );
        self.send(self.build_request(Method::DELETE, &path), "delete document")
            .await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl FileStore for ApiBackend {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        validate_object_path(path)?;
        let request = self
            .build_request(Method::POST, &self.object_path(path))
            .header("Content-Type", "application/octet-stream")
            .body(bytes.to_vec());
        self.send(request, "upload object").await?;
        debug!(path, size = bytes.len(), "Uploaded object");
        Ok(())
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        validate_object_path(path)?;
        let response = self
            .send(
                self.build_request(Method::GET, &self.object_path(path)),
                "download object",
            )
            .await
            .map_err(|e| match e {
                StorageError::FileNotFound(_) => StorageError::FileNotFound(path.to_string()),
                other => other,
            })?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::NetworkError(format!("Failed to read object: {}", e)))?;
        Ok(bytes.to_vec())
    }

    async fn remove(&self, paths: &[String]) -> Result<(), StorageError> {
        for path in paths {
            validate_object_path(path)?;
        }
        let url = format!(
            "/storage/v1/object/{}",
            urlencoding::encode(&self.names.documents_bucket)
        );
        let body = serde_json::json!({ "prefixes": paths });
        self.send(
            self.build_request(Method::DELETE, &url).json(&body),
            "remove objects",
        )
        .await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl DocumentParser for ApiBackend {
    async fn parse(&self, file: &UploadFile) -> Result<ParsedDocument, StorageError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| StorageError::BackendError(format!("Invalid MIME type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let path = format!(
            "/functions/v1/{}",
            urlencoding::encode(&self.names.parse_function)
        );
        let response = self
            .send(
                self.build_request(Method::POST, &path).multipart(form),
                "parse document",
            )
            .await?;
        Self::json(response, "parse result").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id("0b5c3e1a-9d2f-4c8e-b7a6-1f2e3d4c5b6a").is_ok());
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("1&select=*").is_err());
        assert!(validate_record_id(&"a".repeat(513)).is_err());
    }

    #[test]
    fn test_validate_object_path() {
        assert!(validate_object_path("1700000000000-report.pdf").is_ok());
        assert!(validate_object_path("2024/invoices/a.pdf").is_ok());
        assert!(validate_object_path("").is_err());
        assert!(matches!(
            validate_object_path("../secret"),
            Err(StorageError::PermissionDenied(_))
        ));
        assert!(validate_object_path("/abs").is_err());
        assert!(validate_object_path("a//b").is_err());
    }

    #[test]
    fn test_paths_are_encoded() {
        let backend = ApiBackend::new("https://x.example.co/", None);
        assert_eq!(backend.base_url(), "https://x.example.co");
        assert_eq!(
            backend.object_path("17-my file.csv"),
            "/storage/v1/object/documents/17-my%20file.csv"
        );
        assert_eq!(
            ApiBackend::table_path("stocks", "select=*"),
            "/rest/v1/stocks?select=*"
        );
    }

    #[test]
    fn test_from_config_requires_url() {
        assert!(ApiBackend::from_config(&BackendConfig::default()).is_err());
        let config = BackendConfig {
            url: Some("https://x.example.co".to_string()),
            ..BackendConfig::default()
        };
        assert!(ApiBackend::from_config(&config).is_ok());
    }
}
