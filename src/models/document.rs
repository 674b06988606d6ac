//! Uploaded document metadata and parse results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Broad file category used for parsing and preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Csv,
    Excel,
    Pdf,
    Image,
}

impl DocumentKind {
    /// Detect the kind from MIME type first, then file extension
    pub fn detect(file_name: &str, mime_type: &str) -> Option<DocumentKind> {
        let name = file_name.to_lowercase();
        if mime_type == "text/csv" || name.ends_with(".csv") {
            Some(DocumentKind::Csv)
        } else if mime_type == "application/vnd.ms-excel"
            || mime_type == "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            || name.ends_with(".xlsx")
            || name.ends_with(".xls")
        {
            Some(DocumentKind::Excel)
        } else if mime_type == "application/pdf" || name.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if mime_type.starts_with("image/") {
            Some(DocumentKind::Image)
        } else {
            None
        }
    }

    /// Whether a viewer can render the file inline
    pub fn previewable(&self) -> bool {
        matches!(self, DocumentKind::Pdf | DocumentKind::Image | DocumentKind::Csv)
    }
}

/// Best-effort result of the document parse function
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedDocument {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParsedDocument {
    pub fn failed(kind: DocumentKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            content: None,
            rows: None,
            columns: None,
            error: Some(error.into()),
        }
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

/// A document record as stored by the document store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
    pub file_type: String,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub processed: bool,
    #[serde(default)]
    pub parsed_data: Option<ParsedDocument>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::detect(&self.file_name, &self.file_type)
    }
}

/// Insert payload for a new document record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDocument {
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
    pub file_type: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// A file handed to upload or parse
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        assert_eq!(DocumentKind::detect("a.CSV", ""), Some(DocumentKind::Csv));
        assert_eq!(
            DocumentKind::detect("report", "application/pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::detect("pic", "image/png"), Some(DocumentKind::Image));
        assert_eq!(DocumentKind::detect("book.xlsx", ""), Some(DocumentKind::Excel));
        assert_eq!(DocumentKind::detect("notes.txt", "text/plain"), None);
    }

    #[test]
    fn test_parsed_document_uses_type_key() {
        let parsed = ParsedDocument::failed(DocumentKind::Pdf, "nope");
        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["type"], "pdf");
        assert_eq!(value["error"], "nope");
        assert!(value.get("content").is_none());
    }
}
