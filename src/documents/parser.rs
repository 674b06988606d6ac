//! In-process document parser
//!
//! Produces the same results as the hosted parse function, so documents can
//! be processed without a backend.

use crate::models::{DocumentKind, ParsedDocument, UploadFile};
use crate::storage::{DocumentParser, StorageError};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::debug;

const EXCEL_MESSAGE: &str = "Excel file detected. For best results, please convert to CSV format.";
const EXCEL_ERROR: &str = "Excel parsing requires client-side library. Please use CSV format.";
const PDF_MESSAGE: &str = "PDF file uploaded successfully";
const PDF_ERROR: &str = "PDF text extraction not yet implemented. File stored successfully.";
const IMAGE_MESSAGE: &str = "Image file uploaded successfully";
const UNSUPPORTED_ERROR: &str = "Unsupported file type";

/// Parser for CSV content; other kinds only get a status message
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalDocumentParser;

impl LocalDocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Header-keyed rows; missing trailing values become empty strings
    pub fn parse_csv(text: &str) -> ParsedDocument {
        let mut lines = text.trim().split('\n');
        let columns: Vec<String> = lines
            .next()
            .unwrap_or_default()
            .split(',')
            .map(|h| h.trim().to_string())
            .collect();

        let rows: Vec<Value> = lines
            .map(|line| {
                let values: Vec<&str> = line.split(',').map(str::trim).collect();
                let row: Map<String, Value> = columns
                    .iter()
                    .enumerate()
                    .map(|(i, header)| {
                        let value = values.get(i).copied().unwrap_or_default();
                        (header.clone(), Value::String(value.to_string()))
                    })
                    .collect();
                Value::Object(row)
            })
            .collect();

        ParsedDocument {
            kind: DocumentKind::Csv,
            rows: Some(rows.len()),
            content: Some(Value::Array(rows)),
            columns: Some(columns),
            error: None,
        }
    }

    fn with_message(kind: DocumentKind, message: &str, error: Option<&str>) -> ParsedDocument {
        ParsedDocument {
            kind,
            content: Some(json!({ "message": message })),
            rows: None,
            columns: None,
            error: error.map(str::to_string),
        }
    }

    /// Parse synchronously
    pub fn parse_file(&self, file: &UploadFile) -> ParsedDocument {
        debug!(
            file = %file.name,
            mime = %file.mime_type,
            size = file.size(),
            "Parsing document"
        );
        match DocumentKind::detect(&file.name, &file.mime_type) {
            Some(DocumentKind::Csv) => Self::parse_csv(&String::from_utf8_lossy(&file.bytes)),
            Some(DocumentKind::Excel) => {
                Self::with_message(DocumentKind::Excel, EXCEL_MESSAGE, Some(EXCEL_ERROR))
            }
            Some(DocumentKind::Pdf) => {
                Self::with_message(DocumentKind::Pdf, PDF_MESSAGE, Some(PDF_ERROR))
            }
            Some(DocumentKind::Image) => {
                Self::with_message(DocumentKind::Image, IMAGE_MESSAGE, None)
            }
            None => ParsedDocument::failed(DocumentKind::Csv, UNSUPPORTED_ERROR),
        }
    }
}

#[async_trait(?Send)]
impl DocumentParser for LocalDocumentParser {
    async fn parse(&self, file: &UploadFile) -> Result<ParsedDocument, StorageError> {
        Ok(self.parse_file(file))
    }
}
