//! SQL Import functionality
//!
//! Extracts `CREATE TABLE` statements from free text with regular expressions.
//! This is a best-effort heuristic, not a SQL grammar:
//! - the body is split on every comma, so `NUMERIC(10,2)` is cut in two
//! - the first token of a fragment is the name, the second the type
//! - constraints are found by substring search over the fragment
//!
//! `ALTER TABLE <name> ENABLE ROW LEVEL SECURITY` sets the flag on a table
//! found in the same text.
//!
//! Parsing never fails. Unclassifiable types fall back to `TEXT` and a text
//! with no statements yields zero tables plus [`ImportError::NoStatements`].

use super::{ImportError, SchemaImportResult};
use crate::models::{FieldType, SchemaField, SchemaTable};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

static CREATE_TABLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?([\w.]+)\s*\((.*?)\)\s*;")
        .unwrap()
});

static NOT_NULL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bNOT\s+NULL\b").unwrap());

static PRIMARY_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bPRIMARY\s+KEY\b").unwrap());

static UNIQUE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bUNIQUE\b").unwrap());

static DEFAULT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bDEFAULT\s+(\S+)").unwrap());

static ENABLE_RLS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ALTER\s+TABLE\s+([\w.]+)\s+ENABLE\s+ROW\s+LEVEL\s+SECURITY").unwrap()
});

/// Leading keywords of table-level constraints, which are not columns
const TABLE_CONSTRAINT_KEYWORDS: [&str; 5] = ["CONSTRAINT", "PRIMARY", "FOREIGN", "UNIQUE", "CHECK"];

/// SQL Importer - parses CREATE TABLE statements
#[derive(Debug, Default, Clone, Copy)]
pub struct SQLImporter;

impl SQLImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse SQL and extract table definitions
    pub fn parse(&self, sql: &str) -> SchemaImportResult {
        let mut tables: Vec<SchemaTable> = CREATE_TABLE_REGEX
            .captures_iter(sql)
            .map(|caps| {
                let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let body = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                let fields: Vec<SchemaField> = body.split(',').filter_map(parse_field).collect();
                debug!(table = name, fields = fields.len(), "Parsed CREATE TABLE");
                SchemaTable::with_fields(name, fields)
            })
            .collect();

        for caps in ENABLE_RLS_REGEX.captures_iter(sql) {
            let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            for table in tables.iter_mut().filter(|t| t.name.eq_ignore_ascii_case(name)) {
                table.enable_row_security = true;
            }
        }

        let mut errors = Vec::new();
        if tables.is_empty() {
            errors.push(ImportError::NoStatements);
        }
        info!(tables = tables.len(), "SQL import finished");

        SchemaImportResult { tables, errors }
    }
}

fn strip_quotes(token: &str) -> &str {
    token.trim_matches(|c| c == '"' || c == '`' || c == '[' || c == ']')
}

/// Turn one comma-separated body fragment into a field
fn parse_field(fragment: &str) -> Option<SchemaField> {
    let fragment = fragment.trim();
    let mut tokens = fragment.split_whitespace();
    let name = strip_quotes(tokens.next()?);
    if name.is_empty()
        || TABLE_CONSTRAINT_KEYWORDS
            .iter()
            .any(|k| name.eq_ignore_ascii_case(k))
    {
        return None;
    }

    let field_type = tokens
        .next()
        .map(FieldType::classify)
        .unwrap_or(FieldType::Text);

    let mut field = SchemaField::new(name, field_type);
    field.nullable = !NOT_NULL_REGEX.is_match(fragment);
    field.primary_key = PRIMARY_KEY_REGEX.is_match(fragment);
    field.unique = UNIQUE_REGEX.is_match(fragment);
    if let Some(default) = DEFAULT_REGEX.captures(fragment).and_then(|c| c.get(1)) {
        field.default_value = default.as_str().to_string();
    }
    Some(field)
}
