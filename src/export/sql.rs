//! SQL exporter.
//!
//! Two outputs share this module:
//! - a stock dump: a fixed `stocks` table definition followed by one
//!   `INSERT` per record
//! - the schema designer's `CREATE TABLE` script
//!
//! # Escaping
//!
//! String literals in the stock dump are escaped by doubling single quotes.
//! The output is a downloadable file and is never executed from here.

use super::{
    ExportError, ExportFormat, ExportResult, ensure_records, file_name, iso_timestamp,
};
use crate::models::{InventoryRecord, SchemaTable};
use chrono::{DateTime, Utc};

/// Table definition written at the top of every stock dump
pub const STOCKS_TABLE_DDL: &str = "CREATE TABLE IF NOT EXISTS stocks (
  id VARCHAR(36) PRIMARY KEY,
  batch_number VARCHAR(255) NOT NULL,
  stock_number VARCHAR(255) NOT NULL,
  description TEXT,
  quantity INTEGER DEFAULT 0,
  date_added TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);";

/// Exporter for SQL format.
pub struct SQLExporter;

impl SQLExporter {
    /// Quote a string literal, doubling embedded single quotes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stock_pail::export::sql::SQLExporter;
    ///
    /// assert_eq!(SQLExporter::quote_literal("O'Brien"), "'O''Brien'");
    /// ```
    pub fn quote_literal(value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Render one `INSERT INTO stocks` statement
    pub fn insert_statement(record: &InventoryRecord) -> String {
        format!(
            "INSERT INTO stocks (id, batch_number, stock_number, description, quantity, date_added) VALUES ({}, {}, {}, {}, {}, {});",
            Self::quote_literal(&record.id),
            Self::quote_literal(&record.batch_number),
            Self::quote_literal(&record.stock_number),
            Self::quote_literal(&record.description),
            record.quantity,
            Self::quote_literal(&iso_timestamp(&record.date_added)),
        )
    }

    /// Render the full stock dump
    pub fn stocks_to_sql(records: &[InventoryRecord]) -> String {
        let mut sql = String::from("-- Stock Data Export\n\n");
        sql.push_str(STOCKS_TABLE_DDL);
        sql.push_str("\n\n");
        for record in records {
            sql.push_str(&Self::insert_statement(record));
            sql.push('\n');
        }
        sql
    }

    /// Export records as `stock-export-<unix-ms>.sql`
    pub fn export_stocks(
        &self,
        records: &[InventoryRecord],
        at: DateTime<Utc>,
    ) -> Result<ExportResult, ExportError> {
        ensure_records(records)?;
        Ok(ExportResult::text(
            Self::stocks_to_sql(records),
            ExportFormat::Sql,
            file_name("stock-export", ExportFormat::Sql, at),
        ))
    }

    /// Render designer tables in declaration order, newline-joined
    pub fn tables_to_sql(tables: &[SchemaTable]) -> String {
        tables
            .iter()
            .map(SchemaTable::to_sql)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Export designer tables as `database-design-<unix-ms>.sql`
    pub fn export_tables(&self, tables: &[SchemaTable], at: DateTime<Utc>) -> ExportResult {
        ExportResult::text(
            Self::tables_to_sql(tables),
            ExportFormat::Sql,
            file_name("database-design", ExportFormat::Sql, at),
        )
    }
}
