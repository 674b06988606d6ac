//! Designer state and edit operations

use super::{DesignError, SqlTemplate, templates};
use crate::export::{ExportResult, SQLExporter};
use crate::import::{SQLImporter, SchemaImportResult};
use crate::models::{FieldChanges, SchemaField, SchemaTable};
use crate::validation::{ValidationError, validate_field_name, validate_table_name};
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

/// Ordered set of designed tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDesigner {
    tables: Vec<SchemaTable>,
}

impl SchemaDesigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(tables: Vec<SchemaTable>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[SchemaTable] {
        &self.tables
    }

    pub fn table(&self, table_id: Uuid) -> Option<&SchemaTable> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    fn table_mut(&mut self, table_id: Uuid) -> Result<&mut SchemaTable, DesignError> {
        self.tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or(DesignError::TableNotFound(table_id))
    }

    /// Add a table with the default `id` and `created_at` fields
    pub fn add_table(&mut self, name: &str) -> Result<Uuid, DesignError> {
        validate_table_name(name)?;
        let name = name.trim();
        if self
            .tables
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name))
        {
            return Err(ValidationError::Duplicate {
                field: "table name",
                name: name.to_string(),
            }
            .into());
        }

        let table = SchemaTable::new(name);
        let id = table.id;
        self.tables.push(table);
        debug!(table = name, "Added table");
        Ok(id)
    }

    pub fn delete_table(&mut self, table_id: Uuid) -> Result<SchemaTable, DesignError> {
        let index = self
            .tables
            .iter()
            .position(|t| t.id == table_id)
            .ok_or(DesignError::TableNotFound(table_id))?;
        Ok(self.tables.remove(index))
    }

    /// Append a field; names must be unique within the table
    pub fn add_field(&mut self, table_id: Uuid, field: SchemaField) -> Result<Uuid, DesignError> {
        validate_field_name(&field.name)?;
        let table = self.table_mut(table_id)?;
        if table.field_by_name(field.name.trim()).is_some() {
            return Err(ValidationError::Duplicate {
                field: "field name",
                name: field.name.trim().to_string(),
            }
            .into());
        }

        let id = field.id;
        table.fields.push(SchemaField {
            name: field.name.trim().to_string(),
            ..field
        });
        Ok(id)
    }

    pub fn update_field(
        &mut self,
        table_id: Uuid,
        field_id: Uuid,
        changes: &FieldChanges,
    ) -> Result<&SchemaField, DesignError> {
        if let Some(name) = &changes.name {
            validate_field_name(name)?;
        }
        let table = self.table_mut(table_id)?;
        let field = table
            .field_mut(field_id)
            .ok_or(DesignError::FieldNotFound(field_id))?;
        changes.apply_to(field);
        field.name = field.name.trim().to_string();
        Ok(field)
    }

    /// Remove a field; primary-key fields are refused
    pub fn delete_field(
        &mut self,
        table_id: Uuid,
        field_id: Uuid,
    ) -> Result<SchemaField, DesignError> {
        let table = self.table_mut(table_id)?;
        let field = table
            .field(field_id)
            .ok_or(DesignError::FieldNotFound(field_id))?;
        if field.primary_key {
            return Err(DesignError::PrimaryKeyField(field.name.clone()));
        }
        table
            .remove_field(field_id)
            .ok_or(DesignError::FieldNotFound(field_id))
    }

    /// Flip row-level security and return the new state
    pub fn toggle_row_security(&mut self, table_id: Uuid) -> Result<bool, DesignError> {
        let table = self.table_mut(table_id)?;
        table.enable_row_security = !table.enable_row_security;
        Ok(table.enable_row_security)
    }

    /// `CREATE TABLE` script for every table in order
    pub fn generate_sql(&self) -> String {
        SQLExporter::tables_to_sql(&self.tables)
    }

    /// Replace the tables with those found in `sql`.
    ///
    /// When nothing is found the current tables are left untouched and the
    /// result carries the "no statements" signal.
    pub fn import_sql(&mut self, sql: &str) -> SchemaImportResult {
        let result = SQLImporter::new().parse(sql);
        if result.found_statements() {
            self.tables = result.tables.clone();
            info!(tables = self.tables.len(), "Replaced designer tables from SQL");
        }
        result
    }

    /// Load one of the built-in templates through [`Self::import_sql`]
    pub fn load_template(&mut self, name: &str) -> Result<SchemaImportResult, DesignError> {
        let template: &SqlTemplate =
            templates::find(name).ok_or_else(|| DesignError::UnknownTemplate(name.to_string()))?;
        Ok(self.import_sql(template.sql))
    }

    /// Schema download named `database-design-<unix-ms>.sql`
    pub fn export_file(&self, at: DateTime<Utc>) -> ExportResult {
        SQLExporter.export_tables(&self.tables, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldType;

    #[test]
    fn test_duplicate_table_names_rejected() {
        let mut designer = SchemaDesigner::new();
        designer.add_table("orders").unwrap();
        assert!(matches!(
            designer.add_table(" Orders "),
            Err(DesignError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn test_update_field_trims_name() {
        let mut designer = SchemaDesigner::new();
        let table_id = designer.add_table("t").unwrap();
        let field_id = designer
            .add_field(table_id, SchemaField::new("n", FieldType::Text))
            .unwrap();
        let changes = FieldChanges {
            name: Some("  label ".to_string()),
            ..FieldChanges::default()
        };
        let field = designer.update_field(table_id, field_id, &changes).unwrap();
        assert_eq!(field.name, "label");
    }
}
