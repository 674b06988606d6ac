//! Schema designer model: tables and their fields

use super::enums::FieldType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One column definition inside a designed table
///
/// `default_value` is free text and may itself be a SQL expression such as
/// `gen_random_uuid()`; an empty string means no default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub default_value: String,
}

fn default_true() -> bool {
    true
}

impl SchemaField {
    /// Create a nullable field with no constraints
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            field_type,
            nullable: true,
            primary_key: false,
            unique: false,
            default_value: String::new(),
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Render the column line used inside `CREATE TABLE`.
    ///
    /// Modifier order is fixed: PRIMARY KEY, NOT NULL, UNIQUE, DEFAULT. A
    /// primary key may still print UNIQUE or NOT NULL; nothing is deduplicated.
    pub fn to_sql(&self) -> String {
        let mut line = format!("{} {}", self.name, self.field_type.as_sql());
        if self.primary_key {
            line.push_str(" PRIMARY KEY");
        }
        if !self.nullable {
            line.push_str(" NOT NULL");
        }
        if self.unique {
            line.push_str(" UNIQUE");
        }
        if !self.default_value.trim().is_empty() {
            line.push_str(" DEFAULT ");
            line.push_str(self.default_value.trim());
        }
        line
    }
}

/// Partial edit of a [`SchemaField`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldChanges {
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
    pub nullable: Option<bool>,
    pub primary_key: Option<bool>,
    pub unique: Option<bool>,
    pub default_value: Option<String>,
}

impl FieldChanges {
    pub fn apply_to(&self, field: &mut SchemaField) {
        if let Some(name) = &self.name {
            field.name = name.clone();
        }
        if let Some(field_type) = self.field_type {
            field.field_type = field_type;
        }
        if let Some(nullable) = self.nullable {
            field.nullable = nullable;
        }
        if let Some(primary_key) = self.primary_key {
            field.primary_key = primary_key;
        }
        if let Some(unique) = self.unique {
            field.unique = unique;
        }
        if let Some(default_value) = &self.default_value {
            field.default_value = default_value.clone();
        }
    }
}

/// A designed table: ordered fields plus the row-level security flag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaTable {
    pub id: Uuid,
    pub name: String,
    pub fields: Vec<SchemaField>,
    #[serde(default)]
    pub enable_row_security: bool,
}

impl SchemaTable {
    /// Create a table with the default `id` and `created_at` fields
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_fields(
            name,
            vec![
                SchemaField::new("id", FieldType::Uuid)
                    .primary_key()
                    .with_default("gen_random_uuid()"),
                SchemaField::new("created_at", FieldType::Timestamptz)
                    .not_null()
                    .with_default("now()"),
            ],
        )
    }

    /// Create a table with exactly the given fields
    pub fn with_fields(name: impl Into<String>, fields: Vec<SchemaField>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            fields,
            enable_row_security: false,
        }
    }

    pub fn field(&self, field_id: Uuid) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn field_mut(&mut self, field_id: Uuid) -> Option<&mut SchemaField> {
        self.fields.iter_mut().find(|f| f.id == field_id)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Remove a field regardless of its constraints
    pub fn remove_field(&mut self, field_id: Uuid) -> Option<SchemaField> {
        let index = self.fields.iter().position(|f| f.id == field_id)?;
        Some(self.fields.remove(index))
    }

    /// Render `CREATE TABLE` and, when enabled, the row-level security statement
    pub fn to_sql(&self) -> String {
        let columns: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("  {}", field.to_sql()))
            .collect();

        let mut sql = format!("CREATE TABLE {} (\n{}\n);", self.name, columns.join(",\n"));
        if self.enable_row_security {
            sql.push_str(&format!(
                "\nALTER TABLE {} ENABLE ROW LEVEL SECURITY;",
                self.name
            ));
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_has_default_fields() {
        let table = SchemaTable::new("products");
        assert_eq!(table.fields.len(), 2);
        assert_eq!(table.fields[0].name, "id");
        assert!(table.fields[0].primary_key);
        assert_eq!(table.fields[1].name, "created_at");
        assert!(!table.enable_row_security);
    }

    #[test]
    fn test_field_modifier_order() {
        let field = SchemaField {
            id: Uuid::new_v4(),
            name: "id".to_string(),
            field_type: FieldType::Uuid,
            nullable: true,
            primary_key: true,
            unique: true,
            default_value: "gen_random_uuid()".to_string(),
        };
        assert_eq!(
            field.to_sql(),
            "id UUID PRIMARY KEY UNIQUE DEFAULT gen_random_uuid()"
        );

        let field = SchemaField::new("code", FieldType::Varchar).not_null().unique();
        assert_eq!(field.to_sql(), "code VARCHAR(255) NOT NULL UNIQUE");
    }

    #[test]
    fn test_remove_field_ignores_primary_key_flag() {
        let mut table = SchemaTable::new("t");
        let pk = table.fields[0].id;
        assert!(table.remove_field(pk).is_some());
        assert_eq!(table.fields.len(), 1);
    }
}
