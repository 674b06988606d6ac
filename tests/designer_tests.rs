//! Schema designer tests

use chrono::{TimeZone, Utc};
use stock_pail::designer::{DesignError, SQL_TEMPLATES, SchemaDesigner};
use stock_pail::export::ExportFormat;
use stock_pail::import::ImportError;
use stock_pail::models::{FieldChanges, FieldType, SchemaField};
use stock_pail::validation::ValidationError;

mod table_editing_tests {
    use super::*;

    #[test]
    fn test_new_table_generates_default_columns() {
        let mut designer = SchemaDesigner::new();
        designer.add_table("products").unwrap();

        assert_eq!(
            designer.generate_sql(),
            "CREATE TABLE products (\n  id UUID PRIMARY KEY NOT NULL DEFAULT gen_random_uuid(),\n  created_at TIMESTAMPTZ NOT NULL DEFAULT now()\n);"
        );
    }

    #[test]
    fn test_blank_table_name_rejected() {
        let mut designer = SchemaDesigner::new();
        assert_eq!(
            designer.add_table("  "),
            Err(DesignError::Validation(ValidationError::Empty("table name")))
        );
        assert!(designer.tables().is_empty());
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let mut designer = SchemaDesigner::new();
        let table_id = designer.add_table("orders").unwrap();
        designer
            .add_field(table_id, SchemaField::new("total", FieldType::Numeric).not_null())
            .unwrap();
        designer
            .add_field(table_id, SchemaField::new("sku", FieldType::Varchar).unique())
            .unwrap();

        let names: Vec<&str> = designer.tables()[0]
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["id", "created_at", "total", "sku"]);
        assert!(designer.generate_sql().contains("  sku VARCHAR(255) UNIQUE\n);"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut designer = SchemaDesigner::new();
        let table_id = designer.add_table("orders").unwrap();
        let err = designer
            .add_field(table_id, SchemaField::new(" id ", FieldType::Integer))
            .unwrap_err();
        assert!(matches!(
            err,
            DesignError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_update_field_changes_rendering() {
        let mut designer = SchemaDesigner::new();
        let table_id = designer.add_table("orders").unwrap();
        let field_id = designer
            .add_field(table_id, SchemaField::new("status", FieldType::Text))
            .unwrap();

        let changes = FieldChanges {
            nullable: Some(false),
            default_value: Some("'new'".to_string()),
            ..FieldChanges::default()
        };
        designer.update_field(table_id, field_id, &changes).unwrap();
        assert!(
            designer
                .generate_sql()
                .contains("  status TEXT NOT NULL DEFAULT 'new'")
        );
    }

    #[test]
    fn test_primary_key_field_cannot_be_deleted() {
        let mut designer = SchemaDesigner::new();
        let table_id = designer.add_table("orders").unwrap();
        let pk = designer.tables()[0].fields[0].id;
        let created_at = designer.tables()[0].fields[1].id;

        assert_eq!(
            designer.delete_field(table_id, pk),
            Err(DesignError::PrimaryKeyField("id".to_string()))
        );
        let removed = designer.delete_field(table_id, created_at).unwrap();
        assert_eq!(removed.name, "created_at");
        assert_eq!(designer.tables()[0].fields.len(), 1);
    }

    #[test]
    fn test_unknown_ids_reported() {
        let mut designer = SchemaDesigner::new();
        let missing = uuid::Uuid::new_v4();
        assert_eq!(
            designer.toggle_row_security(missing),
            Err(DesignError::TableNotFound(missing))
        );
        let table_id = designer.add_table("t").unwrap();
        assert_eq!(
            designer.delete_field(table_id, missing),
            Err(DesignError::FieldNotFound(missing))
        );
    }

    #[test]
    fn test_delete_table() {
        let mut designer = SchemaDesigner::new();
        let a = designer.add_table("a").unwrap();
        designer.add_table("b").unwrap();
        assert_eq!(designer.delete_table(a).unwrap().name, "a");
        assert_eq!(designer.tables().len(), 1);
        assert_eq!(designer.tables()[0].name, "b");
    }
}

mod sql_generation_tests {
    use super::*;

    #[test]
    fn test_row_security_toggle_appends_alter() {
        let mut designer = SchemaDesigner::new();
        let table_id = designer.add_table("profiles").unwrap();

        assert!(designer.toggle_row_security(table_id).unwrap());
        assert!(
            designer
                .generate_sql()
                .ends_with(");\nALTER TABLE profiles ENABLE ROW LEVEL SECURITY;")
        );

        assert!(!designer.toggle_row_security(table_id).unwrap());
        assert!(!designer.generate_sql().contains("ALTER TABLE"));
    }

    #[test]
    fn test_tables_joined_by_newline() {
        let mut designer = SchemaDesigner::new();
        designer.add_table("a").unwrap();
        designer.add_table("b").unwrap();
        let sql = designer.generate_sql();
        assert!(sql.contains(");\nCREATE TABLE b ("));
        assert_eq!(sql.matches("CREATE TABLE").count(), 2);
    }

    #[test]
    fn test_export_file_name() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut designer = SchemaDesigner::new();
        designer.add_table("a").unwrap();

        let result = designer.export_file(at);
        assert_eq!(result.format, ExportFormat::Sql);
        assert_eq!(
            result.file_name,
            format!("database-design-{}.sql", at.timestamp_millis())
        );
        assert_eq!(result.as_text(), Some(designer.generate_sql().as_str()));
    }
}

mod sql_import_tests {
    use super::*;

    #[test]
    fn test_import_replaces_tables() {
        let mut designer = SchemaDesigner::new();
        designer.add_table("old").unwrap();

        let result =
            designer.import_sql("CREATE TABLE fresh (id UUID PRIMARY KEY, label TEXT NOT NULL);");
        assert!(result.found_statements());
        assert_eq!(designer.tables().len(), 1);
        assert_eq!(designer.tables()[0].name, "fresh");
        assert!(!designer.tables()[0].fields[1].nullable);
    }

    #[test]
    fn test_import_without_statements_keeps_tables() {
        let mut designer = SchemaDesigner::new();
        designer.add_table("kept").unwrap();

        let result = designer.import_sql("SELECT 1;");
        assert!(!result.found_statements());
        assert_eq!(result.errors, vec![ImportError::NoStatements]);
        assert_eq!(designer.tables().len(), 1);
        assert_eq!(designer.tables()[0].name, "kept");
    }
}

mod template_tests {
    use super::*;

    #[test]
    fn test_templates_listed() {
        let names: Vec<&str> = SQL_TEMPLATES.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Basic Table", "Table with RLS"]);
    }

    #[test]
    fn test_basic_table_template() {
        let mut designer = SchemaDesigner::new();
        designer.load_template("basic table").unwrap();

        let table = &designer.tables()[0];
        assert_eq!(table.name, "example_table");
        let names: Vec<&str> = table.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["id", "name", "description", "created_at", "updated_at"]
        );
        assert_eq!(table.fields[0].default_value, "gen_random_uuid()");
        assert_eq!(table.fields[3].field_type, FieldType::Timestamp);
        assert!(!table.enable_row_security);
    }

    #[test]
    fn test_rls_template_sets_flag() {
        let mut designer = SchemaDesigner::new();
        designer.load_template("Table with RLS").unwrap();

        let table = &designer.tables()[0];
        assert_eq!(table.name, "user_data");
        assert!(table.enable_row_security);
        assert_eq!(table.fields[2].field_type, FieldType::Jsonb);
        assert!(!table.fields[1].nullable);
    }

    #[test]
    fn test_unknown_template() {
        let mut designer = SchemaDesigner::new();
        assert_eq!(
            designer.load_template("Nope").unwrap_err(),
            DesignError::UnknownTemplate("Nope".to_string())
        );
    }
}
