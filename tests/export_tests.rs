//! Export module tests

use chrono::{DateTime, TimeZone, Utc};
use stock_pail::export::{
    CSVExporter, ExportError, ExportFormat, JSONExporter, SQLExporter, SpreadsheetExporter,
};
use stock_pail::import::CsvImporter;
use stock_pail::models::{InventoryRecord, StockStatus};
use stock_pail::validation::ValidationError;

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 7, 9, 15, 0).unwrap()
}

fn record(batch: &str, stock: &str, description: &str, quantity: u32) -> InventoryRecord {
    InventoryRecord {
        id: format!("id-{}", stock),
        batch_number: batch.to_string(),
        stock_number: stock.to_string(),
        description: description.to_string(),
        quantity,
        status: StockStatus::Available,
        date_added: at(),
    }
}

fn sample() -> Vec<InventoryRecord> {
    vec![
        record("BT001", "SK001", "Sample Item", 50),
        record("BT001", "SK002", "O'Neil crate", 0),
    ]
}

mod csv_export_tests {
    use super::*;

    #[test]
    fn test_layout_and_file_name() {
        let result = CSVExporter.export(&sample(), at()).unwrap();
        assert_eq!(result.format, ExportFormat::Csv);
        assert_eq!(
            result.file_name,
            format!("stock-export-{}.csv", at().timestamp_millis())
        );
        assert_eq!(
            result.as_text().unwrap(),
            "Batch Number,Stock Number,Description,Quantity,Date Added\n\
             BT001,SK001,Sample Item,50,3/7/2024\n\
             BT001,SK002,O'Neil crate,0,3/7/2024"
        );
    }

    #[test]
    fn test_round_trip_through_importer() {
        let records = sample();
        let csv = CSVExporter::to_csv(&records);
        let rows = CsvImporter::new().parse(&csv).unwrap();

        assert_eq!(rows.len(), records.len());
        for (row, original) in rows.iter().zip(&records) {
            let input = row.outcome.as_ref().unwrap();
            assert_eq!(input.batch_number, original.batch_number);
            assert_eq!(input.stock_number, original.stock_number);
            assert_eq!(input.description, original.description);
            assert_eq!(input.quantity, original.quantity);
        }
    }

    #[test]
    fn test_empty_list_rejected() {
        let err = CSVExporter.export(&[], at()).unwrap_err();
        assert!(matches!(
            err,
            ExportError::Validation(ValidationError::NoData)
        ));
        assert_eq!(err.to_string(), "No stock data to export");
    }
}

mod json_export_tests {
    use super::*;

    #[test]
    fn test_pretty_camel_case_array() {
        let result = JSONExporter.export(&sample()[..1], at()).unwrap();
        let text = result.as_text().unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": \"id-SK001\""));
        assert!(text.contains("\"batchNumber\": \"BT001\""));
        assert!(text.contains("\"dateAdded\""));
        assert!(result.file_name.ends_with(".json"));

        let parsed: Vec<InventoryRecord> = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, sample()[..1].to_vec());
    }
}

mod sql_export_tests {
    use super::*;

    #[test]
    fn test_stock_dump() {
        let result = SQLExporter.export_stocks(&sample(), at()).unwrap();
        let sql = result.as_text().unwrap();
        assert!(sql.starts_with("-- Stock Data Export\n\nCREATE TABLE IF NOT EXISTS stocks ("));
        assert!(sql.contains("quantity INTEGER DEFAULT 0"));
        assert!(sql.contains(
            "VALUES ('id-SK002', 'BT001', 'SK002', 'O''Neil crate', 0, '2024-03-07T09:15:00.000Z');"
        ));
        assert_eq!(result.file_name, format!("stock-export-{}.sql", at().timestamp_millis()));
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(SQLExporter.export_stocks(&[], at()).is_err());
    }
}

mod spreadsheet_export_tests {
    use super::*;

    #[test]
    fn test_html_table_fallback() {
        let result = SpreadsheetExporter.export_html(&sample(), at()).unwrap();
        assert_eq!(result.format, ExportFormat::HtmlTable);
        assert!(result.file_name.ends_with(".xls"));
        let html = result.as_text().unwrap();
        assert!(html.contains("<tr><td>Batch Number</td><td>Stock Number</td>"));
        assert!(html.contains("<td>O'Neil crate</td><td>0</td><td>3/7/2024</td>"));
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_workbook_reads_back() {
        use stock_pail::import::xlsx::read_first_sheet;

        let result = SpreadsheetExporter.export_xlsx(&sample(), at()).unwrap();
        assert_eq!(result.format, ExportFormat::Xlsx);
        assert_eq!(
            result.file_name,
            format!("stock-export-{}.xlsx", at().timestamp_millis())
        );
        assert!(result.content.starts_with(b"PK"));

        let rows = read_first_sheet(&result.content).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["Description"], "O'Neil crate");
        assert_eq!(rows[0]["Quantity"], "50");
        assert_eq!(rows[0]["Date Added"], "3/7/2024");
    }
}

mod format_tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("excel".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
        assert_eq!("xls".parse::<ExportFormat>(), Ok(ExportFormat::HtmlTable));
        assert!("yaml".parse::<ExportFormat>().is_err());
    }
}
