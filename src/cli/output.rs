//! Output formatting for CLI

use crate::analytics::{InventorySummary, Ranked, StockGroup};
use crate::import::{ImportSummary, SchemaImportResult};
use crate::models::InventoryRecord;

/// Import counts followed by one line per failed row
pub fn format_import_summary(summary: &ImportSummary) -> String {
    let mut output = format!("{}\n", summary);
    for failure in &summary.failures {
        output.push_str(&format!("  - {}\n", failure));
    }
    output
}

/// Tables found by a SQL import
pub fn format_schema_import(result: &SchemaImportResult) -> String {
    let mut output = String::new();

    for error in &result.errors {
        output.push_str(&format!("⚠️  {}\n", error));
    }

    if result.found_statements() {
        output.push_str(&format!("✅ Parsed {} table(s):\n", result.tables.len()));
        for table in &result.tables {
            let columns: Vec<String> = table
                .fields
                .iter()
                .map(|f| format!("{}:{}", f.name, f.field_type))
                .collect();
            output.push_str(&format!(
                "  {}{} ({})\n",
                table.name,
                if table.enable_row_security { " [RLS]" } else { "" },
                columns.join(", ")
            ));
        }
    }

    output
}

fn format_ranking(title: &str, ranking: &[Ranked]) -> String {
    let mut output = format!("{}:\n", title);
    if ranking.is_empty() {
        output.push_str("  (none)\n");
    }
    for (idx, entry) in ranking.iter().enumerate() {
        output.push_str(&format!("  {}. {} ({})\n", idx + 1, entry.key, entry.value));
    }
    output
}

/// Overview cards and analytics figures
pub fn format_summary(summary: &InventorySummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("Total items:        {}\n", summary.total_items));
    output.push_str(&format!("Total quantity:     {}\n", summary.total_quantity));
    output.push_str(&format!("Low stock (1-9):    {}\n", summary.low_stock_count));
    output.push_str(&format!("Out of stock:       {}\n", summary.out_of_stock_count));
    output.push_str(&format!("Added last 7 days:  {}\n", summary.recent_additions));
    output.push_str(&format!("Added last 30 days: {}\n", summary.monthly_additions));
    output.push_str(&format!(
        "Avg quantity/item:  {:.1}\n",
        summary.avg_quantity_per_item
    ));
    output.push_str(&format!(
        "Unique stock/batch: {}/{}\n",
        summary.unique_stock_numbers, summary.unique_batch_numbers
    ));
    output.push('\n');
    output.push_str(&format_ranking("Top stock numbers by quantity", &summary.top_stocks));
    output.push_str(&format_ranking("Top batches by item count", &summary.top_batches));
    output
}

pub fn format_groups(groups: &[StockGroup<'_>]) -> String {
    if groups.is_empty() {
        return "No stock items to group.\n".to_string();
    }
    let mut output = String::new();
    for group in groups {
        output.push_str(&format!("{}\n", group));
        for item in &group.items {
            output.push_str(&format!("    {}\n", format_record(item)));
        }
    }
    output
}

fn format_record(record: &InventoryRecord) -> String {
    format!(
        "{} | {} | {} | {} [{}] | {} | {}",
        record.batch_number,
        record.stock_number,
        record.description,
        record.quantity,
        record.level().badge(),
        record.status,
        record.date_added.format("%Y-%m-%d")
    )
}

/// Table rows with a "shown of total" footer
pub fn format_records(rows: &[&InventoryRecord], total: usize) -> String {
    let mut output = String::new();
    for row in rows {
        output.push_str(&format_record(row));
        output.push('\n');
    }
    output.push_str(&format!("{} of {} items\n", rows.len(), total));
    output
}
