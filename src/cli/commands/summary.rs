//! Summary command implementation

use super::load_records;
use crate::analytics::{GroupBy, InventorySummary, SortField, TableView, group_by};
use crate::cli::error::CliError;
use crate::cli::output::{format_groups, format_records, format_summary};
use chrono::Utc;
use std::path::PathBuf;

/// Arguments for the `summary` command
pub struct SummaryArgs {
    pub store: PathBuf,
    /// Print the summary as JSON
    pub json: bool,
    /// Group by `stock` or `batch`
    pub group_by: Option<String>,
    /// List records matching this term
    pub search: Option<String>,
    /// Sort listed records by this field (repeat to flip direction)
    pub sort: Vec<String>,
}

/// Handle the `summary` command
pub fn handle_summary(args: &SummaryArgs) -> Result<(), CliError> {
    let records = load_records(&args.store)?;
    let summary = InventorySummary::compute(&records, Utc::now());

    if args.json {
        let text = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        println!("{}", text);
    } else {
        print!("{}", format_summary(&summary));
    }

    if let Some(by) = &args.group_by {
        let by: GroupBy = by.parse().map_err(CliError::InvalidArgument)?;
        println!();
        print!("{}", format_groups(&group_by(&records, by)));
    }

    if args.search.is_some() || !args.sort.is_empty() {
        let mut view = TableView::default().with_search(args.search.clone().unwrap_or_default());
        for field in &args.sort {
            let field: SortField = field.parse().map_err(CliError::InvalidArgument)?;
            view.sort.toggle(field);
        }
        println!();
        print!("{}", format_records(&view.apply(&records), records.len()));
    }
    Ok(())
}
