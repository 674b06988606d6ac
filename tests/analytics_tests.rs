//! Analytics tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use stock_pail::analytics::{
    GroupBy, InventorySummary, SortDirection, SortField, SortState, TableView, group_by,
};
use stock_pail::models::{InventoryRecord, StockStatus};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
}

fn record(batch: &str, stock: &str, quantity: u32, days_ago: i64) -> InventoryRecord {
    InventoryRecord {
        id: format!("{}-{}-{}", batch, stock, days_ago),
        batch_number: batch.to_string(),
        stock_number: stock.to_string(),
        description: format!("{} item", stock),
        quantity,
        status: StockStatus::Available,
        date_added: now() - Duration::days(days_ago),
    }
}

fn inventory() -> Vec<InventoryRecord> {
    vec![
        record("B1", "SK-A", 0, 1),
        record("B1", "SK-B", 5, 3),
        record("B2", "SK-A", 20, 10),
        record("B2", "SK-C", 9, 40),
        record("B3", "sk-d", 10, 60),
    ]
}

mod summary_tests {
    use super::*;

    #[test]
    fn test_counts() {
        let summary = InventorySummary::compute(&inventory(), now());
        assert_eq!(summary.total_items, 5);
        assert_eq!(summary.total_quantity, 44);
        assert_eq!(summary.low_stock_count, 2);
        assert_eq!(summary.out_of_stock_count, 1);
        assert_eq!(summary.recent_additions, 2);
        assert_eq!(summary.monthly_additions, 3);
        assert_eq!(summary.unique_stock_numbers, 4);
        assert_eq!(summary.unique_batch_numbers, 3);
        assert!((summary.avg_quantity_per_item - 8.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rankings() {
        let summary = InventorySummary::compute(&inventory(), now());

        let stocks: Vec<(&str, u64)> = summary
            .top_stocks
            .iter()
            .map(|r| (r.key.as_str(), r.value))
            .collect();
        assert_eq!(
            stocks,
            vec![("SK-A", 20), ("sk-d", 10), ("SK-C", 9), ("SK-B", 5)]
        );

        let batches: Vec<(&str, u64)> = summary
            .top_batches
            .iter()
            .map(|r| (r.key.as_str(), r.value))
            .collect();
        assert_eq!(batches, vec![("B1", 2), ("B2", 2), ("B3", 1)]);
    }

    #[test]
    fn test_empty_inventory() {
        let summary = InventorySummary::compute(&[], now());
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.avg_quantity_per_item, 0.0);
        assert!(summary.top_stocks.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(InventorySummary::compute(&inventory(), now())).unwrap();
        assert_eq!(value["lowStockCount"], 2);
        assert_eq!(value["topStocks"][0]["key"], "SK-A");
    }
}

mod view_tests {
    use super::*;

    #[test]
    fn test_default_sort_newest_first() {
        let records = inventory();
        let rows = TableView::default().apply(&records);
        let ages: Vec<&str> = rows.iter().map(|r| r.stock_number.as_str()).collect();
        assert_eq!(ages, vec!["SK-A", "SK-B", "SK-A", "SK-C", "sk-d"]);
        assert_eq!(rows[0].quantity, 0);
    }

    #[test]
    fn test_toggle() {
        let mut sort = SortState::default();
        sort.toggle(SortField::DateAdded);
        assert_eq!(sort.direction, SortDirection::Ascending);

        sort.toggle(SortField::Quantity);
        assert_eq!(sort.field, SortField::Quantity);
        assert_eq!(sort.direction, SortDirection::Ascending);

        sort.toggle(SortField::Quantity);
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let records = inventory();
        let mut view = TableView::default();
        view.sort.toggle(SortField::StockNumber);
        let stocks: Vec<&str> = view
            .apply(&records)
            .iter()
            .map(|r| r.stock_number.as_str())
            .collect();
        assert_eq!(stocks, vec!["SK-A", "SK-A", "SK-B", "SK-C", "sk-d"]);
    }

    #[test]
    fn test_search_filters_case_insensitively() {
        let records = inventory();
        let view = TableView::default().with_search("sk-a");
        assert_eq!(view.apply(&records).len(), 2);

        let view = TableView::default().with_search("b3");
        assert_eq!(view.apply(&records)[0].stock_number, "sk-d");
    }

    #[test]
    fn test_sort_field_names() {
        assert_eq!("date-added".parse::<SortField>(), Ok(SortField::DateAdded));
        assert_eq!("Batch Number".parse::<SortField>(), Ok(SortField::BatchNumber));
        assert!("colour".parse::<SortField>().is_err());
    }
}

mod grouping_tests {
    use super::*;

    #[test]
    fn test_group_by_stock() {
        let records = inventory();
        let groups = group_by(&records, GroupBy::StockNumber);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["SK-A", "SK-B", "SK-C", "sk-d"]);
        assert_eq!(groups[0].item_count(), 2);
        assert_eq!(groups[0].total_quantity, 20);
        assert_eq!(groups[0].to_string(), "SK-A (2 items, total quantity 20)");
    }

    #[test]
    fn test_group_items_newest_first() {
        let records = vec![
            record("B7", "SK-OLD", 1, 30),
            record("B7", "SK-NEW", 2, 2),
            record("B7", "SK-MID", 3, 9),
        ];
        let groups = group_by(&records, GroupBy::BatchNumber);
        let stocks: Vec<&str> = groups[0]
            .items
            .iter()
            .map(|r| r.stock_number.as_str())
            .collect();
        assert_eq!(stocks, vec!["SK-NEW", "SK-MID", "SK-OLD"]);
    }

    #[test]
    fn test_group_by_batch() {
        let records = inventory();
        let groups = group_by(&records, GroupBy::BatchNumber);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].key, "B2");
        assert_eq!(groups[1].total_quantity, 29);
        assert_eq!(groups[1].items[0].stock_number, "SK-A");
    }
}
