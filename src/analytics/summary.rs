//! Overview and analytics figures

use crate::models::{InventoryRecord, QuantityLevel};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// How many entries the top-N rankings keep
pub const TOP_N: usize = 5;

/// One entry of a ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked {
    pub key: String,
    pub value: u64,
}

/// Figures shown on the overview cards and the analytics page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_items: usize,
    pub total_quantity: u64,
    /// Items with a quantity of 1 to 9
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    /// Added within the last 7 days
    pub recent_additions: usize,
    /// Added within the last 30 days
    pub monthly_additions: usize,
    /// Stock numbers by summed quantity
    pub top_stocks: Vec<Ranked>,
    /// Batch numbers by item count
    pub top_batches: Vec<Ranked>,
    /// 0 when there are no items
    pub avg_quantity_per_item: f64,
    pub unique_stock_numbers: usize,
    pub unique_batch_numbers: usize,
}

/// Sum values per key, then rank descending; ties keep first appearance
fn rank<'a, I>(entries: I) -> Vec<Ranked>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for (key, value) in entries {
        let total = totals.entry(key).or_insert_with(|| {
            order.push(key);
            0
        });
        *total += value;
    }

    let mut ranked: Vec<Ranked> = order
        .into_iter()
        .map(|key| Ranked {
            key: key.to_string(),
            value: totals.get(key).copied().unwrap_or_default(),
        })
        .collect();
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked.truncate(TOP_N);
    ranked
}

impl InventorySummary {
    /// Compute every figure relative to `now`
    pub fn compute(records: &[InventoryRecord], now: DateTime<Utc>) -> Self {
        let last_week = now - Duration::days(7);
        let last_month = now - Duration::days(30);

        let total_quantity: u64 = records.iter().map(|r| u64::from(r.quantity)).sum();
        let count_level = |level: QuantityLevel| records.iter().filter(|r| r.level() == level).count();

        let avg_quantity_per_item = if records.is_empty() {
            0.0
        } else {
            total_quantity as f64 / records.len() as f64
        };

        Self {
            total_items: records.len(),
            total_quantity,
            low_stock_count: count_level(QuantityLevel::Low),
            out_of_stock_count: count_level(QuantityLevel::OutOfStock),
            recent_additions: records.iter().filter(|r| r.date_added >= last_week).count(),
            monthly_additions: records.iter().filter(|r| r.date_added >= last_month).count(),
            top_stocks: rank(
                records
                    .iter()
                    .map(|r| (r.stock_number.as_str(), u64::from(r.quantity))),
            ),
            top_batches: rank(records.iter().map(|r| (r.batch_number.as_str(), 1))),
            avg_quantity_per_item,
            unique_stock_numbers: records
                .iter()
                .map(|r| r.stock_number.as_str())
                .collect::<HashSet<_>>()
                .len(),
            unique_batch_numbers: records
                .iter()
                .map(|r| r.batch_number.as_str())
                .collect::<HashSet<_>>()
                .len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_keeps_first_seen_on_ties() {
        let ranked = rank([("a", 1), ("b", 3), ("c", 1), ("a", 2), ("d", 0)]);
        let keys: Vec<&str> = ranked.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c", "d"]);
        assert_eq!(ranked[0].value, 3);
    }

    #[test]
    fn test_rank_truncates() {
        let keys = ["a", "b", "c", "d", "e", "f", "g"];
        assert_eq!(rank(keys.iter().map(|k| (*k, 1))).len(), TOP_N);
    }
}
