use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::algorithms::summary::round_one_decimal;
use crate::core::domain::RawRecord;
use crate::preprocessing::RecordNormalizer;
use crate::time::hour_bucket;

/// Dataset-level key metrics shown above the report tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSnapshot {
    pub total_orders: usize,
    pub total_items: u64,
    pub avg_items_per_order: f64,
    pub avg_packages_per_hour: u64,
    pub avg_items_per_hour: u64,
    pub distinct_hours: usize,
}

/// Compute overview metrics over the whole upload
///
/// Unlike the summary table, these ignore the current worker/hour selection.
/// Rows without a completion time still count as orders and contribute
/// their quantity; they just don't add an hour.
///
/// # Arguments
/// * `records` - All decoded rows of the upload
/// * `normalizer` - Field resolution policy
///
/// # Returns
/// OverviewSnapshot with aggregated metrics
pub fn compute_overview(records: &[RawRecord], normalizer: &RecordNormalizer) -> OverviewSnapshot {
    let total_orders = records.len();
    let mut total_items = 0u64;
    let mut hours = HashSet::new();

    for raw in records {
        let order = normalizer.normalize(raw);
        total_items = total_items.saturating_add(order.item_quantity);
        if let Some(time) = order.completion_time {
            hours.insert(hour_bucket(&time));
        }
    }

    let hour_denominator = hours.len().max(1) as f64;

    OverviewSnapshot {
        total_orders,
        total_items,
        avg_items_per_order: if total_orders > 0 {
            round_one_decimal(total_items as f64 / total_orders as f64)
        } else {
            0.0
        },
        avg_packages_per_hour: (total_orders as f64 / hour_denominator).round() as u64,
        avg_items_per_hour: (total_items as f64 / hour_denominator).round() as u64,
        distinct_hours: hours.len(),
    }
}
