use log::debug;
use std::collections::HashSet;

use crate::core::domain::{EfficiencyMap, HourBucket, NormalizedOrder, RawRecord};
use crate::preprocessing::RecordNormalizer;
use crate::time::hour_bucket;

/// Fold raw records into per-(hour, worker) efficiency buckets.
///
/// Records whose completion time does not resolve are skipped silently. The
/// result depends only on the multiset of input records, not on their order.
///
/// # Arguments
/// * `records` - Decoded rows of one upload
/// * `normalizer` - Field resolution and time-zone policy
///
/// # Returns
/// A freshly built [`EfficiencyMap`]
pub fn aggregate(records: &[RawRecord], normalizer: &RecordNormalizer) -> EfficiencyMap {
    let map = aggregate_orders(records.iter().map(|raw| normalizer.normalize(raw)));
    debug!(
        "Aggregated {} records into {} buckets ({} packages, {} skipped without completion time)",
        records.len(),
        map.len(),
        map.total_packages(),
        records.len() as u64 - map.total_packages()
    );
    map
}

/// Fold already-normalized orders into efficiency buckets.
pub fn aggregate_orders<I>(orders: I) -> EfficiencyMap
where
    I: IntoIterator<Item = NormalizedOrder>,
{
    orders
        .into_iter()
        .fold(EfficiencyMap::new(), |mut acc, order| {
            if let Some(time) = order.completion_time {
                acc.record(hour_bucket(&time), &order.worker_name, order.item_quantity);
            }
            acc
        })
}

/// Distinct worker names in discovery order.
///
/// Discovery walks the buckets hour by hour, so a worker is listed at the
/// position of their earliest active hour.
pub fn workers(buckets: &EfficiencyMap) -> Vec<String> {
    let mut seen = HashSet::new();
    buckets
        .iter()
        .filter(|(_, worker, _)| seen.insert(*worker))
        .map(|(_, worker, _)| worker.to_string())
        .collect()
}

/// Distinct hour buckets, ascending.
pub fn hours(buckets: &EfficiencyMap) -> Vec<HourBucket> {
    buckets.hour_keys().cloned().collect()
}
