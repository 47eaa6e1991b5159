use std::collections::HashMap;

use crate::core::domain::{EfficiencyMap, WorkerSummary};

/// Round to one decimal place, half away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reduce (filtered) efficiency buckets into one summary row per worker.
///
/// Averages divide by the number of distinct hours present in `buckets`, not
/// by the hours a given worker was active. A worker who only packed during
/// one of eight selected hours is averaged over all eight.
///
/// Rows come back sorted by `total_packages` descending; ties keep discovery
/// order (earliest active hour first).
pub fn summarize(buckets: &EfficiencyMap) -> Vec<WorkerSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, u64, u64)> = Vec::new();

    for (_, worker, bucket) in buckets.iter() {
        let slot = *index.entry(worker).or_insert_with(|| {
            totals.push((worker, 0, 0));
            totals.len() - 1
        });
        let (_, packages, items) = &mut totals[slot];
        *packages = packages.saturating_add(bucket.package_count);
        *items = items.saturating_add(bucket.item_count);
    }

    let denominator = buckets.hour_count().max(1) as f64;
    let mut summaries: Vec<WorkerSummary> = totals
        .into_iter()
        .map(|(name, packages, items)| WorkerSummary {
            name: name.to_string(),
            total_packages: packages,
            total_items: items,
            avg_packages_per_hour: round_one_decimal(packages as f64 / denominator),
            avg_items_per_hour: round_one_decimal(items as f64 / denominator),
        })
        .collect();

    summaries.sort_by(|a, b| b.total_packages.cmp(&a.total_packages));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::HourBucket;

    fn hour(s: &str) -> HourBucket {
        s.parse().unwrap()
    }

    fn map_of(entries: &[(&str, &str, u64)]) -> EfficiencyMap {
        let mut map = EfficiencyMap::new();
        for (h, worker, items) in entries {
            map.record(hour(h), worker, *items);
        }
        map
    }

    #[test]
    fn single_hour_single_worker() {
        let map = map_of(&[
            ("2024-01-01 09:00", "A", 2),
            ("2024-01-01 09:00", "A", 3),
        ]);
        let summary = summarize(&map);
        assert_eq!(summary.len(), 1);
        assert_eq!(
            summary[0],
            WorkerSummary {
                name: "A".to_string(),
                total_packages: 2,
                total_items: 5,
                avg_packages_per_hour: 2.0,
                avg_items_per_hour: 5.0,
            }
        );
    }

    #[test]
    fn averages_use_global_hour_count() {
        let map = map_of(&[
            ("2024-01-01 09:00", "A", 1),
            ("2024-01-01 10:00", "A", 1),
            ("2024-01-01 11:00", "A", 1),
            ("2024-01-01 11:00", "B", 4),
        ]);
        let summary = summarize(&map);
        let b = summary.iter().find(|s| s.name == "B").unwrap();
        // B only worked one hour but is averaged over all three.
        assert_eq!(b.avg_packages_per_hour, 0.3);
        assert_eq!(b.avg_items_per_hour, 1.3);
    }

    #[test]
    fn default_order_is_packages_desc_with_stable_ties() {
        let map = map_of(&[
            ("2024-01-01 08:00", "Carl", 1),
            ("2024-01-01 09:00", "Ann", 1),
            ("2024-01-01 09:00", "Ann", 1),
            ("2024-01-01 09:00", "Bea", 1),
        ]);
        let names: Vec<String> = summarize(&map).into_iter().map(|s| s.name).collect();
        // Carl and Bea tie at one package; Carl was discovered first.
        assert_eq!(names, vec!["Ann", "Carl", "Bea"]);
    }

    #[test]
    fn worker_totals_saturate() {
        let map = map_of(&[
            ("2024-01-01 09:00", "A", u64::MAX),
            ("2024-01-01 10:00", "A", u64::MAX),
        ]);
        let summary = summarize(&map);
        assert_eq!(summary[0].total_packages, 2);
        assert_eq!(summary[0].total_items, u64::MAX);
    }

    #[test]
    fn empty_buckets_give_empty_summary() {
        assert!(summarize(&EfficiencyMap::new()).is_empty());
    }

    #[test]
    fn rounding_to_one_decimal() {
        assert_eq!(round_one_decimal(2.0 / 3.0), 0.7);
        assert_eq!(round_one_decimal(10.0 / 4.0), 2.5);
        assert_eq!(round_one_decimal(0.04), 0.0);
    }
}
