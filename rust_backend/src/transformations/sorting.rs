//! Sort state and ordering for the hourly and summary tables.
//!
//! Each table owns an independent [`SortConfig`]. Clicking a column header
//! cycles its direction ascending, descending, unsorted; clicking a different
//! column starts over at ascending. All orderings are stable, so ties keep the
//! order the rows arrived in.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::domain::{EfficiencyMap, HourBucket, Metric, WorkerSummary};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    #[serde(rename = "none")]
    Unsorted,
}

impl SortDirection {
    /// Next direction when the same column is selected again.
    pub fn next(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Unsorted,
            SortDirection::Unsorted => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    }
}

/// Sort key and direction of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig<K> {
    pub key: Option<K>,
    pub direction: SortDirection,
}

impl<K> Default for SortConfig<K> {
    fn default() -> Self {
        Self {
            key: None,
            direction: SortDirection::Unsorted,
        }
    }
}

impl<K: PartialEq> SortConfig<K> {
    /// Applies a header click on `key`.
    pub fn select(&mut self, key: K) {
        if self.key.as_ref() == Some(&key) {
            self.direction = self.direction.next();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }

    /// The key that currently reorders rows, if any.
    pub fn active_key(&self) -> Option<&K> {
        match self.direction {
            SortDirection::Unsorted => None,
            _ => self.key.as_ref(),
        }
    }
}

/// Hourly table column: the row total or one hour bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HourlySortKey {
    Total,
    Hour(HourBucket),
}

impl FromStr for HourlySortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("total") {
            return Ok(HourlySortKey::Total);
        }
        s.parse::<HourBucket>()
            .map(HourlySortKey::Hour)
            .map_err(|_| {
                format!(
                    "Invalid hourly sort key: {}. Must be 'total' or an hour like '2024-01-01 09:00'",
                    s
                )
            })
    }
}

impl fmt::Display for HourlySortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourlySortKey::Total => f.write_str("total"),
            HourlySortKey::Hour(hour) => write!(f, "{}", hour),
        }
    }
}

/// Summary table column.
///
/// `Rank` is the position column; sorting by it keeps the reducer's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummarySortKey {
    Rank,
    Name,
    TotalPackages,
    TotalItems,
    AvgPackagesPerHour,
    AvgItemsPerHour,
}

impl SummarySortKey {
    pub const ALL: [SummarySortKey; 6] = [
        SummarySortKey::Rank,
        SummarySortKey::Name,
        SummarySortKey::TotalPackages,
        SummarySortKey::TotalItems,
        SummarySortKey::AvgPackagesPerHour,
        SummarySortKey::AvgItemsPerHour,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SummarySortKey::Rank => "rank",
            SummarySortKey::Name => "name",
            SummarySortKey::TotalPackages => "totalPackages",
            SummarySortKey::TotalItems => "totalItems",
            SummarySortKey::AvgPackagesPerHour => "avgPackagesPerHour",
            SummarySortKey::AvgItemsPerHour => "avgItemsPerHour",
        }
    }

    fn compare(&self, a: &WorkerSummary, b: &WorkerSummary) -> Ordering {
        match self {
            SummarySortKey::Rank => Ordering::Equal,
            SummarySortKey::Name => compare_names(&a.name, &b.name),
            SummarySortKey::TotalPackages => a.total_packages.cmp(&b.total_packages),
            SummarySortKey::TotalItems => a.total_items.cmp(&b.total_items),
            SummarySortKey::AvgPackagesPerHour => {
                a.avg_packages_per_hour.total_cmp(&b.avg_packages_per_hour)
            }
            SummarySortKey::AvgItemsPerHour => {
                a.avg_items_per_hour.total_cmp(&b.avg_items_per_hour)
            }
        }
    }
}

/// Case-insensitive name order; names equal ignoring case fall back to byte
/// order so the comparison stays total.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

impl FromStr for SummarySortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        SummarySortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                format!(
                    "Invalid summary sort key: {}. Must be one of rank, name, totalPackages, totalItems, avgPackagesPerHour, avgItemsPerHour",
                    s
                )
            })
    }
}

impl fmt::Display for SummarySortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One worker's row of the hourly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRow {
    pub worker_name: String,
    /// Metric value per selected hour, aligned with the table's hour list.
    pub values: Vec<u64>,
    /// Sum of `values`.
    pub total: u64,
}

impl HourlyRow {
    /// Value of the given column; hours outside the selection read as zero.
    pub fn column_value(&self, key: &HourlySortKey, time_range: &[HourBucket]) -> u64 {
        match key {
            HourlySortKey::Total => self.total,
            HourlySortKey::Hour(hour) => time_range
                .iter()
                .position(|h| h == hour)
                .and_then(|idx| self.values.get(idx).copied())
                .unwrap_or(0),
        }
    }
}

/// Min/max of the positive values in the sorted column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

/// Rows of the hourly table in selection order, before any sorting.
pub fn build_hourly_rows(
    workers: &[String],
    time_range: &[HourBucket],
    buckets: &EfficiencyMap,
    metric: Metric,
) -> Vec<HourlyRow> {
    workers
        .iter()
        .map(|worker| {
            let values: Vec<u64> = time_range
                .iter()
                .map(|hour| {
                    buckets
                        .get(hour, worker)
                        .map(|bucket| metric.value(bucket))
                        .unwrap_or(0)
                })
                .collect();
            HourlyRow {
                worker_name: worker.clone(),
                total: values.iter().fold(0u64, |acc, v| acc.saturating_add(*v)),
                values,
            }
        })
        .collect()
}

/// Build and order the hourly table.
///
/// With no active sort the rows keep the order of `workers`.
pub fn sort_hourly(
    workers: &[String],
    time_range: &[HourBucket],
    buckets: &EfficiencyMap,
    config: &SortConfig<HourlySortKey>,
    metric: Metric,
) -> Vec<HourlyRow> {
    let mut rows = build_hourly_rows(workers, time_range, buckets, metric);
    if let Some(key) = config.active_key() {
        rows.sort_by(|a, b| {
            let ordering = a
                .column_value(key, time_range)
                .cmp(&b.column_value(key, time_range));
            config.direction.apply(ordering)
        });
    }
    rows
}

/// Color range of the actively sorted hourly column.
///
/// `None` when nothing is sorted or the column has no positive value.
pub fn column_range(
    rows: &[HourlyRow],
    time_range: &[HourBucket],
    config: &SortConfig<HourlySortKey>,
) -> Option<ColorRange> {
    let key = config.active_key()?;
    rows.iter()
        .map(|row| row.column_value(key, time_range))
        .filter(|value| *value > 0)
        .fold(None, |range: Option<(u64, u64)>, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
        .map(|(min, max)| ColorRange {
            min: min as f64,
            max: max as f64,
        })
}

/// Order summary rows; with no active sort the reducer's order is kept.
pub fn sort_summary(
    summaries: &[WorkerSummary],
    config: &SortConfig<SummarySortKey>,
) -> Vec<WorkerSummary> {
    let mut rows = summaries.to_vec();
    if let Some(key) = config.active_key() {
        rows.sort_by(|a, b| config.direction.apply(key.compare(a, b)));
    }
    rows
}

/// Whether the top three summary rows earn podium badges.
///
/// Holds while the table shows the default packages-descending ranking:
/// nothing sorted, or `totalPackages` descending.
pub fn podium_applies(config: &SortConfig<SummarySortKey>) -> bool {
    match config.active_key() {
        None => true,
        Some(SummarySortKey::TotalPackages) => config.direction == SortDirection::Descending,
        Some(_) => false,
    }
}
