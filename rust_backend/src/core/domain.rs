//! Domain models for packing records and worker efficiency buckets.
//!
//! This module provides the data structures that flow through the engine:
//! raw decoded rows, normalized orders, hour-bucketed efficiency counters and
//! per-worker summaries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// A single primitive cell value produced by file decoding.
///
/// Absent cells are represented by the key being missing from the
/// [`RawRecord`], never by a variant of this enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Returns `true` when the value carries no information.
    ///
    /// Blank strings and non-finite numbers count as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::Number(n) => !n.is_finite(),
        }
    }

    /// Renders the value as display text.
    ///
    /// Integral numbers are printed without a fractional part so that a
    /// numeric operator id `1024.0` reads back as `"1024"`.
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Text(s) => s.trim().to_string(),
            RawValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            RawValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

/// One decoded row: a mapping from field name to primitive value.
///
/// Records are immutable once decoded; a new upload replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: HashMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly used by tests and the demo generator.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// A record after dual-vocabulary field resolution and defaulting.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOrder {
    /// Wall-clock completion time in the configured zone; `None` excludes the
    /// order from every bucket computation.
    pub completion_time: Option<NaiveDateTime>,
    pub worker_name: String,
    pub item_quantity: u64,
}

/// Hour-truncated completion time formatted as `YYYY-MM-DD HH:00`.
///
/// The zero-padded format makes lexicographic order equal chronological order,
/// so the derived `Ord` is the chronological one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourBucket(String);

impl HourBucket {
    pub const FORMAT: &'static str = "%Y-%m-%d %H:00";

    /// Truncates a wall-clock time to its hour bucket.
    pub fn from_datetime(time: &NaiveDateTime) -> Self {
        HourBucket(time.format(Self::FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `HH:00` part used for compact time-slot labels.
    pub fn clock_label(&self) -> &str {
        self.0.split_once(' ').map(|(_, clock)| clock).unwrap_or(&self.0)
    }
}

impl fmt::Display for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HourBucket {
    type Err = String;

    /// Accepts only the canonical `YYYY-MM-DD HH:00` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = s.trim();
        let parsed = NaiveDateTime::parse_from_str(candidate, "%Y-%m-%d %H:%M")
            .map_err(|e| format!("Invalid hour bucket '{}': {}", s, e))?;
        let bucket = HourBucket::from_datetime(&parsed);
        if bucket.as_str() != candidate {
            return Err(format!(
                "Invalid hour bucket '{}': expected the form YYYY-MM-DD HH:00",
                s
            ));
        }
        Ok(bucket)
    }
}

/// Composite key of an efficiency bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketKey {
    pub hour: HourBucket,
    pub worker_name: String,
}

/// Package and item counters for one (hour, worker) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyBucket {
    pub package_count: u64,
    pub item_count: u64,
}

/// Which bucket counter a table displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    #[default]
    PackageCount,
    ItemCount,
}

impl Metric {
    pub fn value(&self, bucket: &EfficiencyBucket) -> u64 {
        match self {
            Metric::PackageCount => bucket.package_count,
            Metric::ItemCount => bucket.item_count,
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "packages" | "packageCount" | "package_count" => Ok(Metric::PackageCount),
            "items" | "itemCount" | "item_count" => Ok(Metric::ItemCount),
            other => Err(format!(
                "Invalid metric: {}. Must be 'packages' or 'items'",
                other
            )),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::PackageCount => f.write_str("packages"),
            Metric::ItemCount => f.write_str("items"),
        }
    }
}

/// Efficiency buckets keyed by hour, then worker.
///
/// Iteration visits hours in chronological order and workers by name within
/// an hour, which fixes the discovery order used by the index builder and the
/// summary reducer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EfficiencyMap {
    buckets: BTreeMap<HourBucket, BTreeMap<String, EfficiencyBucket>>,
}

impl EfficiencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one package with `items` items to the bucket at `(hour, worker)`.
    pub fn record(&mut self, hour: HourBucket, worker: &str, items: u64) {
        let bucket = self
            .buckets
            .entry(hour)
            .or_default()
            .entry(worker.to_string())
            .or_default();
        bucket.package_count = bucket.package_count.saturating_add(1);
        bucket.item_count = bucket.item_count.saturating_add(items);
    }

    /// Inserts a bucket verbatim, replacing any existing value at that key.
    pub fn insert(&mut self, key: BucketKey, bucket: EfficiencyBucket) {
        self.buckets
            .entry(key.hour)
            .or_default()
            .insert(key.worker_name, bucket);
    }

    pub fn get(&self, hour: &HourBucket, worker: &str) -> Option<&EfficiencyBucket> {
        self.buckets.get(hour).and_then(|workers| workers.get(worker))
    }

    /// Iterates `(hour, worker, bucket)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&HourBucket, &str, &EfficiencyBucket)> + '_ {
        self.buckets.iter().flat_map(|(hour, workers)| {
            workers
                .iter()
                .map(move |(worker, bucket)| (hour, worker.as_str(), bucket))
        })
    }

    /// Distinct hours present, ascending.
    pub fn hour_keys(&self) -> impl Iterator<Item = &HourBucket> + '_ {
        self.buckets.keys()
    }

    pub fn hour_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of `(hour, worker)` buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_packages(&self) -> u64 {
        self.iter()
            .fold(0u64, |acc, (_, _, b)| acc.saturating_add(b.package_count))
    }

    pub fn total_items(&self) -> u64 {
        self.iter()
            .fold(0u64, |acc, (_, _, b)| acc.saturating_add(b.item_count))
    }

    /// Keeps only the buckets accepted by `keep`.
    pub fn retain<F>(&self, mut keep: F) -> EfficiencyMap
    where
        F: FnMut(&HourBucket, &str) -> bool,
    {
        let mut filtered = EfficiencyMap::new();
        for (hour, worker, bucket) in self.iter() {
            if keep(hour, worker) {
                filtered.insert(
                    BucketKey {
                        hour: hour.clone(),
                        worker_name: worker.to_string(),
                    },
                    *bucket,
                );
            }
        }
        filtered
    }
}

/// Per-worker rollup shown in the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSummary {
    pub name: String,
    pub total_packages: u64,
    pub total_items: u64,
    pub avg_packages_per_hour: f64,
    pub avg_items_per_hour: f64,
}
