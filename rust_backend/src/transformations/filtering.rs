use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::algorithms::{hours, workers};
use crate::core::domain::{EfficiencyMap, HourBucket};

/// Worker and hour filters applied to every aggregate view.
///
/// The two sets are independent; a bucket is visible only when both its
/// worker and its hour are selected. Workers keep the order in which they
/// were selected, which is also the natural row order of the hourly table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub workers: Vec<String>,
    pub hours: Vec<HourBucket>,
}

impl Selection {
    /// Everything selected: all workers in discovery order, all hours ascending.
    pub fn from_map(buckets: &EfficiencyMap) -> Self {
        Self {
            workers: workers(buckets),
            hours: hours(buckets),
        }
    }

    pub fn contains_worker(&self, name: &str) -> bool {
        self.workers.iter().any(|w| w == name)
    }

    pub fn contains_hour(&self, hour: &HourBucket) -> bool {
        self.hours.contains(hour)
    }

    /// Removes the worker if selected, otherwise appends it.
    pub fn toggle_worker(&mut self, name: &str) {
        match self.workers.iter().position(|w| w == name) {
            Some(idx) => {
                self.workers.remove(idx);
            }
            None => self.workers.push(name.to_string()),
        }
    }

    /// Removes the hour if selected, otherwise inserts it in ascending position.
    pub fn toggle_hour(&mut self, hour: &HourBucket) {
        match self.hours.binary_search(hour) {
            Ok(idx) => {
                self.hours.remove(idx);
            }
            Err(idx) => self.hours.insert(idx, hour.clone()),
        }
    }

    pub fn select_all_workers(&mut self, all: &[String]) {
        self.workers = all.to_vec();
    }

    pub fn clear_workers(&mut self) {
        self.workers.clear();
    }

    pub fn select_all_hours(&mut self, all: &[HourBucket]) {
        let mut hours = all.to_vec();
        hours.sort();
        hours.dedup();
        self.hours = hours;
    }

    pub fn clear_hours(&mut self) {
        self.hours.clear();
    }
}

/// Restrict buckets to the selected workers and hours.
pub fn filter_buckets(buckets: &EfficiencyMap, selection: &Selection) -> EfficiencyMap {
    let workers: HashSet<&str> = selection.workers.iter().map(String::as_str).collect();
    let hours: HashSet<&HourBucket> = selection.hours.iter().collect();
    buckets.retain(|hour, worker| hours.contains(hour) && workers.contains(worker))
}

/// Case-insensitive substring search over worker names, preserving order.
pub fn search_workers<'a>(all: &'a [String], term: &str) -> Vec<&'a str> {
    let needle = term.trim().to_lowercase();
    all.iter()
        .map(String::as_str)
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .collect()
}
