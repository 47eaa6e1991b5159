//! Selection filtering and table ordering.
//!
//! This module turns aggregated buckets into what the two report tables show:
//! the worker/hour selection that narrows every view, and the click-driven
//! sort state with its synchronized color range.
//!
//! # Modules
//!
//! - [`filtering`]: Selected workers and hours, toggles, worker search
//! - [`sorting`]: Sort cycle, hourly and summary orderings, color range
//!
//! # Example
//!
//! ```no_run
//! use pack_efficiency::core::{EfficiencyMap, Metric};
//! use pack_efficiency::transformations::{filter_buckets, sort_hourly, Selection, SortConfig, HourlySortKey};
//!
//! # fn example(buckets: &EfficiencyMap) {
//! let selection = Selection::from_map(buckets);
//! let visible = filter_buckets(buckets, &selection);
//!
//! let mut sort = SortConfig::default();
//! sort.select(HourlySortKey::Total);
//! let rows = sort_hourly(&selection.workers, &selection.hours, &visible, &sort, Metric::PackageCount);
//! # }
//! ```

pub mod filtering;
pub mod sorting;

pub use filtering::{filter_buckets, search_workers, Selection};
pub use sorting::{
    build_hourly_rows, column_range, podium_applies, sort_hourly, sort_summary, ColorRange,
    HourlyRow, HourlySortKey, SortConfig, SortDirection, SummarySortKey,
};
