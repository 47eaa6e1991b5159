//! Efficiency aggregation and reduction.
//!
//! This module folds decoded packing records into hour-bucketed counters and
//! reduces those into per-worker and dataset-wide figures.
//!
//! # Components
//!
//! - [`aggregation`]: (hour, worker) bucket fold plus the worker/hour index
//! - [`summary`]: per-worker totals and hourly averages
//! - [`analysis`]: overview metrics over the whole upload
//!
//! # Example
//!
//! ```ignore
//! use pack_efficiency::algorithms::{aggregate, summarize};
//! use pack_efficiency::preprocessing::RecordNormalizer;
//!
//! # fn example(records: &[pack_efficiency::core::RawRecord]) {
//! let buckets = aggregate(records, &RecordNormalizer::default());
//! for row in summarize(&buckets) {
//!     println!("{}: {} packages", row.name, row.total_packages);
//! }
//! # }
//! ```

pub mod aggregation;
pub mod analysis;
pub mod summary;

pub use aggregation::{aggregate, aggregate_orders, hours, workers};
pub use analysis::{compute_overview, OverviewSnapshot};
pub use summary::{round_one_decimal, summarize};
