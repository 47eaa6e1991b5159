//! Packing-worker efficiency engine.
//!
//! Turns packing exports (CSV, JSON or xlsx rows, Chinese or English headers) into
//! per-worker, per-hour productivity figures and the two sortable report
//! tables built on them.
//!
//! ```text
//! parsing / io ──► preprocessing ──► algorithms ──► transformations ──► services
//!  (decode)         (normalize)       (aggregate,     (select, sort,      (report
//!                                      summarize)      color range)        snapshots)
//! ```
//!
//! [`db::DatasetStore`] holds the current upload and swaps it atomically;
//! [`services::DashboardView`] carries selection and sort state over it.

pub mod algorithms;
pub mod config;
pub mod core;
pub mod db;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod time;
pub mod transformations;

pub use crate::config::DashboardConfig;
pub use crate::core::{
    DatasetError, DatasetResult, EfficiencyMap, HourBucket, Metric, RawRecord, WorkerSummary,
};
pub use crate::db::{Dataset, DatasetStore};
pub use crate::services::DashboardView;
