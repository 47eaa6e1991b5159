//! Core domain models for packing efficiency analysis.
//!
//! This module defines the fundamental data structures used throughout the engine,
//! representing decoded rows, normalized orders, efficiency buckets and worker summaries,
//! together with the error type for whole-upload failures.

pub mod domain;
pub mod error;

pub use domain::{
    BucketKey, EfficiencyBucket, EfficiencyMap, HourBucket, Metric, NormalizedOrder, RawRecord,
    RawValue, WorkerSummary,
};
pub use error::{DatasetError, DatasetResult, ErrorContext};
