//! High-level data loading utilities.
//!
//! This module combines the decoders with format detection and error
//! context, and provides a seeded demo dataset.
//!
//! # Example
//!
//! ```no_run
//! use pack_efficiency::io::loaders::OrderLoader;
//! use std::path::Path;
//!
//! let result = OrderLoader::load_from_file(Path::new("orders.csv"))
//!     .expect("Failed to load");
//! println!("Loaded {} records", result.num_records);
//! ```

pub mod loaders;
pub mod mock_data;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{OrderLoadResult, OrderLoader, SourceFormat};
