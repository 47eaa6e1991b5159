//! Dataset storage for the current upload.
//!
//! There is no persistence: the store holds exactly one in-memory dataset and
//! replaces it wholesale on every successful load.
//!
//! - `checksum`: content fingerprint recorded with each dataset
//! - `dataset_store`: atomic publish/replace and the async load boundary
//!
//! ```no_run
//! use pack_efficiency::db::DatasetStore;
//! use std::path::Path;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DatasetStore::default();
//!     let dataset = store.load_file(Path::new("orders.csv")).await?;
//!     println!("{} workers", dataset.workers.len());
//!     Ok(())
//! }
//! ```

pub mod checksum;
pub mod dataset_store;

pub use checksum::calculate_checksum;
pub use dataset_store::{Dataset, DatasetStore};
