//! In-memory holder of the currently loaded dataset.
//!
//! A dataset is built completely (decode, aggregate, index) before it is
//! published, and publishing swaps a single `Arc` under a write lock. Readers
//! therefore see either the previous dataset or the new one, never a mix.
//! A failed load leaves the current dataset untouched.

use chrono::{DateTime, Utc};
use log::{info, warn};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tokio::task;

use crate::algorithms::{aggregate, compute_overview, hours, workers, OverviewSnapshot};
use crate::core::domain::{EfficiencyMap, HourBucket, RawRecord};
use crate::core::error::{DatasetError, DatasetResult, ErrorContext};
use crate::db::checksum::calculate_checksum;
use crate::io::loaders::{OrderLoader, SourceFormat};
use crate::io::mock_data;
use crate::preprocessing::RecordNormalizer;

/// One fully computed upload.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source_name: String,
    /// `None` for generated demo data.
    pub format: Option<SourceFormat>,
    pub checksum: String,
    pub loaded_at: DateTime<Utc>,
    pub records: Vec<RawRecord>,
    /// Unfiltered efficiency buckets.
    pub buckets: EfficiencyMap,
    /// All workers in discovery order.
    pub workers: Vec<String>,
    /// All hours, ascending.
    pub hours: Vec<HourBucket>,
    pub overview: OverviewSnapshot,
}

impl Dataset {
    pub fn build(
        source_name: impl Into<String>,
        format: Option<SourceFormat>,
        checksum: impl Into<String>,
        records: Vec<RawRecord>,
        normalizer: &RecordNormalizer,
    ) -> Self {
        let buckets = aggregate(&records, normalizer);
        let overview = compute_overview(&records, normalizer);
        Self {
            source_name: source_name.into(),
            format,
            checksum: checksum.into(),
            loaded_at: Utc::now(),
            workers: workers(&buckets),
            hours: hours(&buckets),
            records,
            buckets,
            overview,
        }
    }
}

/// Shared, atomically replaced dataset slot.
#[derive(Clone, Default)]
pub struct DatasetStore {
    current: Arc<RwLock<Option<Arc<Dataset>>>>,
    normalizer: Arc<RecordNormalizer>,
}

impl DatasetStore {
    pub fn new(normalizer: RecordNormalizer) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            normalizer: Arc::new(normalizer),
        }
    }

    pub fn normalizer(&self) -> &RecordNormalizer {
        &self.normalizer
    }

    /// The dataset currently published, if any.
    pub fn current(&self) -> Option<Arc<Dataset>> {
        self.current.read().clone()
    }

    /// Publish `dataset`, superseding whatever was loaded before.
    pub fn replace(&self, dataset: Dataset) -> Arc<Dataset> {
        let dataset = Arc::new(dataset);
        *self.current.write() = Some(Arc::clone(&dataset));
        dataset
    }

    pub fn clear(&self) {
        *self.current.write() = None;
    }

    /// Decode uploaded content and publish it.
    ///
    /// # Errors
    /// * `UnsupportedFormat` when `file_name` has no csv/json/xlsx extension
    /// * `Decode` when the content cannot be decoded
    pub fn load_bytes(&self, file_name: &str, content: &[u8]) -> DatasetResult<Arc<Dataset>> {
        let context = ErrorContext::new("load_bytes").with_source(file_name);

        let format = SourceFormat::from_file_name(file_name).ok_or_else(|| {
            DatasetError::UnsupportedFormat {
                message: "expected a .csv, .json or .xlsx file".to_string(),
                context: context.clone(),
            }
        })?;

        let loaded = OrderLoader::load_from_bytes(file_name, content).map_err(|e| {
            warn!("Failed to decode {}: {:#}", file_name, e);
            DatasetError::decode_with_context(format!("{:#}", e), context.clone())
        })?;

        let checksum = calculate_checksum(content);
        info!(
            "Loaded {} records from {} ({}, checksum {})",
            loaded.num_records,
            file_name,
            format,
            &checksum[..12]
        );

        let dataset = Dataset::build(
            file_name,
            Some(format),
            checksum,
            loaded.records,
            &self.normalizer,
        );
        Ok(self.replace(dataset))
    }

    /// Read and decode a file off the async executor, then publish it.
    pub async fn load_file(&self, path: &Path) -> DatasetResult<Arc<Dataset>> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let content = tokio::fs::read(path).await.map_err(|e| {
            DatasetError::io_with_context(
                e.to_string(),
                ErrorContext::new("load_file").with_source(path.display().to_string()),
            )
        })?;

        let store = self.clone();
        let name = file_name.clone();
        task::spawn_blocking(move || store.load_bytes(&name, &content))
            .await
            .map_err(|e| {
                DatasetError::decode_with_context(
                    "decode task did not complete",
                    ErrorContext::new("load_file")
                        .with_source(file_name)
                        .with_details(e.to_string()),
                )
            })?
    }

    /// Publish a generated demo dataset.
    pub fn load_demo(&self, seed: u64, now: DateTime<Utc>) -> Arc<Dataset> {
        let records = mock_data::generate(seed, now);
        let checksum = calculate_checksum(format!("demo:{}:{}", seed, now.to_rfc3339()).as_bytes());
        info!("Generated {} demo records (seed {})", records.len(), seed);
        self.replace(Dataset::build(
            "demo",
            None,
            checksum,
            records,
            &self.normalizer,
        ))
    }
}
