use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::core::domain::RawRecord;
use crate::parsing::csv_parser;
use crate::parsing::json_parser;
use crate::parsing::xlsx_parser;

/// Represents the source format of an order export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Json,
    Xlsx,
}

impl SourceFormat {
    /// Detect the format from a file name's extension (case-insensitive)
    pub fn from_file_name(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?;
        match extension.to_lowercase().as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            "xlsx" | "xlsm" | "xls" => Some(SourceFormat::Xlsx),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Csv => f.write_str("csv"),
            SourceFormat::Json => f.write_str("json"),
            SourceFormat::Xlsx => f.write_str("xlsx"),
        }
    }
}

/// Result of loading an order export
#[derive(Debug)]
pub struct OrderLoadResult {
    pub records: Vec<RawRecord>,
    pub source_format: SourceFormat,
    pub num_records: usize,
}

impl OrderLoadResult {
    pub fn new(records: Vec<RawRecord>, source_format: SourceFormat) -> Self {
        let num_records = records.len();
        Self {
            records,
            source_format,
            num_records,
        }
    }
}

/// Unified interface for loading order exports from CSV, JSON or workbooks
pub struct OrderLoader;

impl OrderLoader {
    /// Load orders from a file (auto-detects CSV, JSON or workbook)
    pub fn load_from_file(path: &Path) -> Result<OrderLoadResult> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        match extension.to_lowercase().as_str() {
            "csv" => Self::load_from_csv(path),
            "json" => Self::load_from_json(path),
            "xlsx" | "xlsm" | "xls" => Self::load_from_xlsx(path),
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    /// Load orders from uploaded content; `file_name` selects the decoder
    pub fn load_from_bytes(file_name: &str, content: &[u8]) -> Result<OrderLoadResult> {
        let format = SourceFormat::from_file_name(file_name)
            .with_context(|| format!("Unsupported file format: {}", file_name))?;

        let records = match format {
            SourceFormat::Csv => csv_parser::parse_orders_csv_bytes(content)
                .and_then(|df| csv_parser::dataframe_to_records(&df))
                .context("Failed to parse CSV content")?,
            SourceFormat::Json => {
                let text = std::str::from_utf8(content).context("JSON content is not valid UTF-8")?;
                json_parser::parse_orders_json_str(text).context("Failed to parse JSON content")?
            }
            SourceFormat::Xlsx => xlsx_parser::parse_orders_xlsx_bytes(content)
                .context("Failed to parse workbook content")?,
        };

        Ok(OrderLoadResult::new(records, format))
    }

    /// Load orders from a CSV file
    pub fn load_from_csv(csv_path: &Path) -> Result<OrderLoadResult> {
        let records = csv_parser::parse_orders_csv_to_records(csv_path)
            .context("Failed to parse CSV file")?;

        Ok(OrderLoadResult::new(records, SourceFormat::Csv))
    }

    /// Load orders from a JSON file
    pub fn load_from_json(json_path: &Path) -> Result<OrderLoadResult> {
        let records =
            json_parser::parse_orders_json(json_path).context("Failed to parse JSON file")?;

        Ok(OrderLoadResult::new(records, SourceFormat::Json))
    }

    /// Load orders from the first worksheet of a workbook
    pub fn load_from_xlsx(xlsx_path: &Path) -> Result<OrderLoadResult> {
        let records =
            xlsx_parser::parse_orders_xlsx(xlsx_path).context("Failed to parse workbook")?;

        Ok(OrderLoadResult::new(records, SourceFormat::Xlsx))
    }
}
