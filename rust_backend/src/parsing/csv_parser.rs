use anyhow::{Context, Result};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

use crate::core::domain::{RawRecord, RawValue};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse a CSV export into a Polars DataFrame
///
/// Schema inference is disabled so every column stays a string column; the
/// normalizer decides how each field is interpreted.
pub fn parse_orders_csv(csv_path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()
        .context("Failed to parse CSV into DataFrame")
}

/// Parse in-memory CSV content (an uploaded file) into a DataFrame
pub fn parse_orders_csv_bytes(content: &[u8]) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(content.to_vec()))
        .finish()
        .context("Failed to parse CSV into DataFrame")
}

/// Parse a CSV file straight into raw records
pub fn parse_orders_csv_to_records(csv_path: &Path) -> Result<Vec<RawRecord>> {
    let df = parse_orders_csv(csv_path)?;
    dataframe_to_records(&df)
}

/// Convert a string-typed DataFrame into raw records
///
/// Header names are trimmed (and a leading byte-order mark dropped). Null
/// cells are left out of the record, matching an absent field.
pub fn dataframe_to_records(df: &DataFrame) -> Result<Vec<RawRecord>> {
    let height = df.height();
    let mut records = vec![RawRecord::new(); height];

    for column in df.get_columns() {
        let header = column
            .name()
            .as_str()
            .trim_start_matches(BYTE_ORDER_MARK)
            .trim()
            .to_string();
        if header.is_empty() {
            continue;
        }

        let values = column
            .cast(&DataType::String)
            .with_context(|| format!("Failed to read column '{}' as text", header))?;
        let values = values.str()?;

        for (idx, record) in records.iter_mut().enumerate() {
            if let Some(value) = values.get(idx) {
                record.insert(header.clone(), RawValue::from(value));
            }
        }
    }

    Ok(records)
}
