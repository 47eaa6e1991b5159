use anyhow::{Context, Result};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::core::domain::{RawRecord, RawValue};

/// Date-formatted cells are rendered as naive wall-clock text.
const CELL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse the first worksheet of a workbook file (xlsx, xls, xlsm, ods)
pub fn parse_orders_xlsx(path: &Path) -> Result<Vec<RawRecord>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
    let range = first_sheet(&mut workbook)?;
    Ok(range_to_records(&range))
}

/// Parse in-memory workbook content (an uploaded file)
pub fn parse_orders_xlsx_bytes(content: &[u8]) -> Result<Vec<RawRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(content.to_vec()))
        .context("Failed to open workbook content")?;
    let range = first_sheet(&mut workbook)?;
    Ok(range_to_records(&range))
}

fn first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Range<Data>> {
    workbook
        .worksheet_range_at(0)
        .context("Workbook has no worksheets")?
        .context("Failed to read the first worksheet")
}

/// Convert a worksheet range into raw records
///
/// The first row supplies the field names (trimmed); headerless columns are
/// dropped. Empty and error cells are left out of the record, and rows with no
/// values at all are skipped.
pub fn range_to_records(range: &Range<Data>) -> Vec<RawRecord> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    rows.map(|row| {
        let mut record = RawRecord::new();
        for (header, cell) in headers.iter().zip(row) {
            if header.is_empty() {
                continue;
            }
            if let Some(value) = cell_value(cell) {
                record.insert(header.as_str(), value);
            }
        }
        record
    })
    .filter(|record| !record.is_empty())
    .collect()
}

fn cell_value(cell: &Data) -> Option<RawValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            Some(RawValue::Text(s.clone()))
        }
        Data::Int(i) => Some(RawValue::Number(*i as f64)),
        Data::Float(f) => Some(RawValue::Number(*f)),
        Data::Bool(b) => Some(RawValue::Text(b.to_string())),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|at| RawValue::Text(at.format(CELL_DATETIME_FORMAT).to_string())),
    }
}
