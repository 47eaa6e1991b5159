//! Decoders for uploaded packing exports.
//!
//! All decoders produce flat [`RawRecord`](crate::core::RawRecord)s and never
//! interpret field meaning; that is left to the normalizer.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Delimited-text exports via the Polars CSV reader
//! - [`json_parser`]: Row-array JSON (spreadsheet rows saved as objects)
//! - [`xlsx_parser`]: First worksheet of an xlsx/xls workbook via calamine
//!
//! # Example
//!
//! ```no_run
//! use pack_efficiency::parsing::csv_parser::parse_orders_csv_to_records;
//! use std::path::Path;
//!
//! let records = parse_orders_csv_to_records(Path::new("orders.csv"))
//!     .expect("Failed to parse orders");
//! ```

pub mod csv_parser;
pub mod json_parser;
pub mod xlsx_parser;

#[cfg(test)]
pub(crate) mod xlsx_parser_tests;
