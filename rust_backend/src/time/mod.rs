pub mod hour_bucket;

pub use hour_bucket::{hour_bucket, parse_completion_time, parse_timestamp_str, ZoneMode};
