//! Service layer for report assembly.
//!
//! This module sits between the pure transformations and whatever renders the
//! tables. It owns the interactive view state and turns it into serialisable
//! report snapshots with their visual encodings.

pub mod color_scale;
pub mod report;

pub use color_scale::{intensity, shade, CellShade, EfficiencyTier, RankBadge, Theme};
pub use report::{
    export_file_name, DashboardView, HourlyCell, HourlyReport, HourlyReportRow, SummaryReport,
    SummaryReportRow,
};
