//! Packing efficiency report binary.
//!
//! Loads an order export (or the demo dataset), applies the requested
//! selection and header clicks, and prints the overview, hourly and summary
//! tables.
//!
//! # Usage
//!
//! ```bash
//! pack-report orders.csv --sort-summary totalItems --sort-summary totalItems
//! pack-report --demo --metric items --sort-hourly total --format json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (default: info)

use std::fmt::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pack_efficiency::algorithms::OverviewSnapshot;
use pack_efficiency::core::{HourBucket, Metric};
use pack_efficiency::services::{
    export_file_name, DashboardView, HourlyReport, SummaryReport, Theme,
};
use pack_efficiency::transformations::{HourlySortKey, SummarySortKey};
use pack_efficiency::{DashboardConfig, DatasetStore};

const HOURLY_EXPORT_BASE: &str = "员工效率单小时表";
const SUMMARY_EXPORT_BASE: &str = "员工效率汇总表";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plain-text tables (default)
    Text,
    /// JSON snapshot for the presentation layer
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "pack-report")]
#[command(version)]
#[command(about = "Per-worker, per-hour packing efficiency report", long_about = None)]
struct Cli {
    /// Order export to load (.csv or .json)
    #[arg(value_name = "FILE", required_unless_present = "demo")]
    file: Option<PathBuf>,

    /// Use the generated demo dataset instead of a file
    #[arg(long, conflicts_with = "file")]
    demo: bool,

    /// Seed for the demo dataset
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Configuration file (default: pack-efficiency.toml if present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Hourly table metric: packages or items
    #[arg(short, long)]
    metric: Option<Metric>,

    /// Restrict to these workers, in this order (repeatable)
    #[arg(short, long = "worker", value_name = "NAME")]
    workers: Vec<String>,

    /// Restrict to these hours, e.g. "2024-01-01 09:00" (repeatable)
    #[arg(long = "hour", value_name = "BUCKET")]
    hours: Vec<HourBucket>,

    /// Hourly table header click: "total" or an hour bucket (repeatable)
    #[arg(long = "sort-hourly", value_name = "KEY")]
    sort_hourly: Vec<HourlySortKey>,

    /// Summary table header click, e.g. totalItems (repeatable)
    #[arg(long = "sort-summary", value_name = "KEY")]
    sort_summary: Vec<SummarySortKey>,

    /// Shade cells for a dark background
    #[arg(long)]
    dark: bool,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportSnapshot<'a> {
    source: &'a str,
    checksum: &'a str,
    overview: &'a OverviewSnapshot,
    hourly: HourlyReport,
    summary: SummaryReport,
    hourly_export_name: String,
    summary_export_name: String,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::from_file(path).context("Failed to load configuration"),
        None => Ok(DashboardConfig::from_default_location().unwrap_or_else(|e| {
            info!("Using default configuration ({})", e);
            DashboardConfig::default()
        })),
    }
}

fn apply_selection(view: &mut DashboardView, cli: &Cli) {
    if !cli.workers.is_empty() {
        view.clear_workers();
        for name in &cli.workers {
            if !view.dataset().workers.contains(name) {
                warn!("Worker '{}' does not appear in the dataset", name);
            }
            if !view.selection().contains_worker(name) {
                view.toggle_worker(name);
            }
        }
    }
    if !cli.hours.is_empty() {
        view.clear_hours();
        for hour in &cli.hours {
            if !view.selection().contains_hour(hour) {
                view.toggle_hour(hour);
            }
        }
    }
}

fn render_text(out: &mut impl Write, snapshot: &ReportSnapshot<'_>) -> fmt::Result {
    let overview = snapshot.overview;
    let short_checksum = &snapshot.checksum[..12.min(snapshot.checksum.len())];
    writeln!(out, "Source: {} ({})", snapshot.source, short_checksum)?;
    writeln!(
        out,
        "Orders: {}  Items: {}  Items/order: {:.1}  Packages/hour: {}  Items/hour: {}",
        overview.total_orders,
        overview.total_items,
        overview.avg_items_per_order,
        overview.avg_packages_per_hour,
        overview.avg_items_per_hour
    )?;

    let hourly = &snapshot.hourly;
    writeln!(out, "\nHourly ({})", hourly.metric)?;
    write!(out, "{:>3}  {:<12}", "#", "Worker")?;
    for hour in &hourly.hours {
        write!(out, " {:>6}", hour.clock_label())?;
    }
    writeln!(out, " {:>7}", "Total")?;
    for row in &hourly.rows {
        write!(out, "{:>3}  {:<12}", row.rank, row.worker_name)?;
        for cell in &row.cells {
            write!(out, " {:>5}{}", cell.value, shade_marker(cell.shade.is_some()))?;
        }
        writeln!(out, " {:>6}{}", row.total, shade_marker(row.total_shade.is_some()))?;
    }

    writeln!(out, "\nSummary")?;
    writeln!(
        out,
        "{:>3}  {:<12} {:>8} {:>8} {:>9} {:>9}  {:<7} {}",
        "#", "Worker", "Packages", "Items", "Pkg/hour", "Itm/hour", "Badge", "Tier"
    )?;
    for row in &snapshot.summary.rows {
        let s = &row.summary;
        writeln!(
            out,
            "{:>3}  {:<12} {:>8} {:>8} {:>9.1} {:>9.1}  {:<7} {}",
            row.rank,
            s.name,
            s.total_packages,
            s.total_items,
            s.avg_packages_per_hour,
            s.avg_items_per_hour,
            format!("{:?}", row.badge).to_lowercase(),
            format!("{:?}", row.tier).to_lowercase()
        )?;
    }
    Ok(())
}

fn shade_marker(shaded: bool) -> &'static str {
    if shaded {
        "*"
    } else {
        " "
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let normalizer = config.normalizer()?;
    let metric = match cli.metric {
        Some(metric) => metric,
        None => config.metric()?,
    };

    let store = DatasetStore::new(normalizer);
    // clap guarantees a file unless --demo was given
    let dataset = match &cli.file {
        Some(path) => store.load_file(path).await?,
        None => store.load_demo(cli.seed, Utc::now()),
    };
    info!(
        "Dataset '{}': {} records, {} workers, {} hours",
        dataset.source_name,
        dataset.records.len(),
        dataset.workers.len(),
        dataset.hours.len()
    );

    let theme = if cli.dark { Theme::Dark } else { Theme::Light };
    let mut view = DashboardView::new(dataset, metric).with_theme(theme);
    apply_selection(&mut view, &cli);
    for key in &cli.sort_hourly {
        view.click_hourly(key.clone());
    }
    for key in &cli.sort_summary {
        view.click_summary(*key);
    }

    let today = Utc::now().date_naive();
    let dataset = view.dataset();
    let snapshot = ReportSnapshot {
        source: &dataset.source_name,
        checksum: &dataset.checksum,
        overview: &dataset.overview,
        hourly: view.hourly_report(),
        summary: view.summary_report(),
        hourly_export_name: export_file_name(HOURLY_EXPORT_BASE, today),
        summary_export_name: export_file_name(SUMMARY_EXPORT_BASE, today),
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => {
            let mut out = String::new();
            render_text(&mut out, &snapshot)?;
            print!("{}", out);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn text_report_lists_both_tables() {
        let store = DatasetStore::default();
        let csv = "Packed by,Packing completion time,Qty\n\
                   Ann,2024-01-01 09:10,1\n\
                   Bob,2024-01-01 09:20,2\n\
                   Bob,2024-01-01 10:20,3\n";
        let dataset = store.load_bytes("orders.csv", csv.as_bytes()).unwrap();
        let mut view = DashboardView::new(dataset.clone(), Metric::PackageCount);
        view.click_hourly(HourlySortKey::Total);

        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let snapshot = ReportSnapshot {
            source: &dataset.source_name,
            checksum: &dataset.checksum,
            overview: &dataset.overview,
            hourly: view.hourly_report(),
            summary: view.summary_report(),
            hourly_export_name: export_file_name(HOURLY_EXPORT_BASE, day),
            summary_export_name: export_file_name(SUMMARY_EXPORT_BASE, day),
        };

        let mut out = String::new();
        render_text(&mut out, &snapshot).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("Source: orders.csv ("));
        assert!(lines[1].starts_with("Orders: 3  Items: 6"));
        assert!(lines.iter().any(|l| l.contains("09:00") && l.contains("Total")));
        // Ascending total puts Ann first; her total is the shaded minimum.
        let ann = lines.iter().position(|l| l.contains("Ann")).unwrap();
        let bob = lines.iter().position(|l| l.contains("Bob")).unwrap();
        assert!(ann < bob);
        assert!(lines[ann].trim_end().ends_with("1*"));
        assert!(out.contains("\nSummary\n"));
        assert!(lines.iter().any(|l| l.contains("Bob") && l.contains("gold")));
    }
}
