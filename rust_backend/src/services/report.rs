//! Report snapshots for the presentation layer.
//!
//! [`DashboardView`] is the explicit context object holding everything the
//! two tables depend on besides the dataset itself: the worker/hour selection,
//! the displayed metric, and each table's sort state. The hourly table's
//! color range is computed when its header is clicked and then retained while
//! the selection changes, until the next click.

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::sync::Arc;

use crate::algorithms::{summarize, OverviewSnapshot};
use crate::core::domain::{EfficiencyMap, HourBucket, Metric, WorkerSummary};
use crate::db::Dataset;
use crate::services::color_scale::{intensity, shade, CellShade, EfficiencyTier, RankBadge, Theme};
use crate::transformations::{
    column_range, filter_buckets, podium_applies, sort_hourly, sort_summary, ColorRange,
    HourlySortKey, Selection, SortConfig, SummarySortKey,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyCell {
    pub hour: HourBucket,
    pub value: u64,
    /// Only set on the actively sorted column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade: Option<CellShade>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyReportRow {
    /// 1-based display position.
    pub rank: usize,
    pub worker_name: String,
    pub cells: Vec<HourlyCell>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_shade: Option<CellShade>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyReport {
    pub metric: Metric,
    pub hours: Vec<HourBucket>,
    pub sort: SortConfig<HourlySortKey>,
    pub color_range: Option<ColorRange>,
    pub rows: Vec<HourlyReportRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReportRow {
    pub rank: usize,
    pub badge: RankBadge,
    pub tier: EfficiencyTier,
    #[serde(flatten)]
    pub summary: WorkerSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub sort: SortConfig<SummarySortKey>,
    pub podium: bool,
    pub rows: Vec<SummaryReportRow>,
}

/// Interactive state over one loaded dataset.
#[derive(Debug, Clone)]
pub struct DashboardView {
    dataset: Arc<Dataset>,
    selection: Selection,
    metric: Metric,
    theme: Theme,
    hourly_sort: SortConfig<HourlySortKey>,
    hourly_range: Option<ColorRange>,
    summary_sort: SortConfig<SummarySortKey>,
}

impl DashboardView {
    /// Fresh view with every worker and hour selected and nothing sorted.
    pub fn new(dataset: Arc<Dataset>, metric: Metric) -> Self {
        let selection = Selection {
            workers: dataset.workers.clone(),
            hours: dataset.hours.clone(),
        };
        Self {
            dataset,
            selection,
            metric,
            theme: Theme::default(),
            hourly_sort: SortConfig::default(),
            hourly_range: None,
            summary_sort: SortConfig::default(),
        }
    }

    /// Switch to a newly loaded dataset; selection and sort state start over.
    pub fn replace_dataset(&mut self, dataset: Arc<Dataset>) {
        *self = Self::new(dataset, self.metric).with_theme(self.theme);
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn hourly_sort(&self) -> &SortConfig<HourlySortKey> {
        &self.hourly_sort
    }

    pub fn summary_sort(&self) -> &SortConfig<SummarySortKey> {
        &self.summary_sort
    }

    pub fn hourly_range(&self) -> Option<ColorRange> {
        self.hourly_range
    }

    pub fn toggle_worker(&mut self, name: &str) {
        self.selection.toggle_worker(name);
    }

    pub fn toggle_hour(&mut self, hour: &HourBucket) {
        self.selection.toggle_hour(hour);
    }

    pub fn select_all_workers(&mut self) {
        self.selection.select_all_workers(&self.dataset.workers);
    }

    pub fn clear_workers(&mut self) {
        self.selection.clear_workers();
    }

    pub fn select_all_hours(&mut self) {
        self.selection.select_all_hours(&self.dataset.hours);
    }

    pub fn clear_hours(&mut self) {
        self.selection.clear_hours();
    }

    /// Buckets inside the current selection.
    pub fn visible_buckets(&self) -> EfficiencyMap {
        filter_buckets(&self.dataset.buckets, &self.selection)
    }

    /// Header click on the hourly table; recomputes the color range.
    pub fn click_hourly(&mut self, key: HourlySortKey) {
        self.hourly_sort.select(key);
        let rows = sort_hourly(
            &self.selection.workers,
            &self.selection.hours,
            &self.visible_buckets(),
            &self.hourly_sort,
            self.metric,
        );
        self.hourly_range = column_range(&rows, &self.selection.hours, &self.hourly_sort);
        debug!(
            "Hourly sort {:?} {:?}, color range {:?}",
            self.hourly_sort.key, self.hourly_sort.direction, self.hourly_range
        );
    }

    /// Header click on the summary table.
    pub fn click_summary(&mut self, key: SummarySortKey) {
        self.summary_sort.select(key);
    }

    pub fn overview(&self) -> &OverviewSnapshot {
        &self.dataset.overview
    }

    pub fn hourly_report(&self) -> HourlyReport {
        let hours = self.selection.hours.clone();
        let rows = sort_hourly(
            &self.selection.workers,
            &hours,
            &self.visible_buckets(),
            &self.hourly_sort,
            self.metric,
        );

        let active = self.hourly_sort.active_key();
        let range = active.and(self.hourly_range);
        let shade_of = |value: u64| intensity(value as f64, range).map(|r| shade(r, self.theme));

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                let cells = hours
                    .iter()
                    .zip(row.values.iter())
                    .map(|(hour, value)| HourlyCell {
                        hour: hour.clone(),
                        value: *value,
                        shade: match active {
                            Some(HourlySortKey::Hour(sorted)) if sorted == hour => shade_of(*value),
                            _ => None,
                        },
                    })
                    .collect();
                HourlyReportRow {
                    rank: idx + 1,
                    total_shade: match active {
                        Some(HourlySortKey::Total) => shade_of(row.total),
                        _ => None,
                    },
                    worker_name: row.worker_name,
                    cells,
                    total: row.total,
                }
            })
            .collect();

        HourlyReport {
            metric: self.metric,
            hours,
            sort: self.hourly_sort.clone(),
            color_range: range,
            rows,
        }
    }

    pub fn summary_report(&self) -> SummaryReport {
        let summaries = summarize(&self.visible_buckets());
        let podium = podium_applies(&self.summary_sort);
        let rows = sort_summary(&summaries, &self.summary_sort)
            .into_iter()
            .enumerate()
            .map(|(idx, summary)| SummaryReportRow {
                rank: idx + 1,
                badge: RankBadge::for_position(idx, podium),
                tier: EfficiencyTier::from_avg(summary.avg_packages_per_hour),
                summary,
            })
            .collect();

        SummaryReport {
            sort: self.summary_sort.clone(),
            podium,
            rows,
        }
    }
}

/// File name the image export collaborator saves a table under.
pub fn export_file_name(base: &str, date: NaiveDate) -> String {
    format!("{}_{}.png", base, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::RawRecord;
    use crate::preprocessing::RecordNormalizer;
    use crate::time::ZoneMode;

    fn record(worker: &str, time: &str, qty: i64) -> RawRecord {
        RawRecord::new()
            .with("Packed by", worker)
            .with("Packing completion time", time)
            .with("Qty", qty)
    }

    fn view() -> DashboardView {
        let mut records = Vec::new();
        for _ in 0..3 {
            records.push(record("Ann", "2024-01-01 09:10", 1));
        }
        records.push(record("Ann", "2024-01-01 10:10", 2));
        records.push(record("Bob", "2024-01-01 09:20", 4));
        for _ in 0..4 {
            records.push(record("Bob", "2024-01-01 10:20", 1));
        }
        records.push(record("Cy", "2024-01-01 10:30", 1));
        records.push(RawRecord::new().with("Packed by", "Dee").with("Qty", 3i64));

        let normalizer = RecordNormalizer::new(Default::default(), ZoneMode::Utc);
        let dataset = Dataset::build("test.csv", None, "x", records, &normalizer);
        DashboardView::new(Arc::new(dataset), Metric::PackageCount)
    }

    fn hour(s: &str) -> HourBucket {
        s.parse().unwrap()
    }

    #[test]
    fn initial_view_selects_everything() {
        let view = view();
        assert_eq!(view.selection().workers, vec!["Ann", "Bob", "Cy"]);
        assert_eq!(view.selection().hours.len(), 2);
        // Dee's row has no completion time but still counts as an order.
        assert_eq!(view.overview().total_orders, 11);
    }

    #[test]
    fn summary_report_default_ranking_has_podium() {
        let report = view().summary_report();
        assert!(report.podium);
        let names: Vec<&str> = report.rows.iter().map(|r| r.summary.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Ann", "Cy"]);
        assert_eq!(report.rows[0].badge, RankBadge::Gold);
        assert_eq!(report.rows[2].badge, RankBadge::Bronze);
        assert_eq!(report.rows[0].summary.avg_packages_per_hour, 2.5);
    }

    #[test]
    fn summary_click_changes_order_and_drops_podium() {
        let mut view = view();
        view.click_summary(SummarySortKey::Name);
        let report = view.summary_report();
        assert!(!report.podium);
        assert_eq!(report.rows[0].summary.name, "Ann");
        assert_eq!(report.rows[0].badge, RankBadge::Plain);
    }

    #[test]
    fn hourly_click_shades_only_the_sorted_column() {
        let mut view = view();
        let ten = hour("2024-01-01 10:00");
        view.click_hourly(HourlySortKey::Hour(ten.clone()));
        view.click_hourly(HourlySortKey::Hour(ten.clone()));

        let report = view.hourly_report();
        assert_eq!(report.color_range, Some(ColorRange { min: 1.0, max: 4.0 }));
        assert_eq!(report.rows[0].worker_name, "Bob");
        assert_eq!(report.rows[0].rank, 1);

        let bob = &report.rows[0];
        assert!(bob.cells[0].shade.is_none());
        assert_eq!(bob.cells[1].shade, Some(shade(1.0, Theme::Light)));
        assert!(bob.total_shade.is_none());
        // Ann and Cy both sit at the bottom of the range and get no gradient
        // step beyond the base shade.
        assert_eq!(report.rows[1].cells[1].shade, Some(shade(0.0, Theme::Light)));
    }

    #[test]
    fn color_range_is_retained_across_filter_changes() {
        let mut view = view();
        view.click_hourly(HourlySortKey::Total);
        let before = view.hourly_range();
        assert_eq!(before, Some(ColorRange { min: 1.0, max: 5.0 }));

        view.toggle_worker("Bob");
        let report = view.hourly_report();
        assert_eq!(report.color_range, before);
        assert_eq!(report.rows.len(), 2);

        // The next click recomputes against the narrowed selection.
        view.click_hourly(HourlySortKey::Total);
        assert_eq!(view.hourly_range(), Some(ColorRange { min: 1.0, max: 4.0 }));
    }

    #[test]
    fn third_click_clears_sort_and_range() {
        let mut view = view();
        for _ in 0..3 {
            view.click_hourly(HourlySortKey::Total);
        }
        let report = view.hourly_report();
        assert_eq!(report.color_range, None);
        let names: Vec<&str> = report.rows.iter().map(|r| r.worker_name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cy"]);
    }

    #[test]
    fn deselecting_hours_shrinks_summary_denominator() {
        let mut view = view();
        view.toggle_hour(&hour("2024-01-01 10:00"));
        let report = view.summary_report();
        let ann = report.rows.iter().find(|r| r.summary.name == "Ann").unwrap();
        assert_eq!(ann.summary.total_packages, 3);
        assert_eq!(ann.summary.avg_packages_per_hour, 3.0);
        assert!(report.rows.iter().all(|r| r.summary.name != "Cy"));
    }

    #[test]
    fn replacing_dataset_resets_view_state() {
        let mut view = view();
        view.click_summary(SummarySortKey::TotalItems);
        view.clear_workers();
        let fresh = Arc::clone(&view.dataset);
        view.replace_dataset(fresh);
        assert_eq!(view.selection().workers.len(), 3);
        assert!(view.summary_sort().active_key().is_none());
    }

    #[test]
    fn export_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_file_name("员工效率", date), "员工效率_2024-03-09.png");
    }
}
