use serde::Serialize;

use crate::transformations::ColorRange;

/// Position of `value` inside `range`, in `[0, 1]`.
///
/// `None` means the cell is drawn without a gradient: zero values, no active
/// range, or a range that collapsed to a single value.
pub fn intensity(value: f64, range: Option<ColorRange>) -> Option<f64> {
    let range = range?;
    if value <= 0.0 || range.min == range.max {
        return None;
    }
    Some(((value - range.min) / (range.max - range.min)).clamp(0.0, 1.0))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Blue gradient step for a highlighted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellShade {
    pub level: u32,
    pub opacity_percent: u32,
}

impl CellShade {
    /// Utility-class form, e.g. `bg-blue-150/0.60`.
    pub fn css_class(&self) -> String {
        format!("bg-blue-{}/0.{:02}", self.level, self.opacity_percent)
    }
}

pub fn shade(ratio: f64, theme: Theme) -> CellShade {
    let r = ratio.clamp(0.0, 1.0);
    let (level, opacity) = match theme {
        Theme::Light => (100.0 + r * 100.0, 30.0 + r * 60.0),
        Theme::Dark => (50.0 + r * 100.0, 20.0 + r * 40.0),
    };
    CellShade {
        level: level.floor() as u32,
        opacity_percent: opacity.floor() as u32,
    }
}

/// Badge shown next to a worker's hourly package average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyTier {
    High,
    Medium,
    Normal,
}

impl EfficiencyTier {
    pub fn from_avg(avg_packages_per_hour: f64) -> Self {
        if avg_packages_per_hour > 15.0 {
            EfficiencyTier::High
        } else if avg_packages_per_hour > 10.0 {
            EfficiencyTier::Medium
        } else {
            EfficiencyTier::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankBadge {
    Gold,
    Silver,
    Bronze,
    Plain,
}

impl RankBadge {
    pub fn for_position(index: usize, podium: bool) -> Self {
        match (podium, index) {
            (true, 0) => RankBadge::Gold,
            (true, 1) => RankBadge::Silver,
            (true, 2) => RankBadge::Bronze,
            _ => RankBadge::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: Option<ColorRange> = Some(ColorRange { min: 2.0, max: 6.0 });

    #[test]
    fn intensity_is_linear_inside_range() {
        assert_eq!(intensity(2.0, RANGE), Some(0.0));
        assert_eq!(intensity(4.0, RANGE), Some(0.5));
        assert_eq!(intensity(6.0, RANGE), Some(1.0));
    }

    #[test]
    fn intensity_suppressed_cases() {
        assert_eq!(intensity(0.0, RANGE), None);
        assert_eq!(intensity(3.0, None), None);
        assert_eq!(intensity(3.0, Some(ColorRange { min: 3.0, max: 3.0 })), None);
    }

    #[test]
    fn intensity_clamps_values_outside_retained_range() {
        assert_eq!(intensity(1.0, RANGE), Some(0.0));
        assert_eq!(intensity(9.0, RANGE), Some(1.0));
    }

    #[test]
    fn shades_per_theme() {
        assert_eq!(
            shade(0.5, Theme::Light),
            CellShade {
                level: 150,
                opacity_percent: 60
            }
        );
        assert_eq!(
            shade(1.0, Theme::Dark),
            CellShade {
                level: 150,
                opacity_percent: 60
            }
        );
        assert_eq!(shade(0.0, Theme::Dark).css_class(), "bg-blue-50/0.20");
    }

    #[test]
    fn tiers_and_badges() {
        assert_eq!(EfficiencyTier::from_avg(15.1), EfficiencyTier::High);
        assert_eq!(EfficiencyTier::from_avg(15.0), EfficiencyTier::Medium);
        assert_eq!(EfficiencyTier::from_avg(10.0), EfficiencyTier::Normal);
        assert_eq!(RankBadge::for_position(0, true), RankBadge::Gold);
        assert_eq!(RankBadge::for_position(2, true), RankBadge::Bronze);
        assert_eq!(RankBadge::for_position(3, true), RankBadge::Plain);
        assert_eq!(RankBadge::for_position(0, false), RankBadge::Plain);
    }
}
