//! Summary Chart Builders
//! Turns a summary mapping into the three chart figures:
//! type distribution (pie), average parameters (bar), parameter ranges (grouped bar).
//!
//! Missing statistics are drawn as zero. Nothing is validated: an inverted
//! min/max pair is drawn exactly as given.

use crate::charts::model::{Bar, BarChart, BarSeries, PieChart, PieSlice, PIE_START_ANGLE};
use crate::charts::palette::{
    cycle, Rgb, AVERAGE_PALETTE, DISTRIBUTION_PALETTE, MAXIMUM_COLOR, MINIMUM_COLOR,
};
use crate::data::{Parameter, Summary};
use tracing::debug;

/// Bar width of the single-series average chart.
pub const AVERAGE_BAR_WIDTH: f64 = 0.8;
/// Bar width of each bar in the min/max groups.
pub const RANGE_BAR_WIDTH: f64 = 0.35;

pub struct SummaryCharts;

impl SummaryCharts {
    /// Pie of `type_distribution`, slices in mapping order.
    ///
    /// A missing or empty distribution, or one whose counts sum to zero,
    /// yields a chart with no slices.
    pub fn distribution(summary: &Summary) -> PieChart {
        let mut chart = PieChart {
            title: "Equipment Type Distribution".to_string(),
            slices: Vec::new(),
        };

        let Some(dist) = summary.type_distribution.as_ref() else {
            return chart;
        };
        let total = dist.total();
        if dist.is_empty() || total <= 0.0 {
            return chart;
        }

        if dist.len() > DISTRIBUTION_PALETTE.len() {
            debug!(
                categories = dist.len(),
                "more categories than palette colors, reusing colors"
            );
        }
        let negative = dist.negative_labels();
        if !negative.is_empty() {
            debug!(labels = ?negative, "negative counts drawn as given");
        }

        let mut angle = PIE_START_ANGLE;
        for (i, (label, count)) in dist.iter().enumerate() {
            let fraction = count / total;
            let sweep = fraction * 360.0;
            chart.slices.push(PieSlice {
                label: label.to_string(),
                value: count,
                fraction,
                start_deg: angle,
                end_deg: angle + sweep,
                color: cycle(&DISTRIBUTION_PALETTE, i),
                percent_label: format!("{:.1}%", fraction * 100.0),
            });
            angle += sweep;
        }

        chart
    }

    /// One bar per parameter average, each annotated with its value.
    pub fn averages(summary: &Summary) -> BarChart {
        let bars = Parameter::ALL
            .iter()
            .enumerate()
            .map(|(i, &param)| {
                let value = summary.avg(param).unwrap_or(0.0);
                Bar {
                    x: i as f64,
                    width: AVERAGE_BAR_WIDTH,
                    value,
                    color: AVERAGE_PALETTE[i],
                    annotation: Some(format!("{:.2}", value)),
                }
            })
            .collect();

        BarChart {
            title: "Average Parameter Values".to_string(),
            y_label: "Value".to_string(),
            ticks: Self::parameter_ticks(),
            series: vec![BarSeries {
                name: None,
                color: AVERAGE_PALETTE[0],
                bars,
            }],
            show_legend: false,
            y_grid: true,
        }
    }

    /// Minimum and maximum bars side by side at each parameter tick.
    pub fn ranges(summary: &Summary) -> BarChart {
        let offset = RANGE_BAR_WIDTH / 2.0;

        for param in Parameter::ALL {
            let (min, max) = (summary.min(param), summary.max(param));
            if let (Some(lo), Some(hi)) = (min, max) {
                if lo > hi {
                    debug!(parameter = %param, min = lo, max = hi, "inverted range drawn as given");
                }
            }
        }

        let series = |name: &str, color: Rgb, offset: f64, pick: fn(&Summary, Parameter) -> Option<f64>| {
            BarSeries {
                name: Some(name.to_string()),
                color,
                bars: Parameter::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, &param)| Bar {
                        x: i as f64 + offset,
                        width: RANGE_BAR_WIDTH,
                        value: pick(summary, param).unwrap_or(0.0),
                        color,
                        annotation: None,
                    })
                    .collect(),
            }
        };

        BarChart {
            title: "Parameter Ranges".to_string(),
            y_label: "Value".to_string(),
            ticks: Self::parameter_ticks(),
            series: vec![
                series("Minimum", MINIMUM_COLOR, -offset, Summary::min),
                series("Maximum", MAXIMUM_COLOR, offset, Summary::max),
            ],
            show_legend: true,
            y_grid: true,
        }
    }

    fn parameter_ticks() -> Vec<(f64, String)> {
        Parameter::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.label().to_string()))
            .collect()
    }
}
