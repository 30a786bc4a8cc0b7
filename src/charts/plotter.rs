//! Chart Plotter Module
//! Draws chart panels interactively using egui_plot.

use crate::charts::model::{
    BarChart, Figure, PieChart, BAR_ALPHA, PIE_LABEL_DISTANCE, PIE_PCT_DISTANCE,
};
use crate::charts::palette::Rgb;
use crate::charts::ChartPanel;
use egui::{Align2, Color32, RichText, Stroke};
use egui_plot::{
    Bar, BarChart as PlotBarChart, GridMark, Legend, Plot, PlotPoint, PlotPoints, Polygon, Text,
};

/// Plot height inside a panel card.
const PLOT_HEIGHT: f32 = 360.0;

pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

fn color32_alpha(rgb: Rgb, alpha: f64) -> Color32 {
    Color32::from_rgba_unmultiplied(rgb.0, rgb.1, rgb.2, (alpha * 255.0).round() as u8)
}

/// Draws chart panels with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw one panel card: heading plus its figure.
    pub fn draw_panel(ui: &mut egui::Ui, panel: &ChartPanel) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(panel.kind.heading()).size(14.0).strong());
                ui.add_space(6.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(panel.figure.title()).size(12.0).strong());
                });

                let id = panel.plot_id();
                match &panel.figure {
                    Figure::Pie(pie) => Self::draw_pie_chart(ui, &id, pie),
                    Figure::Bar(bars) => Self::draw_bar_chart(ui, &id, bars),
                }
            });
    }

    pub fn draw_pie_chart(ui: &mut egui::Ui, id: &str, chart: &PieChart) {
        Plot::new(id)
            .height(PLOT_HEIGHT)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(-1.4)
            .include_x(1.4)
            .include_y(-1.3)
            .include_y(1.3)
            .show(ui, |plot_ui| {
                for slice in &chart.slices {
                    let outline: Vec<[f64; 2]> =
                        slice.outline().into_iter().map(|(x, y)| [x, y]).collect();
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(outline))
                            .fill_color(color32(slice.color))
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(&slice.label),
                    );
                }

                // Text goes after every wedge so no wedge paints over a label
                for slice in &chart.slices {
                    let (lx, ly) = slice.anchor(PIE_LABEL_DISTANCE);
                    let align = if lx >= 0.0 {
                        Align2::LEFT_CENTER
                    } else {
                        Align2::RIGHT_CENTER
                    };
                    plot_ui.text(Text::new(PlotPoint::new(lx, ly), slice.label.as_str()).anchor(align));

                    let (px, py) = slice.anchor(PIE_PCT_DISTANCE);
                    plot_ui.text(
                        Text::new(PlotPoint::new(px, py), slice.percent_label.as_str())
                            .color(Color32::BLACK)
                            .anchor(Align2::CENTER_CENTER),
                    );
                }
            });
    }

    /// Bar or grouped bar chart.
    /// egui_plot grid lines are solid; the dashed style only shows in static exports.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, chart: &BarChart) {
        let (x_min, x_max) = chart.x_bounds();
        let (y_min, y_max) = chart.y_bounds();

        let ticks = chart.ticks.clone();
        let tick_labels = chart.ticks.clone();

        let mut plot = Plot::new(id)
            .height(PLOT_HEIGHT)
            .y_axis_label(chart.y_label.clone())
            .show_grid([false, chart.y_grid])
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(x_min)
            .include_x(x_max)
            .include_y(y_min)
            .include_y(y_max)
            // Category ticks only at the parameter positions
            .x_grid_spacer(move |_input| {
                ticks
                    .iter()
                    .map(|(x, _)| GridMark {
                        value: *x,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                tick_labels
                    .iter()
                    .find(|(x, _)| (x - mark.value).abs() < 1e-6)
                    .map(|(_, label)| label.clone())
                    .unwrap_or_default()
            });
        if chart.show_legend {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            for series in &chart.series {
                let bars: Vec<Bar> = series
                    .bars
                    .iter()
                    .map(|b| {
                        Bar::new(b.x, b.value)
                            .width(b.width)
                            .fill(color32_alpha(b.color, BAR_ALPHA))
                            .stroke(Stroke::new(1.5, Color32::BLACK))
                    })
                    .collect();

                let mut bar_chart = PlotBarChart::new(bars).color(color32(series.color));
                if let Some(name) = &series.name {
                    bar_chart = bar_chart.name(name);
                }
                plot_ui.bar_chart(bar_chart);
            }

            for bar in chart.bars() {
                if let Some(text) = &bar.annotation {
                    plot_ui.text(
                        Text::new(PlotPoint::new(bar.x, bar.value), RichText::new(text).strong())
                            .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }
        });
    }
}
