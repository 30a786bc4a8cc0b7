//! Static Chart Renderer
//! Renders chart panels to PNG images with plotters, for headless export.
//!
//! Layout per panel:
//! 1. Title centered at the top
//! 2. Pie: wedges from 90° counter-clockwise, labels outside, percentages inside
//! 3. Bars: value axis labeled "Value", dashed light y grid, category labels
//!    under each tick, value annotations above bars, optional legend

use crate::charts::model::{
    BarChart, Figure, PieChart, BAR_ALPHA, GRID_ALPHA, PIE_LABEL_DISTANCE, PIE_PCT_DISTANCE,
};
use crate::charts::palette::Rgb;
use crate::charts::ChartPanel;
use crate::config::ExportConfig;
use crate::error::{AppError, Result};
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

const TITLE_FONT: (&str, u32) = ("sans-serif", 20);
const LABEL_FONT_SIZE: u32 = 14;
/// Largest accepted export side, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn render_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Render(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one panel to PNG bytes.
    pub fn render_panel_to_png(panel: &ChartPanel, width: u32, height: u32) -> Result<Vec<u8>> {
        if width == 0 || height == 0 {
            return Err(AppError::Render(format!(
                "invalid dimensions: {}x{}",
                width, height
            )));
        }

        let len = Some((width, height))
            .filter(|&(w, h)| w <= MAX_DIMENSION && h <= MAX_DIMENSION)
            .and_then(|(w, h)| (w as usize).checked_mul(h as usize))
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| AppError::Render(format!("image too large: {}x{}", width, height)))?;
        let mut buffer = vec![0u8; len];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw_figure(&root, &panel.figure)?;
            root.present().map_err(render_err)?;
        }

        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| AppError::Render("pixel buffer size mismatch".into()))?;
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render every panel into `dir` as `<kind>.png`.
    pub fn export_panels(
        panels: &[ChartPanel],
        dir: &Path,
        config: &ExportConfig,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(panels.len());
        for panel in panels {
            let bytes = Self::render_panel_to_png(panel, config.width, config.height)?;
            let path = dir.join(format!("{}.png", panel.kind.file_stem()));
            std::fs::write(&path, bytes)?;
            info!(path = %path.display(), "exported chart");
            written.push(path);
        }
        Ok(written)
    }

    pub fn draw_figure<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        figure: &Figure,
    ) -> Result<()> {
        root.fill(&WHITE).map_err(render_err)?;
        let area = root.titled(figure.title(), TITLE_FONT).map_err(render_err)?;

        match figure {
            Figure::Pie(pie) => Self::draw_pie(&area, pie),
            Figure::Bar(bars) => Self::draw_bars(&area, bars),
        }
    }

    fn draw_pie<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, chart: &PieChart) -> Result<()> {
        let (w, h) = area.dim_in_pixel();
        let center = (w as f64 / 2.0, h as f64 / 2.0);
        let radius = w.min(h) as f64 * 0.38;

        // Unit circle, y up -> pixels, y down
        let to_px = |(x, y): (f64, f64)| {
            (
                (center.0 + radius * x).round() as i32,
                (center.1 - radius * y).round() as i32,
            )
        };

        for slice in &chart.slices {
            let points: Vec<(i32, i32)> = slice.outline().into_iter().map(to_px).collect();
            area.draw(&Polygon::new(points, rgb(slice.color).filled()))
                .map_err(render_err)?;
        }

        for slice in &chart.slices {
            let (lx, _) = slice.anchor(PIE_LABEL_DISTANCE);
            let h_pos = if lx >= 0.0 { HPos::Left } else { HPos::Right };
            let label_style = TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
                .color(&BLACK)
                .pos(Pos::new(h_pos, VPos::Center));
            area.draw(&Text::new(
                slice.label.clone(),
                to_px(slice.anchor(PIE_LABEL_DISTANCE)),
                label_style,
            ))
            .map_err(render_err)?;

            let pct_style = TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            area.draw(&Text::new(
                slice.percent_label.clone(),
                to_px(slice.anchor(PIE_PCT_DISTANCE)),
                pct_style,
            ))
            .map_err(render_err)?;
        }

        Ok(())
    }

    fn draw_bars<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, chart: &BarChart) -> Result<()> {
        let (x_min, x_max) = chart.x_bounds();
        let (y_min, y_max) = chart.y_bounds();

        let mut ctx = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(render_err)?;

        let ticks = chart.ticks.clone();
        ctx.configure_mesh()
            .disable_mesh()
            .x_labels(ticks.len().max(1))
            .x_label_formatter(&|x| {
                ticks
                    .iter()
                    .find(|(t, _)| (t - x).abs() < 1e-6)
                    .map(|(_, label)| label.clone())
                    .unwrap_or_default()
            })
            .y_desc(chart.y_label.as_str())
            .axis_desc_style(("sans-serif", LABEL_FONT_SIZE).into_font().style(FontStyle::Bold))
            .draw()
            .map_err(render_err)?;

        if chart.y_grid {
            let grid_style = BLACK.mix(GRID_ALPHA).stroke_width(1);
            let step = Self::nice_step(y_max - y_min, 8);
            let mut y = (y_min / step).ceil() * step;
            while y <= y_max {
                ctx.draw_series(DashedLineSeries::new(
                    vec![(x_min, y), (x_max, y)],
                    6,
                    4,
                    grid_style,
                ))
                .map_err(render_err)?;
                y += step;
            }
        }

        for series in &chart.series {
            let drawn = ctx
                .draw_series(series.bars.iter().map(|b| {
                    Rectangle::new(
                        [(b.left(), 0.0), (b.right(), b.value)],
                        rgb(b.color).mix(BAR_ALPHA).filled(),
                    )
                }))
                .map_err(render_err)?;

            if let Some(name) = &series.name {
                let color = rgb(series.color);
                drawn.label(name.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.mix(BAR_ALPHA).filled())
                });
            }

            ctx.draw_series(series.bars.iter().map(|b| {
                Rectangle::new([(b.left(), 0.0), (b.right(), b.value)], BLACK.stroke_width(1))
            }))
            .map_err(render_err)?;
        }

        let annotation_style =
            TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font().style(FontStyle::Bold))
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
        ctx.draw_series(chart.bars().filter_map(|b| {
            b.annotation
                .as_ref()
                .map(|text| Text::new(text.clone(), (b.x, b.value), annotation_style.clone()))
        }))
        .map_err(render_err)?;

        if chart.show_legend {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(render_err)?;
        }

        Ok(())
    }

    /// Round a raw tick step up to 1, 2 or 5 times a power of ten.
    fn nice_step(range: f64, target_steps: usize) -> f64 {
        if range <= 0.0 || !range.is_finite() {
            return 1.0;
        }
        let raw_step = range / target_steps as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let normalized = raw_step / magnitude;

        let nice = if normalized <= 1.0 {
            1.0
        } else if normalized <= 2.0 {
            2.0
        } else if normalized <= 5.0 {
            5.0
        } else {
            10.0
        };

        nice * magnitude
    }
}
