//! Backend-neutral chart figures.
//!
//! A figure holds everything needed to draw a chart: geometry, colors and
//! the exact annotation strings. Both the interactive plotter and the static
//! renderer draw from these, so tests can check a chart without pixels.

use crate::charts::palette::Rgb;

/// Angle of the first slice edge, degrees counter-clockwise from +x.
pub const PIE_START_ANGLE: f64 = 90.0;
/// Radial position of slice labels, as a fraction of the radius.
pub const PIE_LABEL_DISTANCE: f64 = 1.1;
/// Radial position of percentage annotations.
pub const PIE_PCT_DISTANCE: f64 = 0.6;

/// Segments per full turn when approximating pie arcs.
pub const ARC_SEGMENTS: f64 = 180.0;

pub const BAR_ALPHA: f64 = 0.8;
pub const GRID_ALPHA: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the total, 0..=1.
    pub fraction: f64,
    pub start_deg: f64,
    pub end_deg: f64,
    pub color: Rgb,
    /// Percentage annotation, one decimal place.
    pub percent_label: String,
}

impl PieSlice {
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }

    /// Point at `distance` radii along the slice bisector, unit circle at origin.
    pub fn anchor(&self, distance: f64) -> (f64, f64) {
        let rad = self.mid_deg().to_radians();
        (distance * rad.cos(), distance * rad.sin())
    }

    /// Closed wedge on the unit circle: center, then the arc from start to end.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let sweep = self.end_deg - self.start_deg;
        let steps = ((sweep / 360.0) * ARC_SEGMENTS).ceil().max(1.0) as usize;

        let mut points = Vec::with_capacity(steps + 2);
        points.push((0.0, 0.0));
        for i in 0..=steps {
            let angle = (self.start_deg + sweep * i as f64 / steps as f64).to_radians();
            points.push((angle.cos(), angle.sin()));
        }
        points
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Bar center on the x axis.
    pub x: f64,
    pub width: f64,
    pub value: f64,
    pub color: Rgb,
    /// Text drawn centered just above the bar's top edge.
    pub annotation: Option<String>,
}

impl Bar {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// A set of bars sharing one legend entry (or none).
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: Option<String>,
    pub color: Rgb,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    /// Tick position and its category label.
    pub ticks: Vec<(f64, String)>,
    pub series: Vec<BarSeries>,
    pub show_legend: bool,
    /// Dashed, low-opacity horizontal grid lines.
    pub y_grid: bool,
}

impl BarChart {
    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.series.iter().flat_map(|s| s.bars.iter())
    }

    /// Value-axis bounds: always includes zero, with headroom for annotations.
    ///
    /// An all-zero chart gets a unit axis so zero-height bars still sit on a
    /// visible baseline.
    pub fn y_bounds(&self) -> (f64, f64) {
        let (lo, hi) = self
            .bars()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), b| (lo.min(b.value), hi.max(b.value)));
        if lo == hi {
            return (0.0, 1.0);
        }
        let pad = (hi - lo) * 0.1;
        (if lo < 0.0 { lo - pad } else { 0.0 }, if hi > 0.0 { hi + pad } else { 0.0 })
    }

    /// Category-axis bounds covering every bar edge.
    pub fn x_bounds(&self) -> (f64, f64) {
        let lo = self.bars().map(Bar::left).fold(f64::INFINITY, f64::min);
        let hi = self.bars().map(Bar::right).fold(f64::NEG_INFINITY, f64::max);
        if lo.is_finite() && hi.is_finite() {
            (lo - 0.2, hi + 0.2)
        } else {
            (-0.5, 0.5)
        }
    }
}

/// One drawable figure.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Pie(PieChart),
    Bar(BarChart),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Pie(p) => &p.title,
            Figure::Bar(b) => &b.title,
        }
    }
}
