//! Charts module - Summary charts and their renderers

pub mod model;
pub mod palette;
mod panel;
mod plotter;
mod renderer;
mod summary_charts;

pub use model::Figure;
pub use panel::{ChartPanel, PanelKind};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use summary_charts::SummaryCharts;
