//! GUI module - User interface components

mod app;
mod charts_widget;

pub use app::EquipmentChartsApp;
pub use charts_widget::{ChartContainer, ContainerState, EMPTY_PLACEHOLDER, INITIAL_PLACEHOLDER};
