//! Equipment Charts - summary statistics rendered as pie, bar and grouped bar charts.
//!
//! The binary wraps this library in an eframe window or a headless PNG export.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod gui;

pub use error::{AppError, Result};
