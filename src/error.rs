//! Error types shared by the loader, config and static renderer.
//!
//! The chart builders themselves never fail; only the edges do.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Invalid summary JSON: {0}")]
    SummaryJson(#[from] serde_json::Error),
    #[error("Invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Rendering error: {0}")]
    Render(String),
    #[error("PNG encoding error: {0}")]
    Image(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::MissingColumn("Flowrate".into());
        assert_eq!(err.to_string(), "Missing column: Flowrate");

        let err = AppError::Render("backend gone".into());
        assert_eq!(err.to_string(), "Rendering error: backend gone");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = json_err.into();
        assert!(err.to_string().starts_with("Invalid summary JSON"));
    }
}
