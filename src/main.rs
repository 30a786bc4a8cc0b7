//! Equipment Charts - summary chart viewer for equipment datasets
//!
//! Opens a desktop window with the type distribution, average parameter and
//! parameter range charts, or renders them to PNG files with `--export`.

use anyhow::{bail, Context};
use clap::Parser;
use eframe::egui;
use equipment_charts::charts::{ChartPanel, StaticChartRenderer};
use equipment_charts::config::AppConfig;
use equipment_charts::data::{load_summary, DataLoader, Summarizer};
use equipment_charts::gui::EquipmentChartsApp;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "equipment-charts", version, about = "Equipment parameter charts")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Equipment CSV file to load on start
    #[arg(long)]
    csv: Option<PathBuf>,

    /// JSON summary file; overrides the summary computed from --csv
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Render the charts as PNG files into this directory and exit
    #[arg(short, long, value_name = "DIR")]
    export: Option<PathBuf>,

    /// Exported image width in pixels
    #[arg(long, requires = "export")]
    width: Option<u32>,

    /// Exported image height in pixels
    #[arg(long, requires = "export")]
    height: Option<u32>,

    /// Open the export directory when done
    #[arg(long, requires = "export")]
    open: bool,
}

/// `RUST_LOG` directives when present and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let cli = Cli::parse();

    let mut config =
        AppConfig::load_or_default(cli.config.as_deref()).context("failed to load config")?;
    if let Some(width) = cli.width {
        config.export.width = width;
    }
    if let Some(height) = cli.height {
        config.export.height = height;
    }

    let records = match &cli.csv {
        Some(path) => Some(
            DataLoader::new(config.columns.clone())
                .load_records(path)
                .with_context(|| format!("failed to load CSV {}", path.display()))?,
        ),
        None => None,
    };

    let summary = match &cli.summary {
        Some(path) => Some(
            load_summary(path)
                .with_context(|| format!("failed to read summary {}", path.display()))?,
        ),
        None => records.as_deref().map(Summarizer::summarize),
    };

    if let Some(dir) = &cli.export {
        let Some(summary) = summary else {
            bail!("--export needs --csv or --summary");
        };

        let panels = ChartPanel::build_all(&summary, 1);
        let written = StaticChartRenderer::export_panels(&panels, dir, &config.export)
            .with_context(|| format!("failed to export charts to {}", dir.display()))?;
        info!(count = written.len(), dir = %dir.display(), "export complete");

        if cli.open {
            open::that(dir).with_context(|| format!("failed to open {}", dir.display()))?;
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([640.0, 480.0])
            .with_title(config.window.title.clone()),
        ..Default::default()
    };

    let title = config.window.title.clone();
    let app = EquipmentChartsApp::new(config, records, summary);
    eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
