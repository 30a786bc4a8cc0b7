//! Equipment Charts Main Application
//! Main window with a file toolbar, status line and the chart container.

use crate::charts::{ChartPanel, StaticChartRenderer};
use crate::config::{AppConfig, ColumnConfig};
use crate::data::{load_summary, DataLoader, EquipmentRecord, Summarizer, Summary};
use crate::gui::ChartContainer;
use egui::{RichText, TopBottomPanel};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{info, warn};

/// What the background thread should load.
enum LoadJob {
    Csv(PathBuf),
    Summary(PathBuf),
}

/// Loading result from background thread
enum LoadResult {
    Progress(String),
    Records {
        records: Vec<EquipmentRecord>,
        summary: Summary,
    },
    Summary(Summary),
    Error(String),
}

/// Main application window.
pub struct EquipmentChartsApp {
    config: AppConfig,
    records: Option<Vec<EquipmentRecord>>,
    summary: Option<Summary>,
    container: ChartContainer,
    status: String,

    // Async loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl EquipmentChartsApp {
    /// Build the window state, optionally preloaded with data from the command line.
    pub fn new(
        config: AppConfig,
        records: Option<Vec<EquipmentRecord>>,
        summary: Option<Summary>,
    ) -> Self {
        let mut app = Self {
            config,
            records: None,
            summary: None,
            container: ChartContainer::new(),
            status: "Ready".to_string(),
            load_rx: None,
            is_loading: false,
        };
        if records.is_some() || summary.is_some() {
            app.records = records;
            app.summary = summary;
            app.refresh_charts();
        }
        app
    }

    pub fn container(&self) -> &ChartContainer {
        &self.container
    }

    fn refresh_charts(&mut self) {
        self.container
            .update(self.records.as_deref(), self.summary.as_ref());

        self.status = match (&self.records, &self.summary) {
            (None, Some(_)) => "Summary loaded, no dataset rows to chart".to_string(),
            (Some(rows), _) => format!("Loaded {} rows", rows.len()),
            (None, None) => "Ready".to_string(),
        };
    }

    fn handle_open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(LoadJob::Csv(path));
        }
    }

    fn handle_open_summary(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON Files", &["json"])
            .pick_file()
        {
            self.start_load(LoadJob::Summary(path));
        }
    }

    fn start_load(&mut self, job: LoadJob) {
        if self.is_loading {
            return;
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.status = "Loading...".to_string();

        let columns = self.config.columns.clone();
        thread::spawn(move || Self::run_load(tx, job, columns));
    }

    /// Runs on the background thread.
    fn run_load(tx: Sender<LoadResult>, job: LoadJob, columns: ColumnConfig) {
        let result = match job {
            LoadJob::Csv(path) => {
                let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));
                let mut loader = DataLoader::new(columns);
                loader.load_records(&path).map(|records| {
                    let _ = tx.send(LoadResult::Progress("Summarizing...".to_string()));
                    let summary = Summarizer::summarize(&records);
                    LoadResult::Records { records, summary }
                })
            }
            LoadJob::Summary(path) => {
                let _ = tx.send(LoadResult::Progress("Reading summary...".to_string()));
                load_summary(&path).map(LoadResult::Summary)
            }
        };

        let _ = tx.send(result.unwrap_or_else(|e| LoadResult::Error(e.to_string())));
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            loop {
                let result = match rx.try_recv() {
                    Ok(result) => result,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        // Sender gone without a final result: the loader thread died
                        if should_keep_receiver {
                            warn!("loader thread exited without a result");
                            self.status = "Error: loading stopped unexpectedly".to_string();
                            self.is_loading = false;
                            should_keep_receiver = false;
                        }
                        break;
                    }
                };

                match result {
                    LoadResult::Progress(status) => {
                        self.status = status;
                    }
                    LoadResult::Records { records, summary } => {
                        info!(rows = records.len(), "dataset loaded");
                        self.records = Some(records);
                        self.summary = Some(summary);
                        self.refresh_charts();
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Summary(summary) => {
                        info!("summary loaded");
                        self.summary = Some(summary);
                        self.refresh_charts();
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        warn!(%error, "load failed");
                        self.status = format!("Error: {}", error);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Render the current panels to PNG files in a chosen folder.
    fn handle_export(&mut self) {
        let panels: Vec<ChartPanel> = self.container.panels().cloned().collect();
        if panels.is_empty() {
            self.status = "No charts to export".to_string();
            return;
        }

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        self.status = match StaticChartRenderer::export_panels(&panels, &dir, &self.config.export) {
            Ok(paths) => format!("Exported {} charts to {}", paths.len(), dir.display()),
            Err(e) => format!("Export error: {}", e),
        };
    }

    fn header_text(&self) -> Option<String> {
        self.summary
            .as_ref()
            .and_then(|s| s.total_count)
            .map(|count| format!("Total equipment: {}", count))
    }
}

impl eframe::App for EquipmentChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add_enabled_ui(!self.is_loading, |ui| {
                    if ui.button("Open CSV").clicked() {
                        self.handle_open_csv();
                    }
                    if ui.button("Open Summary").clicked() {
                        self.handle_open_summary();
                    }
                });
                if ui.button("Export PNG").clicked() {
                    self.handle_export();
                }

                ui.separator();
                if self.is_loading {
                    ui.spinner();
                }
                ui.label(self.status.as_str());

                if let Some(header) = self.header_text() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(header).strong());
                    });
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.container.show(ui);
        });
    }
}
