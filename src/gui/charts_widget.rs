//! Charts Widget
//! Scrollable container that shows either a placeholder or the three summary
//! chart panels, rebuilt from scratch on every update.

use crate::charts::{ChartPanel, ChartPlotter};
use crate::data::{EquipmentRecord, Summary};
use egui::{RichText, ScrollArea};
use tracing::debug;

pub const INITIAL_PLACEHOLDER: &str = "No data to visualize. Please upload a CSV file.";
pub const EMPTY_PLACEHOLDER: &str = "No data to visualize";

const PANEL_SPACING: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Empty,
    Populated,
}

/// One child of the container.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Placeholder(String),
    Panel(ChartPanel),
    /// Trailing flexible space below the panels.
    Stretch,
}

/// Holds either one placeholder or the ordered panel list, never both.
#[derive(Debug)]
pub struct ChartContainer {
    nodes: Vec<Node>,
    state: ContainerState,
    generation: u64,
    released: usize,
}

impl Default for ChartContainer {
    fn default() -> Self {
        Self {
            nodes: vec![Node::Placeholder(INITIAL_PLACEHOLDER.to_string())],
            state: ContainerState::Empty,
            generation: 0,
            released: 0,
        }
    }
}

impl ChartContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the container contents.
    ///
    /// Populated when `data` and `summary` are both present and non-empty,
    /// Empty otherwise. All held nodes are dropped before any new node is built.
    pub fn update(&mut self, data: Option<&[EquipmentRecord]>, summary: Option<&Summary>) {
        let released = self.teardown();
        self.generation += 1;

        let has_data = data.is_some_and(|rows| !rows.is_empty());
        let summary = summary.filter(|s| !s.is_empty());

        match (has_data, summary) {
            (true, Some(summary)) => {
                self.nodes = ChartPanel::build_all(summary, self.generation)
                    .into_iter()
                    .map(Node::Panel)
                    .collect();
                self.nodes.push(Node::Stretch);
                self.state = ContainerState::Populated;
            }
            _ => {
                self.nodes = vec![Node::Placeholder(EMPTY_PLACEHOLDER.to_string())];
                self.state = ContainerState::Empty;
            }
        }

        debug!(
            state = ?self.state,
            released,
            children = self.nodes.len(),
            generation = self.generation,
            "chart container updated"
        );
    }

    fn teardown(&mut self) -> usize {
        let count = self.nodes.len();
        self.nodes.clear();
        self.released += count;
        count
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    /// Number of child nodes, stretch included.
    pub fn child_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn panels(&self) -> impl Iterator<Item = &ChartPanel> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Panel(panel) => Some(panel),
            _ => None,
        })
    }

    pub fn panel_count(&self) -> usize {
        self.panels().count()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            Node::Placeholder(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Nodes dropped by teardown over the container's lifetime.
    pub fn released_total(&self) -> usize {
        self.released
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new("Data Visualization").size(18.0).strong());
                ui.add_space(10.0);

                for node in &self.nodes {
                    match node {
                        Node::Placeholder(text) => {
                            ui.centered_and_justified(|ui| {
                                ui.label(RichText::new(text).size(16.0));
                            });
                        }
                        Node::Panel(panel) => {
                            ChartPlotter::draw_panel(ui, panel);
                            ui.add_space(PANEL_SPACING);
                        }
                        Node::Stretch => {
                            ui.add_space(ui.available_height().max(0.0));
                        }
                    }
                }
            });
    }
}
