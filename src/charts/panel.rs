//! Chart panels: one figure plus its drawing surface identity.

use crate::charts::model::Figure;
use crate::charts::SummaryCharts;
use crate::data::Summary;

/// Which of the three summary charts a panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Distribution,
    Averages,
    Ranges,
}

impl PanelKind {
    pub const ALL: [PanelKind; 3] = [
        PanelKind::Distribution,
        PanelKind::Averages,
        PanelKind::Ranges,
    ];

    /// Heading shown above the chart.
    pub fn heading(self) -> &'static str {
        match self {
            PanelKind::Distribution => "Equipment Type Distribution",
            PanelKind::Averages => "Average Parameters",
            PanelKind::Ranges => "Parameter Ranges (Min vs Max)",
        }
    }

    /// File stem used when exporting.
    pub fn file_stem(self) -> &'static str {
        match self {
            PanelKind::Distribution => "type_distribution",
            PanelKind::Averages => "average_parameters",
            PanelKind::Ranges => "parameter_ranges",
        }
    }
}

/// A self-contained chart unit.
///
/// The plot id embeds the container generation, so a rebuilt panel never
/// inherits zoom or drag state from the panel it replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub kind: PanelKind,
    pub figure: Figure,
    pub generation: u64,
}

impl ChartPanel {
    pub fn new(kind: PanelKind, summary: &Summary, generation: u64) -> Self {
        let figure = match kind {
            PanelKind::Distribution => Figure::Pie(SummaryCharts::distribution(summary)),
            PanelKind::Averages => Figure::Bar(SummaryCharts::averages(summary)),
            PanelKind::Ranges => Figure::Bar(SummaryCharts::ranges(summary)),
        };
        Self {
            kind,
            figure,
            generation,
        }
    }

    /// Distribution, Averages, Ranges, in that order.
    pub fn build_all(summary: &Summary, generation: u64) -> Vec<ChartPanel> {
        PanelKind::ALL
            .iter()
            .map(|&kind| Self::new(kind, summary, generation))
            .collect()
    }

    pub fn plot_id(&self) -> String {
        format!("{}_{}", self.kind.file_stem(), self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_all_order() {
        let panels = ChartPanel::build_all(&Summary::default(), 3);
        let kinds: Vec<_> = panels.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, PanelKind::ALL.to_vec());
        assert!(matches!(panels[0].figure, Figure::Pie(_)));
        assert!(matches!(panels[2].figure, Figure::Bar(_)));
        assert_eq!(panels[1].plot_id(), "average_parameters_3");
    }
}
