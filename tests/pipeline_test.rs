//! End-to-end tests: summary JSON or CSV in, chart panels and PNG files out.
//!
//! Run: cargo test --test pipeline_test

use equipment_charts::charts::{ChartPanel, Figure, PanelKind, StaticChartRenderer};
use equipment_charts::config::{AppConfig, ExportConfig};
use equipment_charts::data::{DataLoader, EquipmentRecord, Summarizer, Summary};
use equipment_charts::gui::{ChartContainer, ContainerState, EMPTY_PLACEHOLDER};
use plotters::style::{FontDesc, FontFamily, FontStyle};

const SCENARIO: &str = r#"{
    "type_distribution": {"Pump": 3, "Valve": 7},
    "avg_flowrate": 12.5, "avg_pressure": 4.0, "avg_temperature": 0,
    "min_flowrate": 10, "max_flowrate": 15,
    "min_pressure": 3, "max_pressure": 5,
    "min_temperature": 0, "max_temperature": 0
}"#;

fn scenario() -> Summary {
    Summary::from_json_str(SCENARIO).unwrap()
}

fn rows() -> Vec<EquipmentRecord> {
    vec![EquipmentRecord {
        name: "P-1".into(),
        equipment_type: "Pump".into(),
        flowrate: 10.0,
        pressure: 3.0,
        temperature: 0.0,
    }]
}

/// Static rendering lays out text with system fonts; skip when none exist.
fn fonts_available() -> bool {
    FontDesc::new(FontFamily::SansSerif, 12.0, FontStyle::Normal)
        .box_size("x")
        .is_ok()
}

fn panel<'a>(panels: &'a [ChartPanel], kind: PanelKind) -> &'a Figure {
    &panels
        .iter()
        .find(|p| p.kind == kind)
        .expect("panel present")
        .figure
}

#[test]
fn scenario_builds_expected_charts() {
    let panels = ChartPanel::build_all(&scenario(), 1);

    let Figure::Pie(pie) = panel(&panels, PanelKind::Distribution) else {
        panic!("distribution should be a pie");
    };
    let labels: Vec<_> = pie.slices.iter().map(|s| s.label.as_str()).collect();
    let pcts: Vec<_> = pie.slices.iter().map(|s| s.percent_label.as_str()).collect();
    assert_eq!(labels, vec!["Pump", "Valve"]);
    assert_eq!(pcts, vec!["30.0%", "70.0%"]);

    let Figure::Bar(averages) = panel(&panels, PanelKind::Averages) else {
        panic!("averages should be bars");
    };
    let annotations: Vec<_> = averages
        .bars()
        .map(|b| b.annotation.clone().unwrap_or_default())
        .collect();
    assert_eq!(annotations, vec!["12.50", "4.00", "0.00"]);

    let Figure::Bar(ranges) = panel(&panels, PanelKind::Ranges) else {
        panic!("ranges should be bars");
    };
    let pairs: Vec<(f64, f64)> = ranges.series[0]
        .bars
        .iter()
        .zip(&ranges.series[1].bars)
        .map(|(lo, hi)| (lo.value, hi.value))
        .collect();
    assert_eq!(pairs, vec![(10.0, 15.0), (3.0, 5.0), (0.0, 0.0)]);
    let ticks: Vec<f64> = ranges.ticks.iter().map(|(x, _)| *x).collect();
    assert_eq!(ticks, vec![0.0, 1.0, 2.0]);
}

#[test]
fn container_transitions() {
    let data = rows();
    let summary = scenario();
    let mut container = ChartContainer::new();

    container.update(Some(data.as_slice()), Some(&summary));
    container.update(Some(data.as_slice()), Some(&summary));
    assert_eq!(container.state(), ContainerState::Populated);
    assert_eq!(container.panel_count(), 3);
    assert_eq!(container.child_count(), 4);

    container.update(None, None);
    assert_eq!(container.state(), ContainerState::Empty);
    assert_eq!(container.panel_count(), 0);
    assert_eq!(container.child_count(), 1);
    assert_eq!(container.placeholder(), Some(EMPTY_PLACEHOLDER));
}

#[test]
fn empty_distribution_renders_without_slices() {
    let summary = Summary::from_json_str(r#"{"type_distribution": {}}"#).unwrap();
    let panels = ChartPanel::build_all(&summary, 1);
    let Figure::Pie(pie) = panel(&panels, PanelKind::Distribution) else {
        panic!("distribution should be a pie");
    };
    assert!(pie.slices.is_empty());
}

#[test]
fn csv_to_charts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("equipment.csv");
    std::fs::write(
        &path,
        "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
         Pump-1,Pump,100,5,110\n\
         Valve-1,Valve,50,3,100\n\
         Valve-2,Valve,60,4,90\n",
    )
    .unwrap();

    let config = AppConfig::default();
    let records = DataLoader::new(config.columns)
        .load_records(&path)
        .unwrap();
    let summary = Summarizer::summarize(&records);
    assert_eq!(summary.total_count, Some(3));

    let mut container = ChartContainer::new();
    container.update(Some(records.as_slice()), Some(&summary));
    assert_eq!(container.state(), ContainerState::Populated);

    let pie = container
        .panels()
        .find_map(|p| match &p.figure {
            Figure::Pie(pie) => Some(pie.clone()),
            _ => None,
        })
        .unwrap();
    let labels: Vec<_> = pie.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Valve", "Pump"]);
    assert_eq!(pie.slices[0].percent_label, "66.7%");
}

#[test]
fn export_writes_png_files() {
    if !fonts_available() {
        eprintln!("no system fonts, skipping static render");
        return;
    }

    let mut inverted = Summary::default();
    inverted.min_flowrate = Some(20.0);
    inverted.max_flowrate = Some(10.0);
    inverted.min_pressure = Some(5.0);
    inverted.max_pressure = Some(-1.0);

    let empty_dist = Summary::from_json_str(r#"{"type_distribution": {}}"#).unwrap();

    for summary in [scenario(), inverted, empty_dist] {
        let dir = tempfile::tempdir().unwrap();
        let panels = ChartPanel::build_all(&summary, 1);
        let written =
            StaticChartRenderer::export_panels(&panels, dir.path(), &ExportConfig::default())
                .unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["type_distribution.png", "average_parameters.png", "parameter_ranges.png"]
        );

        for path in &written {
            let img = image::open(path).unwrap();
            assert_eq!(img.width(), 800);
            assert_eq!(img.height(), 500);
        }
    }
}
