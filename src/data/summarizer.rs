//! Summary Producer
//! Reduces equipment rows to the flat statistics mapping the charts consume.

use crate::data::{EquipmentRecord, Parameter, Summary, TypeDistribution};
use statrs::statistics::Statistics;
use tracing::debug;

/// Computes type distribution and min/avg/max per parameter.
pub struct Summarizer;

impl Summarizer {
    /// Summarize a set of rows.
    ///
    /// An empty row set yields an empty summary, which the chart container
    /// treats as "no data".
    pub fn summarize(records: &[EquipmentRecord]) -> Summary {
        if records.is_empty() {
            return Summary::default();
        }

        let mut summary = Summary {
            total_count: Some(records.len() as u64),
            type_distribution: Some(Self::type_distribution(records)),
            ..Summary::default()
        };

        for param in Parameter::ALL {
            let values: Vec<f64> = records
                .iter()
                .map(|r| r.value(param))
                .filter(|v| !v.is_nan())
                .collect();
            if values.is_empty() {
                continue;
            }

            summary.set_avg(param, Statistics::mean(&values));
            summary.set_range(param, Statistics::min(&values), Statistics::max(&values));
        }

        debug!(rows = records.len(), "summary computed");
        summary
    }

    /// Count rows per equipment type, most frequent first.
    ///
    /// Ties keep first-seen order.
    pub fn type_distribution(records: &[EquipmentRecord]) -> TypeDistribution {
        let mut dist = TypeDistribution::new();
        for record in records {
            let count = dist.get(&record.equipment_type).unwrap_or(0.0);
            dist.insert(record.equipment_type.as_str(), count + 1.0);
        }
        dist.sort_by_count_desc();
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(name: &str, kind: &str, f: f64, p: f64, t: f64) -> EquipmentRecord {
        EquipmentRecord {
            name: name.to_string(),
            equipment_type: kind.to_string(),
            flowrate: f,
            pressure: p,
            temperature: t,
        }
    }

    #[test]
    fn test_empty_rows_give_empty_summary() {
        let summary = Summarizer::summarize(&[]);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_stats_per_parameter() {
        let rows = vec![
            record("P-1", "Pump", 10.0, 3.0, 80.0),
            record("V-1", "Valve", 15.0, 5.0, 100.0),
            record("P-2", "Pump", 12.5, 4.0, 90.0),
        ];
        let summary = Summarizer::summarize(&rows);

        assert_eq!(summary.total_count, Some(3));
        assert_relative_eq!(summary.avg(Parameter::Flowrate).unwrap(), 12.5);
        assert_relative_eq!(summary.avg(Parameter::Pressure).unwrap(), 4.0);
        assert_relative_eq!(summary.avg(Parameter::Temperature).unwrap(), 90.0);
        assert_eq!(summary.min(Parameter::Flowrate), Some(10.0));
        assert_eq!(summary.max(Parameter::Flowrate), Some(15.0));
        assert_eq!(summary.min(Parameter::Temperature), Some(80.0));
        assert_eq!(summary.max(Parameter::Temperature), Some(100.0));
    }

    #[test]
    fn test_distribution_most_frequent_first() {
        let rows = vec![
            record("HX-1", "Heat Exchanger", 1.0, 1.0, 1.0),
            record("V-1", "Valve", 1.0, 1.0, 1.0),
            record("V-2", "Valve", 1.0, 1.0, 1.0),
            record("P-1", "Pump", 1.0, 1.0, 1.0),
        ];
        let dist = Summarizer::type_distribution(&rows);
        assert_eq!(dist.labels(), vec!["Valve", "Heat Exchanger", "Pump"]);
        assert_eq!(dist.get("Valve"), Some(2.0));
        assert_eq!(dist.total(), 4.0);
    }

    #[test]
    fn test_nan_values_are_skipped() {
        let rows = vec![
            record("P-1", "Pump", f64::NAN, 2.0, 1.0),
            record("P-2", "Pump", 4.0, 2.0, 1.0),
        ];
        let summary = Summarizer::summarize(&rows);
        assert_eq!(summary.avg(Parameter::Flowrate), Some(4.0));
        assert_eq!(summary.min(Parameter::Flowrate), Some(4.0));
    }
}
