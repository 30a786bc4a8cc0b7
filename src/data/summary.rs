//! Summary statistics handed to the chart pipeline.
//!
//! Every statistic is optional. Absence is kept as `None` here and only
//! collapsed to zero by the chart builders.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// The three equipment parameters, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Flowrate,
    Pressure,
    Temperature,
}

impl Parameter {
    pub const ALL: [Parameter; 3] = [
        Parameter::Flowrate,
        Parameter::Pressure,
        Parameter::Temperature,
    ];

    /// Axis label.
    pub fn label(self) -> &'static str {
        match self {
            Parameter::Flowrate => "Flowrate",
            Parameter::Pressure => "Pressure",
            Parameter::Temperature => "Temperature",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category label -> count, in insertion (document) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeDistribution(Vec<(String, f64)>);

impl TypeDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; an overwritten label keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, count: f64) {
        let label = label.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = count,
            None => self.0.push((label, count)),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, c)| c).sum()
    }

    /// Labels with a negative count.
    pub fn negative_labels(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, c)| *c < 0.0)
            .map(|(l, _)| l.as_str())
            .collect()
    }

    /// Reorder by descending count; equal counts keep their current order.
    pub fn sort_by_count_desc(&mut self) {
        // sort_by is stable
        self.0
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for TypeDistribution {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut dist = TypeDistribution::new();
        for (label, count) in iter {
            dist.insert(label, count);
        }
        dist
    }
}

impl Serialize for TypeDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

struct TypeDistributionVisitor;

impl<'de> Visitor<'de> for TypeDistributionVisitor {
    type Value = TypeDistribution;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of category label to count")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut dist = TypeDistribution(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((label, count)) = access.next_entry::<String, f64>()? {
            dist.insert(label, count);
        }
        Ok(dist)
    }
}

impl<'de> Deserialize<'de> for TypeDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TypeDistributionVisitor)
    }
}

/// Flat statistics mapping produced upstream from dataset rows.
///
/// Unknown keys are not charted but are kept in `extra`, so a mapping that
/// holds only unknown keys still counts as non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_distribution: Option<TypeDistribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_flowrate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_flowrate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_flowrate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<f64>,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Summary {
    /// True only for an empty mapping: no key at all, recognized or not.
    pub fn is_empty(&self) -> bool {
        self.extra.is_empty()
            && self.total_count.is_none()
            && self.type_distribution.is_none()
            && Parameter::ALL
                .iter()
                .all(|&p| self.avg(p).is_none() && self.min(p).is_none() && self.max(p).is_none())
    }

    pub fn avg(&self, param: Parameter) -> Option<f64> {
        match param {
            Parameter::Flowrate => self.avg_flowrate,
            Parameter::Pressure => self.avg_pressure,
            Parameter::Temperature => self.avg_temperature,
        }
    }

    pub fn min(&self, param: Parameter) -> Option<f64> {
        match param {
            Parameter::Flowrate => self.min_flowrate,
            Parameter::Pressure => self.min_pressure,
            Parameter::Temperature => self.min_temperature,
        }
    }

    pub fn max(&self, param: Parameter) -> Option<f64> {
        match param {
            Parameter::Flowrate => self.max_flowrate,
            Parameter::Pressure => self.max_pressure,
            Parameter::Temperature => self.max_temperature,
        }
    }

    pub fn set_avg(&mut self, param: Parameter, value: f64) {
        match param {
            Parameter::Flowrate => self.avg_flowrate = Some(value),
            Parameter::Pressure => self.avg_pressure = Some(value),
            Parameter::Temperature => self.avg_temperature = Some(value),
        }
    }

    pub fn set_range(&mut self, param: Parameter, min: f64, max: f64) {
        match param {
            Parameter::Flowrate => {
                self.min_flowrate = Some(min);
                self.max_flowrate = Some(max);
            }
            Parameter::Pressure => {
                self.min_pressure = Some(min);
                self.max_pressure = Some(max);
            }
            Parameter::Temperature => {
                self.min_temperature = Some(min);
                self.max_temperature = Some(max);
            }
        }
    }

    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_keeps_document_order() {
        let summary =
            Summary::from_json_str(r#"{"type_distribution": {"Valve": 7, "Pump": 3, "HX": 1}}"#)
                .unwrap();
        let dist = summary.type_distribution.unwrap();
        assert_eq!(dist.labels(), vec!["Valve", "Pump", "HX"]);
        assert_eq!(dist.total(), 11.0);
    }

    #[test]
    fn test_missing_keys_stay_none() {
        let summary = Summary::from_json_str(r#"{"avg_flowrate": 12.5}"#).unwrap();
        assert_eq!(summary.avg(Parameter::Flowrate), Some(12.5));
        assert_eq!(summary.avg(Parameter::Pressure), None);
        assert_eq!(summary.max(Parameter::Temperature), None);
        assert!(summary.type_distribution.is_none());
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_empty_mapping_is_empty() {
        assert!(Summary::from_json_str("{}").unwrap().is_empty());
        assert!(Summary::default().is_empty());
        // An empty distribution is still a present key.
        assert!(!Summary::from_json_str(r#"{"type_distribution": {}}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_keys_make_summary_non_empty() {
        let summary =
            Summary::from_json_str(r#"{"dataset_id": 4, "uploaded_at": "2024-01-01"}"#).unwrap();
        assert!(!summary.is_empty());
        assert_eq!(summary.extra.len(), 2);
        assert_eq!(summary.avg(Parameter::Flowrate), None);
        assert!(summary.type_distribution.is_none());
    }

    #[test]
    fn test_known_keys_not_duplicated_in_extra() {
        let summary = Summary::from_json_str(
            r#"{"total_count": 3, "avg_flowrate": 0, "type_distribution": {"Pump": 3}, "note": "x"}"#,
        )
        .unwrap();
        assert_eq!(summary.total_count, Some(3));
        assert_eq!(summary.avg_flowrate, Some(0.0));
        assert_eq!(summary.extra.keys().collect::<Vec<_>>(), vec!["note"]);
    }

    #[test]
    fn test_sort_by_count_desc_is_stable() {
        let mut dist: TypeDistribution =
            vec![("HX", 1.0), ("Pump", 3.0), ("Valve", 1.0), ("Tank", 3.0)].into_iter().collect();
        dist.sort_by_count_desc();
        assert_eq!(dist.labels(), vec!["Pump", "Tank", "HX", "Valve"]);
    }

    #[test]
    fn test_null_and_integer_values() {
        let summary =
            Summary::from_json_str(r#"{"avg_temperature": 0, "min_pressure": null}"#).unwrap();
        assert_eq!(summary.avg(Parameter::Temperature), Some(0.0));
        assert_eq!(summary.min(Parameter::Pressure), None);
    }

    #[test]
    fn test_duplicate_label_overwrites_in_place() {
        let mut dist = TypeDistribution::new();
        dist.insert("Pump", 1.0);
        dist.insert("Valve", 2.0);
        dist.insert("Pump", 5.0);
        assert_eq!(dist.labels(), vec!["Pump", "Valve"]);
        assert_eq!(dist.get("Pump"), Some(5.0));
    }

    #[test]
    fn test_serialize_skips_missing() {
        let mut summary = Summary::default();
        summary.set_range(Parameter::Pressure, 3.0, 5.0);
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"min_pressure":3.0,"max_pressure":5.0}"#);
    }
}
