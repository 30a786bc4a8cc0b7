//! Dataset rows.

use crate::data::Parameter;
use serde::{Deserialize, Serialize};

/// One piece of equipment from an uploaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub name: String,
    pub equipment_type: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

impl EquipmentRecord {
    pub fn value(&self, param: Parameter) -> f64 {
        match param {
            Parameter::Flowrate => self.flowrate,
            Parameter::Pressure => self.pressure,
            Parameter::Temperature => self.temperature,
        }
    }
}
