//! CSV Data Loader Module
//! Handles CSV file loading and equipment row extraction using Polars.

use crate::config::ColumnConfig;
use crate::data::{EquipmentRecord, Summary};
use crate::error::{AppError, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::{info, warn};

/// Handles CSV file loading with Polars for high performance.
pub struct DataLoader {
    columns: ColumnConfig,
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(ColumnConfig::default())
    }
}

impl DataLoader {
    pub fn new(columns: ColumnConfig) -> Self {
        Self {
            columns,
            df: None,
        }
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame> {
        let path_str = file_path.to_string_lossy().to_string();

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        info!(path = %path_str, rows = df.height(), "loaded CSV");
        Ok(&*self.df.insert(df))
    }

    /// Load a CSV file and extract its equipment rows in one step.
    pub fn load_records(&mut self, file_path: &Path) -> Result<Vec<EquipmentRecord>> {
        self.load_csv(file_path)?;
        let records = self.records()?;
        info!(
            rows = self.get_row_count(),
            columns = ?self.get_columns(),
            kept = records.len(),
            "extracted equipment rows"
        );
        Ok(records)
    }

    /// Extract rows from the loaded DataFrame.
    pub fn records(&self) -> Result<Vec<EquipmentRecord>> {
        match &self.df {
            Some(df) => Self::records_from_dataframe(df, &self.columns),
            None => Ok(Vec::new()),
        }
    }

    /// Extract equipment rows from a DataFrame.
    ///
    /// The type and the three parameter columns are required; the name
    /// column is optional. Rows with a null type or a null/unparseable
    /// parameter are skipped.
    pub fn records_from_dataframe(
        df: &DataFrame,
        columns: &ColumnConfig,
    ) -> Result<Vec<EquipmentRecord>> {
        let types = string_column(df, &columns.equipment_type)?;
        let types = types.str()?;
        let names = string_column(df, &columns.name).ok();
        let names = match &names {
            Some(col) => Some(col.str()?),
            None => None,
        };

        let flow = float_column(df, &columns.flowrate)?;
        let flow = flow.f64()?;
        let pressure = float_column(df, &columns.pressure)?;
        let pressure = pressure.f64()?;
        let temperature = float_column(df, &columns.temperature)?;
        let temperature = temperature.f64()?;

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = 0usize;

        for i in 0..df.height() {
            match (types.get(i), flow.get(i), pressure.get(i), temperature.get(i)) {
                (Some(kind), Some(f), Some(p), Some(t)) => {
                    let name = names
                        .and_then(|n| n.get(i))
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("row {}", i + 1));
                    records.push(EquipmentRecord {
                        name,
                        equipment_type: kind.to_string(),
                        flowrate: f,
                        pressure: p,
                        temperature: t,
                    });
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, "skipped rows with missing values");
        }
        Ok(records)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }
}

fn string_column(df: &DataFrame, name: &str) -> Result<Column> {
    let col = df
        .column(name)
        .map_err(|_| AppError::MissingColumn(name.to_string()))?;
    Ok(col.cast(&DataType::String)?)
}

fn float_column(df: &DataFrame, name: &str) -> Result<Column> {
    let col = df
        .column(name)
        .map_err(|_| AppError::MissingColumn(name.to_string()))?;
    Ok(col.cast(&DataType::Float64)?)
}

/// Read a JSON summary file.
pub fn load_summary(path: &Path) -> Result<Summary> {
    let content = std::fs::read_to_string(path)?;
    let summary = Summary::from_json_str(&content)?;
    info!(path = %path.display(), empty = summary.is_empty(), "loaded summary");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "Equipment Name,Type,Flowrate,Pressure,Temperature\n\
                       Pump-1,Pump,120.5,5.2,110.0\n\
                       Valve-1,Valve,60.0,4.1,105.0\n\
                       Valve-2,Valve,,4.0,100.0\n";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_records_skips_incomplete_rows() {
        let file = write_csv(CSV);
        let mut loader = DataLoader::default();
        let records = loader.load_records(file.path()).unwrap();

        assert_eq!(loader.get_row_count(), 3);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Pump-1");
        assert_eq!(records[0].equipment_type, "Pump");
        assert_eq!(records[1].flowrate, 60.0);
        assert_eq!(loader.get_columns().len(), 5);
    }

    #[test]
    fn test_missing_required_column() {
        let file = write_csv("Type,Flowrate,Pressure\nPump,1,2\n");
        let mut loader = DataLoader::default();
        let err = loader.load_records(file.path()).unwrap_err();
        assert!(matches!(err, AppError::MissingColumn(ref c) if c == "Temperature"));
    }

    #[test]
    fn test_name_column_optional() {
        let df = df!(
            "Type" => ["Pump", "Valve"],
            "Flowrate" => [1.0, 2.0],
            "Pressure" => [3.0, 4.0],
            "Temperature" => [5.0, 6.0]
        )
        .unwrap();

        let records = DataLoader::records_from_dataframe(&df, &ColumnConfig::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "row 2");
        assert_eq!(records[1].temperature, 6.0);
    }

    #[test]
    fn test_load_summary_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"avg_pressure": 4.0, "type_distribution": {"Pump": 3}}"#)
            .unwrap();

        let summary = load_summary(file.path()).unwrap();
        assert_eq!(summary.avg_pressure, Some(4.0));
        assert_eq!(summary.type_distribution.unwrap().len(), 1);
    }
}
