//! Flat tabular projection of farmer records.
//!
//! One row per farmer with a fixed column set. Column order and header text
//! are consumed by downstream spreadsheets and must not change.

use std::io::Write;

use serde::Serialize;
use serde_jsonlines::JsonLinesWriter;

use crate::entities::Farmer;
use crate::errors::CoreError;

/// Export column headers, in output order.
pub const EXPORT_HEADERS: [&str; 7] = [
    "Name",
    "Type",
    "Woreda",
    "Kebele",
    "Phone",
    "Audio reference",
    "Registered-by",
];

/// Default download file name for CSV exports.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "Amhara_Survey_2025.csv";

/// One exported farmer. Optional values become empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub farmer_type: String,
    #[serde(rename = "Woreda")]
    pub woreda: String,
    #[serde(rename = "Kebele")]
    pub kebele: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Audio reference")]
    pub audio_ref: String,
    #[serde(rename = "Registered-by")]
    pub registered_by: String,
}

impl ExportRow {
    /// Cells in `EXPORT_HEADERS` order.
    #[must_use]
    pub fn cells(&self) -> [&str; 7] {
        [
            self.name.as_str(),
            self.farmer_type.as_str(),
            self.woreda.as_str(),
            self.kebele.as_str(),
            self.phone.as_str(),
            self.audio_ref.as_str(),
            self.registered_by.as_str(),
        ]
    }
}

impl From<&Farmer> for ExportRow {
    fn from(farmer: &Farmer) -> Self {
        Self {
            name: farmer.name.clone(),
            farmer_type: farmer
                .farmer_type
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            woreda: farmer.woreda.clone(),
            kebele: farmer.kebele.clone(),
            phone: farmer.phone.clone(),
            audio_ref: farmer.audio_ref.clone().unwrap_or_default(),
            registered_by: farmer.registered_by.clone(),
        }
    }
}

/// Project farmers into export rows, preserving order.
#[must_use]
pub fn to_rows(farmers: &[Farmer]) -> Vec<ExportRow> {
    farmers.iter().map(ExportRow::from).collect()
}

/// Write rows as CSV. The header row is always written, even with no rows.
///
/// # Errors
///
/// Returns `CoreError::Csv` if writing fails.
pub fn write_csv<W: Write>(writer: W, rows: &[ExportRow]) -> Result<(), CoreError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPORT_HEADERS)?;
    for row in rows {
        csv.write_record(row.cells())?;
    }
    csv.flush()?;
    Ok(())
}

/// Render rows as a UTF-8 CSV string.
///
/// # Errors
///
/// Returns `CoreError` if serialization fails.
pub fn to_csv_string(rows: &[ExportRow]) -> Result<String, CoreError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    String::from_utf8(buf).map_err(|e| CoreError::Other(e.into()))
}

/// Write rows as JSON Lines, one object per farmer keyed by export header.
///
/// # Errors
///
/// Returns `CoreError::Io` if writing fails.
pub fn write_jsonl<W: Write>(writer: W, rows: &[ExportRow]) -> Result<(), CoreError> {
    let mut jsonl = JsonLinesWriter::new(writer);
    jsonl.write_all(rows)?;
    jsonl.flush()?;
    Ok(())
}
