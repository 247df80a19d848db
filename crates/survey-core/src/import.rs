//! Bulk location import rows.
//!
//! An import source is CSV with at least a `Woreda` column and optionally a
//! `Kebele` column; header matching is case-insensitive and ignores
//! surrounding whitespace. Any other columns (for example the rest of a
//! farmer export) are ignored, so an export file can be fed straight back in.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One location row from an import source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRow {
    /// Blank when the source cell was empty; such rows are skipped on apply.
    pub woreda: String,
    pub kebele: Option<String>,
}

impl LocationRow {
    #[must_use]
    pub fn new(woreda: impl Into<String>, kebele: Option<&str>) -> Self {
        Self {
            woreda: woreda.into().trim().to_string(),
            kebele: kebele
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
        }
    }
}

/// Parse location rows from CSV.
///
/// # Errors
///
/// Returns `CoreError::Validation` if there is no `Woreda` column, or
/// `CoreError::Csv` if the input is not valid CSV.
pub fn read_location_rows<R: Read>(reader: R) -> Result<Vec<LocationRow>, CoreError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let woreda_idx = column("woreda").ok_or_else(|| {
        CoreError::Validation("import source has no 'Woreda' column".into())
    })?;
    let kebele_idx = column("kebele");

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record?;
        let woreda = record.get(woreda_idx).unwrap_or_default();
        let kebele = kebele_idx.and_then(|idx| record.get(idx));
        rows.push(LocationRow::new(woreda, kebele));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_woreda_and_kebele_columns() {
        let input = "Woreda,Kebele\nMecha,Kebele 01\nMecha,Kebele 02\nBahir Dar Zuria,\n";
        let rows = read_location_rows(input.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                LocationRow::new("Mecha", Some("Kebele 01")),
                LocationRow::new("Mecha", Some("Kebele 02")),
                LocationRow::new("Bahir Dar Zuria", None),
            ]
        );
    }

    #[test]
    fn header_match_is_case_insensitive_and_column_order_free() {
        let input = "kebele , WOREDA\n Kebele 01 , Mecha \n";
        let rows = read_location_rows(input.as_bytes()).unwrap();
        assert_eq!(rows, vec![LocationRow::new("Mecha", Some("Kebele 01"))]);
    }

    #[test]
    fn kebele_column_is_optional() {
        let input = "Woreda\nMecha\nDera\n";
        let rows = read_location_rows(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.kebele.is_none()));
    }

    #[test]
    fn missing_woreda_column_is_rejected() {
        let input = "District,Kebele\nMecha,Kebele 01\n";
        let err = read_location_rows(input.as_bytes()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn farmer_export_is_a_valid_import_source() {
        let input = "Name,Type,Woreda,Kebele,Phone,Audio reference,Registered-by\n\
                     Abebe,Smallholder,Mecha,Kebele 01,0911000000,,enumerator1\n";
        let rows = read_location_rows(input.as_bytes()).unwrap();
        assert_eq!(rows, vec![LocationRow::new("Mecha", Some("Kebele 01"))]);
    }
}
