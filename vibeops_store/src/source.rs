//! Tabular source readers.
//!
//! Both readers return the parsed rows together with the set of columns the
//! source actually supplied, so aggregates can tell a zero from a missing
//! column.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use tracing::debug;
use vibeops_core::{Field, PatientRecord};

use crate::{Result, StoreError};

/// On-disk layout of a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    /// Pick a format from the file extension. Anything that is not `.json`
    /// is read as CSV.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

pub(crate) type Parsed = (Vec<PatientRecord>, BTreeSet<Field>);

pub(crate) fn read_path(path: &Path) -> Result<Parsed> {
    let format = SourceFormat::from_path(path);
    debug!("Reading {:?} source from {}", format, path.display());

    match format {
        SourceFormat::Csv => parse_csv(std::fs::File::open(path)?),
        SourceFormat::Json => parse_json(&std::fs::read_to_string(path)?),
    }
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Parsed> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<Option<Field>> = reader
        .headers()?
        .iter()
        .map(Field::from_column)
        .collect();

    let fields: BTreeSet<Field> = columns.iter().flatten().copied().collect();
    if !fields.contains(&Field::PatientId) {
        return Err(StoreError::MissingIdColumn);
    }

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let mut record = PatientRecord::default();

        for (cell, column) in row.iter().zip(&columns) {
            if let Some(field) = column {
                set_cell(&mut record, *field, cell, index + 1)?;
            }
        }

        records.push(record);
    }

    Ok((records, fields))
}

pub(crate) fn parse_json(text: &str) -> Result<Parsed> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(text)?;

    let mut fields = BTreeSet::new();
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        fields.extend(row.keys().filter_map(|key| Field::from_column(key)));
        records.push(serde_json::from_value(serde_json::Value::Object(row))?);
    }

    // An empty array still describes a typed, empty table.
    if records.is_empty() {
        fields.extend(Field::ALL);
    } else if !fields.contains(&Field::PatientId) {
        return Err(StoreError::MissingIdColumn);
    }

    Ok((records, fields))
}

fn set_cell(record: &mut PatientRecord, field: Field, cell: &str, row: usize) -> Result<()> {
    let invalid = || StoreError::InvalidValue {
        row,
        column: field.column(),
        value: cell.to_string(),
    };

    match field {
        Field::PatientId => record.patient_id = cell.to_string(),
        Field::Age => {
            record.age = if cell.is_empty() {
                0
            } else {
                cell.parse().map_err(|_| invalid())?
            };
        }
        Field::Gender => record.gender = cell.to_string(),
        Field::Diagnosis => record.diagnosis = cell.to_string(),
        Field::AdmissionDate => record.admission_date = cell.to_string(),
        Field::Status => record.status = cell.to_string(),
        Field::BillAmount => {
            let amount: f64 = if cell.is_empty() {
                0.0
            } else {
                cell.parse().map_err(|_| invalid())?
            };
            if !amount.is_finite() {
                return Err(invalid());
            }
            record.bill_amount = amount;
        }
        Field::ClinicalNotes => record.clinical_notes = cell.to_string(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CSV: &str = "\
patient_id,age,gender,diagnosis,admission_date,status,bill_amount,clinical_notes
P-001,34,F,Influenza,2026-01-03,Active,1200.50,Fever and cough
P-002,61,M,Chronic Sinusitis,2026-01-05,Outpatient,430,Recurring congestion
";

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("data/patients.json")),
            SourceFormat::Json
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("patients_dummy.csv")),
            SourceFormat::Csv
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("patients")),
            SourceFormat::Csv
        );
    }

    #[test]
    fn test_parse_csv_full() {
        let Ok((records, fields)) = parse_csv(FULL_CSV.as_bytes()) else {
            panic!("full CSV should parse");
        };

        assert_eq!(records.len(), 2);
        assert_eq!(fields.len(), Field::ALL.len());
        assert_eq!(records[0].patient_id, "P-001");
        assert_eq!(records[0].age, 34);
        assert!((records[0].bill_amount - 1200.5).abs() < f64::EPSILON);
        assert_eq!(records[1].clinical_notes, "Recurring congestion");
    }

    #[test]
    fn test_parse_csv_partial_columns() {
        let csv = "patient_id,diagnosis,status,bill_amount\nP-001,Flu,Active,1000\n";
        let Ok((records, fields)) = parse_csv(csv.as_bytes()) else {
            panic!("partial CSV should parse");
        };

        assert_eq!(records[0].age, 0);
        assert_eq!(records[0].gender, "");
        assert!(!fields.contains(&Field::Age));
        assert!(fields.contains(&Field::BillAmount));
    }

    #[test]
    fn test_parse_csv_bad_age_is_error() {
        let csv = "patient_id,age\nP-001,forty\n";
        let result = parse_csv(csv.as_bytes());
        assert!(matches!(
            result,
            Err(StoreError::InvalidValue { row: 1, column: "age", .. })
        ));
    }

    #[test]
    fn test_parse_csv_requires_id_column() {
        let csv = "diagnosis,status\nFlu,Active\n";
        assert!(matches!(
            parse_csv(csv.as_bytes()),
            Err(StoreError::MissingIdColumn)
        ));
    }

    #[test]
    fn test_parse_json_records() {
        let json = r#"[
            {"patient_id": "P-001", "diagnosis": "Flu", "bill_amount": 1000},
            {"patient_id": "P-002", "diagnosis": "Covid", "age": 52}
        ]"#;
        let Ok((records, fields)) = parse_json(json) else {
            panic!("JSON should parse");
        };

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].age, 52);
        assert!(fields.contains(&Field::Age));
        assert!(!fields.contains(&Field::ClinicalNotes));
    }

    #[test]
    fn test_parse_json_empty_array_is_typed() {
        let Ok((records, fields)) = parse_json("[]") else {
            panic!("empty array should parse");
        };
        assert!(records.is_empty());
        assert_eq!(fields.len(), Field::ALL.len());
    }

    #[test]
    fn test_parse_json_malformed() {
        assert!(matches!(
            parse_json("{not json"),
            Err(StoreError::Json(_))
        ));
    }
}
