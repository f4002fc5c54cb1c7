//! Patient record row and its column vocabulary.

use serde::{Deserialize, Serialize};

/// One row of the record store.
///
/// Columns missing from a data source deserialize to their empty value, so a
/// record is always fully populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientRecord {
    pub patient_id: String,
    pub age: u32,
    pub gender: String,
    pub diagnosis: String,
    /// ISO date, e.g. `2026-01-14`.
    pub admission_date: String,
    pub status: String,
    pub bill_amount: f64,
    pub clinical_notes: String,
}

impl PatientRecord {
    #[must_use]
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_diagnosis(mut self, diagnosis: impl Into<String>) -> Self {
        self.diagnosis = diagnosis.into();
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    #[must_use]
    pub const fn with_bill_amount(mut self, amount: f64) -> Self {
        self.bill_amount = amount;
        self
    }

    #[must_use]
    pub const fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.clinical_notes = notes.into();
        self
    }

    #[must_use]
    pub fn with_admission_date(mut self, date: impl Into<String>) -> Self {
        self.admission_date = date.into();
        self
    }

    /// Display value of a column, used by table rendering.
    #[must_use]
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::PatientId => self.patient_id.clone(),
            Field::Age => self.age.to_string(),
            Field::Gender => self.gender.clone(),
            Field::Diagnosis => self.diagnosis.clone(),
            Field::AdmissionDate => self.admission_date.clone(),
            Field::Status => self.status.clone(),
            Field::BillAmount => format!("{:.2}", self.bill_amount),
            Field::ClinicalNotes => self.clinical_notes.clone(),
        }
    }
}

/// Column of the patient table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    PatientId,
    Age,
    Gender,
    Diagnosis,
    AdmissionDate,
    Status,
    BillAmount,
    ClinicalNotes,
}

impl Field {
    /// All columns in source order.
    pub const ALL: [Self; 8] = [
        Self::PatientId,
        Self::Age,
        Self::Gender,
        Self::Diagnosis,
        Self::AdmissionDate,
        Self::Status,
        Self::BillAmount,
        Self::ClinicalNotes,
    ];

    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::PatientId => "patient_id",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Diagnosis => "diagnosis",
            Self::AdmissionDate => "admission_date",
            Self::Status => "status",
            Self::BillAmount => "bill_amount",
            Self::ClinicalNotes => "clinical_notes",
        }
    }

    /// Parse a column header. Surrounding whitespace and case are ignored.
    #[must_use]
    pub fn from_column(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|f| f.column() == name)
    }
}

/// Admission status offered by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    Active,
    #[serde(rename = "ICU")]
    Icu,
    Outpatient,
    Discharged,
}

impl PatientStatus {
    pub const ALL: [Self; 4] = [Self::Active, Self::Icu, Self::Outpatient, Self::Discharged];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Icu => "ICU",
            Self::Outpatient => "Outpatient",
            Self::Discharged => "Discharged",
        }
    }
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown status: {trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_column() {
        assert_eq!(Field::from_column("patient_id"), Some(Field::PatientId));
        assert_eq!(Field::from_column(" Bill_Amount "), Some(Field::BillAmount));
        assert_eq!(Field::from_column("room"), None);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("icu".parse::<PatientStatus>(), Ok(PatientStatus::Icu));
        assert_eq!(
            "Discharged".parse::<PatientStatus>(),
            Ok(PatientStatus::Discharged)
        );
        assert!("Admitted".parse::<PatientStatus>().is_err());
    }

    #[test]
    fn test_record_defaults_missing_fields() {
        let json = r#"{"patient_id": "P-001", "diagnosis": "Flu"}"#;
        let record: PatientRecord = serde_json::from_str(json).unwrap_or_default();

        assert_eq!(record.patient_id, "P-001");
        assert_eq!(record.age, 0);
        assert_eq!(record.clinical_notes, "");
        assert!(record.bill_amount.abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_value_formats_bill() {
        let record = PatientRecord::new("P-001").with_bill_amount(1000.0);
        assert_eq!(record.value(Field::BillAmount), "1000.00");
    }
}
