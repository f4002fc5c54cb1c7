//! New-record intake form.
//!
//! Mirrors the checks the dashboard's "add patient" form performs before a
//! record reaches the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vibeops_core::{PatientRecord, PatientStatus};

use crate::IntakeError;

/// Gender values the form offers. Free text is accepted too.
pub const GENDER_OPTIONS: [&str; 3] = ["M", "F", "Other"];

/// A submitted intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub patient_id: String,
    pub age: u32,
    pub gender: String,
    pub diagnosis: String,
    #[serde(default)]
    pub clinical_notes: String,
    pub status: String,
    pub bill_amount: f64,
    /// Defaults to today when absent.
    #[serde(default)]
    pub admission_date: Option<NaiveDate>,
}

impl NewRecord {
    /// Validate and convert, dating the admission today if no date was given.
    pub fn into_record(self) -> Result<PatientRecord, IntakeError> {
        let today = chrono::Local::now().date_naive();
        self.into_record_on(today)
    }

    /// Validate and convert with an explicit "today".
    pub fn into_record_on(self, today: NaiveDate) -> Result<PatientRecord, IntakeError> {
        let patient_id = self.patient_id.trim().to_uppercase();
        if patient_id.is_empty() {
            return Err(IntakeError::MissingPatientId);
        }

        let gender = self.gender.trim();
        if gender.is_empty() {
            return Err(IntakeError::MissingGender);
        }

        let diagnosis = self.diagnosis.trim();
        if diagnosis.is_empty() {
            return Err(IntakeError::MissingDiagnosis);
        }

        let status: PatientStatus = self
            .status
            .parse()
            .map_err(|_| IntakeError::InvalidStatus(self.status.clone()))?;

        if !self.bill_amount.is_finite() || self.bill_amount < 0.0 {
            return Err(IntakeError::InvalidBillAmount(self.bill_amount));
        }

        let admitted = self.admission_date.unwrap_or(today);

        Ok(PatientRecord {
            patient_id,
            age: self.age,
            gender: gender.to_string(),
            diagnosis: diagnosis.to_string(),
            admission_date: admitted.format("%Y-%m-%d").to_string(),
            status: status.as_str().to_string(),
            bill_amount: self.bill_amount,
            clinical_notes: self.clinical_notes.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_form() -> NewRecord {
        NewRecord {
            patient_id: " p-042 ".to_string(),
            age: 29,
            gender: "F".to_string(),
            diagnosis: "Migraine".to_string(),
            clinical_notes: "Light sensitivity".to_string(),
            status: "outpatient".to_string(),
            bill_amount: 250.0,
            admission_date: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap_or_default()
    }

    #[test]
    fn test_valid_form_defaults_date() {
        let Ok(record) = create_form().into_record_on(today()) else {
            panic!("form should validate");
        };

        assert_eq!(record.patient_id, "P-042");
        assert_eq!(record.status, "Outpatient");
        assert_eq!(record.admission_date, "2026-10-19");
    }

    #[test]
    fn test_explicit_admission_date() {
        let mut form = create_form();
        form.admission_date = NaiveDate::from_ymd_opt(2026, 3, 1);

        let Ok(record) = form.into_record_on(today()) else {
            panic!("form should validate");
        };
        assert_eq!(record.admission_date, "2026-03-01");
    }

    #[test]
    fn test_rejects_unknown_status() {
        let mut form = create_form();
        form.status = "Admitted".to_string();

        assert_eq!(
            form.into_record_on(today()),
            Err(IntakeError::InvalidStatus("Admitted".to_string()))
        );
    }

    #[test]
    fn test_rejects_negative_bill() {
        let mut form = create_form();
        form.bill_amount = -1.0;
        assert_eq!(
            form.into_record_on(today()),
            Err(IntakeError::InvalidBillAmount(-1.0))
        );
    }

    #[test]
    fn test_rejects_blank_id() {
        let mut form = create_form();
        form.patient_id = "   ".to_string();
        assert_eq!(
            form.into_record_on(today()),
            Err(IntakeError::MissingPatientId)
        );
    }

    #[test]
    fn test_free_text_gender_accepted() {
        let mut form = create_form();
        form.gender = "Nonbinary".to_string();
        assert!(form.into_record_on(today()).is_ok());
        assert!(GENDER_OPTIONS.contains(&"Other"));
    }
}
