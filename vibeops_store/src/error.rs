use thiserror::Error;

/// Errors raised while loading or mutating the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source has no patient_id column")]
    MissingIdColumn,

    #[error("Invalid value {value:?} for column {column} on row {row}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Patient ID already exists: {0}")]
    DuplicateId(String),

    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),
}

/// Validation failures for the new-record intake form.
#[derive(Debug, Error, PartialEq)]
pub enum IntakeError {
    #[error("Patient ID is required")]
    MissingPatientId,

    #[error("Gender is required")]
    MissingGender,

    #[error("Diagnosis is required")]
    MissingDiagnosis,

    #[error("Status must be one of Active, ICU, Outpatient, Discharged (got {0:?})")]
    InvalidStatus(String),

    #[error("Bill amount must be a non-negative number (got {0})")]
    InvalidBillAmount(f64),
}
