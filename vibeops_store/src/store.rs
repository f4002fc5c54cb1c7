//! The record store itself.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vibeops_core::{Field, PatientRecord};

use crate::source;
use crate::{Result, StoreError};

/// Cohort substituted when the data source cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackCohort {
    /// Two minimal built-in records.
    #[default]
    Seed,
    /// A typed table with no rows.
    Empty,
}

/// What to do when an appended record reuses an existing `patient_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Accept silently.
    Allow,
    /// Accept and log a warning.
    #[default]
    Warn,
    /// Refuse the record.
    Reject,
}

/// Where the current rows came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOrigin {
    File(PathBuf),
    Fallback(FallbackCohort),
    Memory,
}

/// Ordered, in-memory collection of patient records.
///
/// Insertion order is significant: the tail of the store is treated as the
/// most recent records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<PatientRecord>,
    fields: BTreeSet<Field>,
    origin: StoreOrigin,
}

impl RecordStore {
    /// Build a store from fully populated records.
    #[must_use]
    pub fn new(records: Vec<PatientRecord>) -> Self {
        Self {
            records,
            fields: Field::ALL.into_iter().collect(),
            origin: StoreOrigin::Memory,
        }
    }

    /// Load a store from disk, substituting the fallback cohort on any failure.
    ///
    /// Never fails; the underlying error is logged.
    #[must_use]
    pub fn load(path: &Path, fallback: FallbackCohort) -> Self {
        match Self::try_load(path) {
            Ok(store) => store,
            Err(e) => {
                warn!(
                    "Could not load patient data from {}: {e}. Using {:?} fallback cohort",
                    path.display(),
                    fallback
                );
                Self::fallback(fallback)
            }
        }
    }

    /// Load a store from disk, surfacing the error.
    pub fn try_load(path: &Path) -> Result<Self> {
        let (records, fields) = source::read_path(path)?;
        info!(
            "Loaded {} patient records from {}",
            records.len(),
            path.display()
        );

        Ok(Self {
            records,
            fields,
            origin: StoreOrigin::File(path.to_path_buf()),
        })
    }

    /// The built-in cohort used when no source is available.
    #[must_use]
    pub fn fallback(cohort: FallbackCohort) -> Self {
        match cohort {
            FallbackCohort::Seed => Self {
                records: vec![
                    PatientRecord::new("P-001")
                        .with_diagnosis("Flu")
                        .with_status("Active")
                        .with_bill_amount(1000.0),
                    PatientRecord::new("P-002")
                        .with_diagnosis("Covid")
                        .with_status("Discharged")
                        .with_bill_amount(2000.0),
                ],
                fields: [
                    Field::PatientId,
                    Field::Diagnosis,
                    Field::Status,
                    Field::BillAmount,
                ]
                .into_iter()
                .collect(),
                origin: StoreOrigin::Fallback(cohort),
            },
            FallbackCohort::Empty => Self {
                records: Vec::new(),
                fields: Field::ALL.into_iter().collect(),
                origin: StoreOrigin::Fallback(cohort),
            },
        }
    }

    /// Return a new store with `record` appended. No validation.
    #[must_use]
    pub fn append(&self, record: PatientRecord) -> Self {
        let mut next = self.clone();
        next.records.push(record);
        // Intake rows carry every column.
        next.fields.extend(Field::ALL);
        next
    }

    /// Append under an explicit duplicate-ID policy.
    pub fn try_append(&self, record: PatientRecord, policy: DuplicatePolicy) -> Result<Self> {
        if self.find_by_id(&record.patient_id).is_some() {
            match policy {
                DuplicatePolicy::Allow => {}
                DuplicatePolicy::Warn => {
                    warn!("Appending duplicate patient ID: {}", record.patient_id);
                }
                DuplicatePolicy::Reject => {
                    return Err(StoreError::DuplicateId(record.patient_id));
                }
            }
        }

        info!("Appending patient record {}", record.patient_id);
        Ok(self.append(record))
    }

    #[must_use]
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn origin(&self) -> &StoreOrigin {
        &self.origin
    }

    /// Whether the source supplied this column.
    #[must_use]
    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Columns present in this store, in table order.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        self.fields.iter().copied().collect()
    }

    /// First record with exactly this ID.
    #[must_use]
    pub fn find_by_id(&self, patient_id: &str) -> Option<&PatientRecord> {
        self.records.iter().find(|r| r.patient_id == patient_id)
    }

    /// The last `n` records in store order.
    #[must_use]
    pub fn last_n(&self, n: usize) -> &[PatientRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    #[must_use]
    pub fn summary(&self) -> StoreSummary {
        let mut by_status = BTreeMap::new();
        for record in &self.records {
            *by_status.entry(record.status.clone()).or_insert(0) += 1;
        }

        StoreSummary {
            total: self.records.len(),
            by_status,
            total_billed: self.records.iter().map(|r| r.bill_amount).sum(),
        }
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::fallback(FallbackCohort::default())
    }
}

/// Headline numbers for the sidebar / `info` view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub total_billed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store(count: usize) -> RecordStore {
        RecordStore::new(
            (1..=count)
                .map(|i| PatientRecord::new(format!("P-{i:03}")).with_status("Active"))
                .collect(),
        )
    }

    #[test]
    fn test_seed_fallback() {
        let store = RecordStore::fallback(FallbackCohort::Seed);

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].diagnosis, "Flu");
        assert!(store.has_field(Field::BillAmount));
        assert!(!store.has_field(Field::Age));
        assert_eq!(
            store.origin(),
            &StoreOrigin::Fallback(FallbackCohort::Seed)
        );
    }

    #[test]
    fn test_empty_fallback_is_typed() {
        let store = RecordStore::fallback(FallbackCohort::Empty);
        assert!(store.is_empty());
        assert!(store.has_field(Field::Age));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let store = RecordStore::load(
            Path::new("/nonexistent/vibeops/patients.csv"),
            FallbackCohort::Seed,
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_append_returns_new_store() {
        let store = create_test_store(3);
        let next = store.append(PatientRecord::new("P-100"));

        assert_eq!(store.len(), 3);
        assert_eq!(next.len(), 4);
        assert_eq!(next.records()[3].patient_id, "P-100");
    }

    #[test]
    fn test_fields_in_table_order() {
        let store = RecordStore::fallback(FallbackCohort::Seed);
        assert_eq!(
            store.fields(),
            vec![
                Field::PatientId,
                Field::Diagnosis,
                Field::Status,
                Field::BillAmount
            ]
        );
    }

    #[test]
    fn test_append_marks_all_fields() {
        let store = RecordStore::fallback(FallbackCohort::Seed);
        let next = store.append(PatientRecord::new("P-003").with_age(40));
        assert!(next.has_field(Field::Age));
    }

    #[test]
    fn test_duplicate_policies() {
        let store = create_test_store(2);
        let dup = PatientRecord::new("P-001");

        assert!(store.try_append(dup.clone(), DuplicatePolicy::Allow).is_ok());

        let warned = store.try_append(dup.clone(), DuplicatePolicy::Warn);
        assert!(matches!(warned, Ok(ref s) if s.len() == 3));

        let rejected = store.try_append(dup, DuplicatePolicy::Reject);
        assert!(matches!(rejected, Err(StoreError::DuplicateId(ref id)) if id == "P-001"));
    }

    #[test]
    fn test_last_n() {
        let store = create_test_store(8);
        let tail = store.last_n(5);

        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].patient_id, "P-004");
        assert_eq!(tail[4].patient_id, "P-008");
        assert_eq!(store.last_n(100).len(), 8);
    }

    #[test]
    fn test_summary() {
        let store = RecordStore::fallback(FallbackCohort::Seed);
        let summary = store.summary();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.by_status.get("Active"), Some(&1));
        assert!((summary.total_billed - 3000.0).abs() < f64::EPSILON);
    }
}
