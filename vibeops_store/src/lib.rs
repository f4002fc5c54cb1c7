#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! In-memory patient record store.
//!
//! The store is loaded once per session from a CSV or JSON file. A failed
//! load is never fatal: [`RecordStore::load`] logs the failure and hands back
//! a small fallback cohort instead.
//!
//! # Key Features
//! - Insertion-ordered records (the "most recent" view is the tail)
//! - Tracking of which columns the source actually supplied
//! - Copy-on-append with an explicit duplicate-ID policy
//! - Intake form validation for new records

mod error;
mod intake;
mod source;
mod store;

pub use error::{IntakeError, StoreError};
pub use intake::{GENDER_OPTIONS, NewRecord};
pub use source::SourceFormat;
pub use store::{DuplicatePolicy, FallbackCohort, RecordStore, StoreOrigin, StoreSummary};

pub type Result<T> = std::result::Result<T, StoreError>;
