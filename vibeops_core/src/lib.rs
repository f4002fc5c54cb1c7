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

//! Shared data model for the vibeops query dashboard.
//!
//! Every other crate in the workspace speaks in terms of these types: the
//! record store holds [`PatientRecord`]s, the matcher returns a
//! [`QueryResult`], and the conversation log is a list of [`ChatMessage`]s.

use serde::{Deserialize, Serialize};

mod record;

pub use record::{Field, PatientRecord, PatientStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One entry of the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The query category the matcher selected for a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Narrative count of all records.
    Count,
    /// Mean of `bill_amount`.
    AverageBill,
    /// Mean of `age`.
    AverageAge,
    /// Substring match against diagnosis or clinical notes.
    FreeText,
    /// Exact `patient_id` lookup.
    IdLookup,
    /// Nothing else fired; most recent records.
    Fallback,
}

impl Intent {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Count => "count",
            Self::AverageBill => "average_bill",
            Self::AverageAge => "average_age",
            Self::FreeText => "free_text",
            Self::IdLookup => "id_lookup",
            Self::Fallback => "fallback",
        }
    }

    /// Whether this intent answers with a narrative only and never with rows.
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(self, Self::Count | Self::AverageBill | Self::AverageAge)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a single matcher invocation.
///
/// `rows` is `None` when the answer is narrative only (aggregates), and
/// `Some(vec![])` when a lookup ran but found nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub intent: Intent,
    /// Display-only text resembling SQL. Never executed.
    pub synthetic_query: String,
    pub rows: Option<Vec<PatientRecord>>,
    pub explanation: String,
}

impl QueryResult {
    #[must_use]
    pub fn narrative(
        intent: Intent,
        synthetic_query: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            intent,
            synthetic_query: synthetic_query.into(),
            rows: None,
            explanation: explanation.into(),
        }
    }

    #[must_use]
    pub fn tabular(
        intent: Intent,
        synthetic_query: impl Into<String>,
        rows: Vec<PatientRecord>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            intent,
            synthetic_query: synthetic_query.into(),
            rows: Some(rows),
            explanation: explanation.into(),
        }
    }

    /// Number of rows, or zero for narrative results.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.as_ref().map_or(0, Vec::len)
    }
}
