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

//! Keyword intent matching over the record store.
//!
//! A prompt is classified by an ordered list of rules; the first rule that
//! fires produces the [`QueryResult`](vibeops_core::QueryResult). When none
//! fires, the fallback returns the most recent records, so every prompt gets
//! exactly one answer.
//!
//! The SQL shown alongside each answer is produced by [`sql`] for display
//! only and is never executed.

mod config;
mod matcher;
mod normalize;
pub mod sql;

pub use config::{MatcherConfig, RuleKind};
pub use matcher::IntentMatcher;
pub use normalize::display_term;
