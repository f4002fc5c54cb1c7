//! Ordered first-match intent classification.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use vibeops_core::{Field, Intent, PatientRecord, QueryResult};
use vibeops_store::RecordStore;

use crate::config::{MatcherConfig, RuleKind};
use crate::normalize::display_term;
use crate::sql;

#[expect(clippy::expect_used, reason = "pattern is a fixed literal")]
static PATIENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)p-\d+").expect("patient ID pattern should compile"));

/// A prompt prepared for matching.
#[derive(Debug, Clone)]
struct Prompt<'a> {
    /// Prompt with surrounding whitespace removed.
    text: &'a str,
    /// Lowercased `text`.
    lower: String,
}

impl<'a> Prompt<'a> {
    fn new(raw: &'a str) -> Self {
        let text = raw.trim();
        Self {
            text,
            lower: text.to_lowercase(),
        }
    }

    fn contains_any(&self, needles: &[String]) -> bool {
        contains_any(&self.lower, needles)
    }

    /// Lowercased prompt with every occurrence of `needles` blanked out.
    fn without(&self, needles: &[String]) -> String {
        needles
            .iter()
            .filter(|needle| !needle.is_empty())
            .fold(self.lower.clone(), |rest, needle| {
                rest.replace(&needle.to_lowercase(), " ")
            })
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| !needle.is_empty() && haystack.contains(&needle.to_lowercase()))
}

/// Keyword intent matcher.
///
/// Stateless apart from its configuration: the same prompt against the same
/// store always yields the same result, and the store is only read.
#[derive(Debug, Clone, Default)]
pub struct IntentMatcher {
    config: MatcherConfig,
}

impl IntentMatcher {
    #[must_use]
    pub const fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Classify `prompt` and answer it from `store`.
    ///
    /// Rules run in configured order and the first one that fires wins. If
    /// none fires, the most recent records are returned.
    #[must_use]
    pub fn match_prompt(&self, prompt: &str, store: &RecordStore) -> QueryResult {
        let prompt = Prompt::new(prompt);

        for rule in &self.config.rules {
            if let Some(result) = self.apply(*rule, &prompt, store) {
                debug!("Rule {} fired as {}", rule.as_str(), result.intent);
                return result;
            }
            debug!("Rule {} did not fire", rule.as_str());
        }

        self.fallback(store)
    }

    fn apply(&self, rule: RuleKind, prompt: &Prompt<'_>, store: &RecordStore) -> Option<QueryResult> {
        match rule {
            RuleKind::Count => self.count(prompt, store),
            RuleKind::Average => self.average(prompt, store),
            RuleKind::FreeText => self.free_text(prompt, store),
            RuleKind::IdLookup => Self::id_lookup(prompt, store),
        }
    }

    fn count(&self, prompt: &Prompt<'_>, store: &RecordStore) -> Option<QueryResult> {
        if !prompt.contains_any(&self.config.count_keywords) {
            return None;
        }

        Some(QueryResult::narrative(
            Intent::Count,
            sql::count(),
            format!("Total patient count in current view: {}", store.len()),
        ))
    }

    fn average(&self, prompt: &Prompt<'_>, store: &RecordStore) -> Option<QueryResult> {
        if !prompt.contains_any(&self.config.average_keywords) {
            return None;
        }

        // "average" itself contains "age"; only look at what is left.
        let rest = prompt.without(&self.config.average_keywords);

        if contains_any(&rest, &self.config.bill_keywords) {
            return Some(aggregate_mean(
                store,
                Intent::AverageBill,
                Field::BillAmount,
                |r| r.bill_amount,
                |mean| format!("Average billing amount across cohort: ${mean:.2}"),
            ));
        }

        if contains_any(&rest, &self.config.age_keywords) {
            return Some(aggregate_mean(
                store,
                Intent::AverageAge,
                Field::Age,
                |r| f64::from(r.age),
                |mean| format!("Average patient age across cohort: {mean:.1} years"),
            ));
        }

        // "average" on its own names no column; let later rules try.
        None
    }

    fn free_text(&self, prompt: &Prompt<'_>, store: &RecordStore) -> Option<QueryResult> {
        if prompt.lower.is_empty() {
            return None;
        }

        let matches: Vec<PatientRecord> = store
            .records()
            .iter()
            .filter(|r| {
                r.diagnosis.to_lowercase().contains(&prompt.lower)
                    || r.clinical_notes.to_lowercase().contains(&prompt.lower)
            })
            .cloned()
            .collect();

        if matches.is_empty() {
            return None;
        }

        let term = display_term(prompt.text, &self.config.filler_phrases);
        let explanation = format!(
            "Found {} {} matching '{term}' in diagnosis or clinical notes.",
            matches.len(),
            plural(matches.len(), "record", "records"),
        );

        Some(QueryResult::tabular(
            Intent::FreeText,
            sql::text_search(term),
            matches,
            explanation,
        ))
    }

    fn id_lookup(prompt: &Prompt<'_>, store: &RecordStore) -> Option<QueryResult> {
        if !prompt.lower.contains("p-") {
            return None;
        }

        let Some(found) = PATIENT_ID.find(prompt.text) else {
            return Some(QueryResult::tabular(
                Intent::IdLookup,
                sql::id_pattern(),
                Vec::new(),
                "A patient ID prefix was given, but no ID matched the form P-<digits>.",
            ));
        };

        let patient_id = found.as_str().to_uppercase();
        let rows: Vec<PatientRecord> = store
            .records()
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect();

        let explanation = if rows.is_empty() {
            format!("No record found for patient ID {patient_id}.")
        } else {
            format!("Retrieved record for patient ID {patient_id}.")
        };

        Some(QueryResult::tabular(
            Intent::IdLookup,
            sql::id_lookup(&patient_id),
            rows,
            explanation,
        ))
    }

    fn fallback(&self, store: &RecordStore) -> QueryResult {
        let limit = self.config.fallback_limit;
        QueryResult::tabular(
            Intent::Fallback,
            sql::recent(limit),
            store.last_n(limit).to_vec(),
            "Could not determine query intent. Displaying most recent patient records.",
        )
    }
}

fn aggregate_mean(
    store: &RecordStore,
    intent: Intent,
    field: Field,
    value: impl Fn(&PatientRecord) -> f64,
    describe: impl Fn(f64) -> String,
) -> QueryResult {
    let query = sql::average(field.column());

    if !store.has_field(field) {
        return QueryResult::narrative(
            intent,
            query,
            format!(
                "Column '{}' is not available in the current dataset.",
                field.column()
            ),
        );
    }

    if store.is_empty() {
        return QueryResult::narrative(intent, query, "No patient records available to average.");
    }

    let total: f64 = store.records().iter().map(value).sum();
    #[expect(clippy::cast_precision_loss, reason = "cohort sizes are small")]
    let mean = total / store.len() as f64;

    QueryResult::narrative(intent, query, describe(mean))
}

const fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
