//! Matcher configuration.

use serde::{Deserialize, Serialize};

/// A rule slot in the decision list. The fallback is implicit and always last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Count,
    Average,
    FreeText,
    IdLookup,
}

impl RuleKind {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Count => "count",
            Self::Average => "average",
            Self::FreeText => "free_text",
            Self::IdLookup => "id_lookup",
        }
    }
}

/// Keyword lists and rule order for the intent matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Rules in evaluation order; first match wins.
    #[serde(default = "MatcherConfig::default_rules")]
    pub rules: Vec<RuleKind>,

    /// Substrings that select the count aggregate.
    #[serde(default = "MatcherConfig::default_count_keywords")]
    pub count_keywords: Vec<String>,

    /// Substrings that select an average aggregate.
    #[serde(default = "MatcherConfig::default_average_keywords")]
    pub average_keywords: Vec<String>,

    /// Substrings that pick `bill_amount` as the averaged column. Checked
    /// after the average keywords are removed from the prompt.
    #[serde(default = "MatcherConfig::default_bill_keywords")]
    pub bill_keywords: Vec<String>,

    /// Substrings that pick `age` as the averaged column.
    #[serde(default = "MatcherConfig::default_age_keywords")]
    pub age_keywords: Vec<String>,

    /// Leading phrases dropped from the search term shown in the query text.
    #[serde(default = "MatcherConfig::default_filler_phrases")]
    pub filler_phrases: Vec<String>,

    /// Number of trailing records returned by the fallback.
    #[serde(default = "MatcherConfig::default_fallback_limit")]
    pub fallback_limit: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            rules: Self::default_rules(),
            count_keywords: Self::default_count_keywords(),
            average_keywords: Self::default_average_keywords(),
            bill_keywords: Self::default_bill_keywords(),
            age_keywords: Self::default_age_keywords(),
            filler_phrases: Self::default_filler_phrases(),
            fallback_limit: Self::default_fallback_limit(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl MatcherConfig {
    fn default_rules() -> Vec<RuleKind> {
        vec![
            RuleKind::Count,
            RuleKind::Average,
            RuleKind::FreeText,
            RuleKind::IdLookup,
        ]
    }

    fn default_count_keywords() -> Vec<String> {
        strings(&["count"])
    }

    fn default_average_keywords() -> Vec<String> {
        strings(&["average"])
    }

    fn default_bill_keywords() -> Vec<String> {
        strings(&["bill"])
    }

    fn default_age_keywords() -> Vec<String> {
        strings(&["age"])
    }

    fn default_filler_phrases() -> Vec<String> {
        strings(&[
            "show me all patients with ",
            "show me patients with ",
            "find patients with ",
            "list patients with ",
            "patients with ",
            "search for ",
            "show me ",
        ])
    }

    const fn default_fallback_limit() -> usize {
        5
    }

    /// Set the rule order.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<RuleKind>) -> Self {
        self.rules = rules;
        self
    }

    /// Set the substrings that select the count aggregate.
    #[must_use]
    pub fn with_count_keywords(mut self, keywords: &[&str]) -> Self {
        self.count_keywords = strings(keywords);
        self
    }

    /// Set the fallback limit.
    #[must_use]
    pub const fn with_fallback_limit(mut self, limit: usize) -> Self {
        self.fallback_limit = limit;
        self
    }
}
