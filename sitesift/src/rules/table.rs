//! Per-publisher extraction rules and the ordered lookup table.

use super::selector::ContentSelector;
use crate::errors::SiftError;

/// A domain-scoped recipe for turning raw page text into a clean snippet.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    /// Substring matched against the full hit URL, not a strict host match.
    pub domain_match: String,
    /// The content selection strategy for matching pages.
    pub selector: ContentSelector,
    /// URL substrings that exclude a hit from fetching entirely.
    pub excluded_url_substrings: Vec<String>,
}

impl ExtractionRule {
    /// Creates a rule with no exclusions.
    #[must_use]
    pub fn new(domain_match: impl Into<String>, selector: ContentSelector) -> Self {
        Self {
            domain_match: domain_match.into(),
            selector,
            excluded_url_substrings: Vec::new(),
        }
    }

    /// Adds URL substrings that exclude a hit from fetching.
    #[must_use]
    pub fn with_excluded(mut self, substrings: &[&str]) -> Self {
        self.excluded_url_substrings
            .extend(substrings.iter().map(|s| (*s).to_string()));
        self
    }

    /// Whether this rule applies to the given URL.
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        url.contains(&self.domain_match)
    }

    /// Whether the URL is excluded from fetching by this rule.
    #[must_use]
    pub fn is_excluded(&self, url: &str) -> bool {
        self.excluded_url_substrings
            .iter()
            .any(|part| url.contains(part.as_str()))
    }
}

/// An ordered table of extraction rules.
///
/// Lookup iterates rules in insertion order and returns the first match, so
/// table order is the tie-break when several rules could apply. Backed by a
/// `Vec` rather than a map to keep that order deterministic.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<ExtractionRule>,
}

impl RuleTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule, keeping insertion order.
    #[must_use]
    pub fn with_rule(mut self, rule: ExtractionRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the first rule whose `domain_match` is a substring of `url`.
    #[must_use]
    pub fn lookup(&self, url: &str) -> Option<&ExtractionRule> {
        self.rules.iter().find(|rule| rule.matches(url))
    }

    /// Number of rules in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The built-in publisher rules.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Rule`] if a built-in marker pattern fails to
    /// compile.
    pub fn defaults() -> Result<Self, SiftError> {
        Ok(Self::new()
            .with_rule(
                ExtractionRule::new(
                    "zapfinance.co.id",
                    ContentSelector::between(
                        "###### Articles",
                        "#### Tuliskan Komentar Cancel reply",
                    )?,
                )
                .with_excluded(&["course", "resource", "academy"]),
            )
            .with_rule(ExtractionRule::new(
                "pocketsmith.com",
                ContentSelector::between_with_prefix(r"\n*#\s*", r"\* \* \*", Some("# "))?,
            ))
            .with_rule(ExtractionRule::new(
                "ynab.com",
                ContentSelector::between_with_prefix(r"\n*#\s", "Try", Some("# "))?,
            )))
    }
}
