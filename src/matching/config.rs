//! Matcher configuration

use serde::{Deserialize, Serialize};

use crate::types::{MatchError, MatchResult};

/// Date window applied by the default configuration, in days.
pub const DEFAULT_DATE_WINDOW_DAYS: i64 = 14;

/// Minimum heuristic score required before a match may be accepted.
pub const DEFAULT_CONFIDENCE_THRESHOLD: u8 = 2;

/// The operating company, excluded from document counterparty sets.
pub const DEFAULT_OWN_COMPANY_NAME: &str = "Example Company Oy";

/// Business-entity suffixes stripped during name normalization.
pub const DEFAULT_LEGAL_SUFFIXES: [&str; 6] = ["oy", "ab", "ltd", "inc", "gmbh", "tmi"];

/// Settings that govern matching outcomes.
///
/// These values are part of the matching contract: changing any of them
/// changes which pairs reconcile. They are bound at matcher construction
/// so embedders and tests can vary them independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Maximum distance between a transaction date and a document date
    /// for the date signal to agree, in calendar days
    pub date_window_days: i64,
    /// Minimum heuristic score (out of 3) required to accept a match
    pub confidence_threshold: u8,
    /// The operating company's own name; documents listing it as a party
    /// do not count it as a counterparty
    pub own_company_name: String,
    /// Business-entity suffixes removed as whole words when normalizing
    /// counterparty names
    pub legal_suffixes: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            date_window_days: DEFAULT_DATE_WINDOW_DAYS,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            own_company_name: DEFAULT_OWN_COMPANY_NAME.to_string(),
            legal_suffixes: DEFAULT_LEGAL_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl MatcherConfig {
    /// Create a configuration with the default contract values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date window in calendar days.
    pub fn with_date_window_days(mut self, days: i64) -> Self {
        self.date_window_days = days;
        self
    }

    /// Set the minimum accepted heuristic score.
    pub fn with_confidence_threshold(mut self, threshold: u8) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the operating company's own name.
    pub fn with_own_company_name(mut self, name: impl Into<String>) -> Self {
        self.own_company_name = name.into();
        self
    }

    /// Replace the list of stripped business-entity suffixes.
    pub fn with_legal_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.legal_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Validate that the configuration describes a usable decision rule.
    pub fn validate(&self) -> MatchResult<()> {
        if self.date_window_days < 0 {
            return Err(MatchError::InvalidConfig(format!(
                "date window must be non-negative, got {} days",
                self.date_window_days
            )));
        }

        // A threshold of 0 would accept arbitrary candidates; the score
        // cannot exceed 3, so anything above that is unsatisfiable.
        if !(1..=3).contains(&self.confidence_threshold) {
            return Err(MatchError::InvalidConfig(format!(
                "confidence threshold must be between 1 and 3, got {}",
                self.confidence_threshold
            )));
        }

        Ok(())
    }
}
