//! Matching engine orchestrating reference lookup, scoring, and acceptance
//!
//! Matching runs in three stages: an exact reference match is tried first
//! and returned immediately when found; otherwise every candidate is
//! scored and the single best candidate is accepted only when it clears
//! the confidence threshold without ties. Uncertainty always resolves to
//! no match.

use log::debug;

use crate::matching::config::MatcherConfig;
use crate::matching::normalize::normalize_reference;
use crate::matching::signals::match_score;
use crate::types::{Attachment, MatchResult, Transaction};

/// Access to the raw payment reference of either record kind.
///
/// Lets the reference stage run generically over both match directions; a
/// transaction's reference sits at the top level while a document's sits
/// in the extracted payload.
trait ReferenceSource {
    fn raw_reference(&self) -> Option<&str>;
}

impl ReferenceSource for Transaction {
    fn raw_reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

impl ReferenceSource for Attachment {
    fn raw_reference(&self) -> Option<&str> {
        self.data.reference.as_deref()
    }
}

/// Deterministic transaction/document matcher.
///
/// Holds a validated [`MatcherConfig`] and exposes the two directional
/// operations. The matcher keeps no state between calls, never mutates
/// its inputs, and may be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            config: MatcherConfig::default(),
        }
    }
}

impl Matcher {
    /// Create a matcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with a custom configuration.
    ///
    /// Fails if the configuration does not describe a usable decision
    /// rule (negative date window, threshold outside `1..=3`).
    pub fn with_config(config: MatcherConfig) -> MatchResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this matcher was built with.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Find the single attachment that corresponds to a transaction.
    ///
    /// Returns `None` when no candidate is confident and unambiguous
    /// enough to accept.
    pub fn find_attachment<'a>(
        &self,
        transaction: &Transaction,
        attachments: &'a [Attachment],
    ) -> Option<&'a Attachment> {
        self.best_match(transaction, attachments, |att| {
            match_score(transaction, att, &self.config)
        })
    }

    /// Find the single transaction that corresponds to an attachment.
    ///
    /// Returns `None` when no candidate is confident and unambiguous
    /// enough to accept.
    pub fn find_transaction<'a>(
        &self,
        attachment: &Attachment,
        transactions: &'a [Transaction],
    ) -> Option<&'a Transaction> {
        self.best_match(attachment, transactions, |tx| {
            match_score(tx, attachment, &self.config)
        })
    }

    /// Three-stage matching core shared by both directions.
    fn best_match<'a, I, C, F>(&self, item: &I, candidates: &'a [C], score: F) -> Option<&'a C>
    where
        I: ReferenceSource,
        C: ReferenceSource,
        F: Fn(&C) -> u8,
    {
        // Stage 1: reference match. An exact reference equality is an
        // identity claim and bypasses scoring entirely. The first equal
        // candidate in input order wins; see DESIGN.md on duplicates.
        if let Some(wanted) = item.raw_reference().and_then(normalize_reference) {
            for (idx, candidate) in candidates.iter().enumerate() {
                let candidate_ref = candidate.raw_reference().and_then(normalize_reference);
                if candidate_ref.is_some_and(|r| r == wanted) {
                    debug!("reference match on {wanted:?} (candidate {idx})");
                    return Some(candidate);
                }
            }
        }

        // Stage 2: heuristic scoring. Track the running maximum and every
        // candidate currently tied at it.
        let mut highest_score = 0u8;
        let mut best: Vec<&C> = Vec::new();

        for candidate in candidates {
            let candidate_score = score(candidate);
            if candidate_score > highest_score {
                highest_score = candidate_score;
                best.clear();
                best.push(candidate);
            } else if candidate_score == highest_score {
                best.push(candidate);
            }
        }

        // Stage 3: accept only a confident, unambiguous winner.
        if highest_score >= self.config.confidence_threshold && best.len() == 1 {
            debug!("heuristic match accepted with score {highest_score}");
            return Some(best[0]);
        }

        if highest_score >= self.config.confidence_threshold {
            debug!(
                "rejected ambiguous match: {} candidates tied at score {highest_score}",
                best.len()
            );
        }
        None
    }
}

/// Find the single attachment that corresponds to a transaction, using
/// the default configuration.
pub fn find_attachment<'a>(
    transaction: &Transaction,
    attachments: &'a [Attachment],
) -> Option<&'a Attachment> {
    Matcher::new().find_attachment(transaction, attachments)
}

/// Find the single transaction that corresponds to an attachment, using
/// the default configuration.
pub fn find_transaction<'a>(
    attachment: &Attachment,
    transactions: &'a [Transaction],
) -> Option<&'a Transaction> {
    Matcher::new().find_transaction(attachment, transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttachmentData;
    use bigdecimal::BigDecimal;

    fn amount(raw: &str) -> Option<BigDecimal> {
        Some(raw.parse().unwrap())
    }

    fn attachment(id: &str, data: AttachmentData) -> Attachment {
        Attachment {
            id: Some(id.to_string()),
            data,
        }
    }

    #[test]
    fn reference_match_wins_regardless_of_other_signals() {
        let transaction = Transaction {
            reference: Some("00123".to_string()),
            amount: amount("-100.0"),
            date: Some("2024-01-10".to_string()),
            ..Default::default()
        };
        let attachments = vec![
            attachment(
                "golden",
                AttachmentData {
                    reference: Some("123".to_string()),
                    // Deliberately disagreeing amount; the reference decides.
                    total_amount: amount("999.99"),
                    ..Default::default()
                },
            ),
            attachment(
                "other",
                AttachmentData {
                    reference: Some("999".to_string()),
                    ..Default::default()
                },
            ),
        ];

        let found = find_attachment(&transaction, &attachments).unwrap();
        assert_eq!(found.id.as_deref(), Some("golden"));
    }

    #[test]
    fn all_zero_reference_never_acts_as_a_key() {
        let transaction = Transaction {
            reference: Some("000".to_string()),
            ..Default::default()
        };
        let attachments = vec![attachment(
            "zeros",
            AttachmentData {
                reference: Some("0".to_string()),
                ..Default::default()
            },
        )];

        assert!(find_attachment(&transaction, &attachments).is_none());
    }

    #[test]
    fn duplicate_references_resolve_to_first_in_input_order() {
        let transaction = Transaction {
            reference: Some("42".to_string()),
            ..Default::default()
        };
        let attachments = vec![
            attachment(
                "first",
                AttachmentData {
                    reference: Some("042".to_string()),
                    ..Default::default()
                },
            ),
            attachment(
                "second",
                AttachmentData {
                    reference: Some("42".to_string()),
                    ..Default::default()
                },
            ),
        ];

        let found = find_attachment(&transaction, &attachments).unwrap();
        assert_eq!(found.id.as_deref(), Some("first"));
    }

    #[test]
    fn confident_single_candidate_is_accepted() {
        let transaction = Transaction {
            amount: amount("-75.5"),
            date: Some("2024-03-01".to_string()),
            contact: Some("Acme Oy".to_string()),
            ..Default::default()
        };
        let attachments = vec![attachment(
            "invoice",
            AttachmentData {
                total_amount: amount("75.5"),
                invoicing_date: Some("2024-03-10".to_string()),
                supplier: Some("Acme".to_string()),
                ..Default::default()
            },
        )];

        let found = find_attachment(&transaction, &attachments).unwrap();
        assert_eq!(found.id.as_deref(), Some("invoice"));
    }

    #[test]
    fn score_of_one_is_below_the_confidence_floor() {
        // Amount agrees; date disagrees; no name on the transaction, so
        // the name check is not possible.
        let transaction = Transaction {
            amount: amount("-75.5"),
            date: Some("2020-01-01".to_string()),
            ..Default::default()
        };
        let attachments = vec![attachment(
            "invoice",
            AttachmentData {
                total_amount: amount("75.5"),
                invoicing_date: Some("2024-03-10".to_string()),
                ..Default::default()
            },
        )];

        assert!(find_attachment(&transaction, &attachments).is_none());
    }

    #[test]
    fn name_veto_blocks_an_otherwise_perfect_candidate() {
        let transaction = Transaction {
            amount: amount("-75.5"),
            date: Some("2024-03-01".to_string()),
            contact: Some("Globex".to_string()),
            ..Default::default()
        };
        let attachments = vec![attachment(
            "invoice",
            AttachmentData {
                total_amount: amount("75.5"),
                invoicing_date: Some("2024-03-10".to_string()),
                supplier: Some("Acme".to_string()),
                ..Default::default()
            },
        )];

        assert!(find_attachment(&transaction, &attachments).is_none());
    }

    #[test]
    fn tie_at_the_maximum_score_is_rejected() {
        let transaction = Transaction {
            amount: amount("-50.0"),
            date: Some("2024-06-01".to_string()),
            ..Default::default()
        };
        let twin = AttachmentData {
            total_amount: amount("50.0"),
            invoicing_date: Some("2024-06-05".to_string()),
            ..Default::default()
        };
        let attachments = vec![
            attachment("twin-a", twin.clone()),
            attachment("twin-b", twin),
        ];

        assert!(find_attachment(&transaction, &attachments).is_none());
    }

    #[test]
    fn find_transaction_scores_in_document_direction() {
        let attachment = attachment(
            "invoice",
            AttachmentData {
                total_amount: amount("120.25"),
                due_date: Some("2024-05-20".to_string()),
                supplier: Some("Nordic Parts Ab".to_string()),
                ..Default::default()
            },
        );
        let transactions = vec![
            Transaction {
                id: Some("tx-1".to_string()),
                amount: amount("-120.25"),
                date: Some("2024-05-18".to_string()),
                contact: Some("Nordic Parts".to_string()),
                ..Default::default()
            },
            Transaction {
                id: Some("tx-2".to_string()),
                amount: amount("-13.40"),
                date: Some("2023-11-02".to_string()),
                contact: Some("Lunch Place".to_string()),
                ..Default::default()
            },
        ];

        let found = find_transaction(&attachment, &transactions).unwrap();
        assert_eq!(found.id.as_deref(), Some("tx-1"));
    }

    #[test]
    fn empty_inputs_yield_no_match() {
        assert!(find_attachment(&Transaction::default(), &[]).is_none());
        assert!(find_attachment(&Transaction::default(), &[Attachment::default()]).is_none());
        assert!(find_transaction(&Attachment::default(), &[Transaction::default()]).is_none());
    }

    #[test]
    fn custom_window_and_threshold_change_outcomes() {
        let transaction = Transaction {
            amount: amount("-75.5"),
            date: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        let attachments = vec![attachment(
            "invoice",
            AttachmentData {
                total_amount: amount("75.5"),
                invoicing_date: Some("2024-03-10".to_string()),
                ..Default::default()
            },
        )];

        // Score 2 under the defaults.
        assert!(find_attachment(&transaction, &attachments).is_some());

        // A 3-day window drops the date signal, leaving score 1.
        let narrow = Matcher::with_config(MatcherConfig::new().with_date_window_days(3)).unwrap();
        assert!(narrow.find_attachment(&transaction, &attachments).is_none());

        // A threshold of 3 demands all signals.
        let strict =
            Matcher::with_config(MatcherConfig::new().with_confidence_threshold(3)).unwrap();
        assert!(strict.find_attachment(&transaction, &attachments).is_none());
    }

    #[test]
    fn with_config_rejects_invalid_settings() {
        assert!(Matcher::with_config(MatcherConfig::new().with_confidence_threshold(0)).is_err());
        assert!(Matcher::with_config(MatcherConfig::new().with_date_window_days(-7)).is_err());
    }
}
