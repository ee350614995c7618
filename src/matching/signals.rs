//! Match signals: amount, date, and counterparty comparisons
//!
//! Each signal is a pure predicate over one transaction and one document.
//! Missing or malformed data degrades the signal to `false`; no signal
//! ever fails.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};

use crate::matching::config::MatcherConfig;
use crate::matching::normalize::normalize_name;
use crate::types::{Attachment, Transaction};

/// Parse an ISO-8601 date, accepting a bare date or a datetime's date part.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    raw.parse::<NaiveDate>()
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}

/// Whether the transaction amount and the document total agree.
///
/// Transactions are signed by flow direction while document totals are
/// magnitudes, so absolute values are compared. Equality is exact:
/// amounts are decimal values from matching records, so no tolerance is
/// applied.
pub fn amount_matches(tx: &Transaction, att: &Attachment) -> bool {
    match (&tx.amount, &att.data.total_amount) {
        (Some(tx_amount), Some(att_amount)) => tx_amount.abs() == att_amount.abs(),
        _ => false,
    }
}

/// Whether the transaction date falls within the configured window of any
/// document date.
///
/// The document's invoicing, due, and receiving dates are tried in that
/// order; the first one inside the window decides. Unparseable dates on
/// either side are skipped.
pub fn date_matches(tx: &Transaction, att: &Attachment, config: &MatcherConfig) -> bool {
    let Some(tx_date) = tx.date.as_deref().and_then(parse_iso_date) else {
        return false;
    };

    att.data
        .dates()
        .iter()
        .flatten()
        .filter_map(|raw| parse_iso_date(raw))
        .any(|att_date| (tx_date - att_date).num_days().abs() <= config.date_window_days)
}

/// All normalized counterparty names mentioned on a document.
///
/// Documents frequently list the operating company itself as issuer or
/// recipient next to the true counterparty; the own-company name is
/// excluded so it can never stand in for one.
pub fn attachment_counterparties(att: &Attachment, config: &MatcherConfig) -> HashSet<String> {
    let own_name = normalize_name(&config.own_company_name, &config.legal_suffixes);

    att.data
        .party_names()
        .iter()
        .flatten()
        .filter_map(|raw| normalize_name(raw, &config.legal_suffixes))
        .filter(|name| Some(name) != own_name.as_ref())
        .collect()
}

/// Whether the transaction's contact is among the document's counterparties.
///
/// Exact set membership after normalization; a side with no usable name
/// yields `false` rather than a vacuous match.
pub fn counterparty_matches(tx: &Transaction, att: &Attachment, config: &MatcherConfig) -> bool {
    let Some(contact) = tx
        .contact
        .as_deref()
        .and_then(|c| normalize_name(c, &config.legal_suffixes))
    else {
        return false;
    };

    attachment_counterparties(att, config).contains(&contact)
}

/// Heuristic match score for a transaction/document pair, in `0..=3`.
///
/// Counts the agreeing signals, subject to the counterparty veto: when
/// both sides carry usable names and they disagree, the score is forced
/// to 0. An unambiguous name mismatch outweighs coincidental agreement
/// on amount and date.
pub fn match_score(tx: &Transaction, att: &Attachment, config: &MatcherConfig) -> u8 {
    let amount = amount_matches(tx, att);
    let date = date_matches(tx, att, config);

    let contact = tx
        .contact
        .as_deref()
        .and_then(|c| normalize_name(c, &config.legal_suffixes));
    let counterparties = attachment_counterparties(att, config);
    let name = contact
        .as_ref()
        .is_some_and(|c| counterparties.contains(c));

    let name_check_possible = contact.is_some() && !counterparties.is_empty();
    if name_check_possible && !name {
        return 0;
    }

    [amount, date, name].into_iter().filter(|&s| s).count() as u8
}
