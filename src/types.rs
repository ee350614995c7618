//! Core record types and errors for the reconciliation system

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A bank transaction awaiting reconciliation.
///
/// Records are supplied fully parsed by the surrounding application and are
/// never mutated by the matcher. Every field is optional: missing data
/// degrades the corresponding match signal instead of failing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// Opaque identifier assigned by the caller, ignored by matching
    pub id: Option<String>,
    /// Booked amount, signed by flow direction (debits negative)
    pub amount: Option<BigDecimal>,
    /// Booking date as ISO-8601 text (parsed lazily by the date signal)
    pub date: Option<String>,
    /// Free-text counterparty name
    pub contact: Option<String>,
    /// Free-text payment reference
    pub reference: Option<String>,
}

/// A supporting document (invoice or receipt) awaiting reconciliation.
///
/// The matching-relevant fields live in the nested [`AttachmentData`]
/// payload, mirroring the shape the document-extraction pipeline emits.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    /// Opaque identifier assigned by the caller, ignored by matching
    pub id: Option<String>,
    /// Extracted document data
    pub data: AttachmentData,
}

/// Extracted payload of a document.
///
/// Invoices and receipts commonly carry several candidate dates and several
/// party names; all of them participate in matching.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentData {
    /// Payment reference printed on the document
    pub reference: Option<String>,
    /// Document total, recorded as a magnitude but tolerated signed
    pub total_amount: Option<BigDecimal>,
    /// Invoicing date as ISO-8601 text
    pub invoicing_date: Option<String>,
    /// Due date as ISO-8601 text
    pub due_date: Option<String>,
    /// Receiving date as ISO-8601 text
    pub receiving_date: Option<String>,
    /// Supplier party name
    pub supplier: Option<String>,
    /// Issuer party name
    pub issuer: Option<String>,
    /// Recipient party name
    pub recipient: Option<String>,
}

impl AttachmentData {
    /// Candidate document dates in their fixed comparison order.
    pub fn dates(&self) -> [Option<&str>; 3] {
        [
            self.invoicing_date.as_deref(),
            self.due_date.as_deref(),
            self.receiving_date.as_deref(),
        ]
    }

    /// Raw party names mentioned on the document.
    pub fn party_names(&self) -> [Option<&str>; 3] {
        [
            self.supplier.as_deref(),
            self.issuer.as_deref(),
            self.recipient.as_deref(),
        ]
    }
}

/// Errors that can occur in the reconciliation system
///
/// Matching itself is total: malformed records degrade signals to "no
/// match" and never produce an error. Only matcher construction with an
/// unusable configuration is fallible.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("Invalid matcher configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for reconciliation operations
pub type MatchResult<T> = Result<T, MatchError>;
