//! # Reconciliation Core
//!
//! A deterministic matching library that reconciles bank transactions with
//! supporting documents (invoices, receipts). Given one record and a list
//! of candidates it returns the single counterpart that corresponds to it,
//! or nothing at all: a wrong match is worse than no match.
//!
//! ## Features
//!
//! - **Reference matching**: normalized payment references are treated as
//!   identities and matched exactly, bypassing heuristics
//! - **Heuristic scoring**: amount, date-window, and counterparty signals
//!   combine into a 0-3 score with a name-mismatch veto
//! - **Confidence and ambiguity rules**: a match needs at least two
//!   agreeing signals and no tied runner-up
//! - **Configurable contract**: date window, confidence threshold, own
//!   company name, and legal-suffix list are explicit settings
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{find_attachment, Attachment, AttachmentData, Transaction};
//!
//! let transaction = Transaction {
//!     amount: Some("-75.50".parse().unwrap()),
//!     date: Some("2024-03-01".to_string()),
//!     contact: Some("Acme Oy".to_string()),
//!     ..Default::default()
//! };
//!
//! let attachments = vec![Attachment {
//!     data: AttachmentData {
//!         total_amount: Some("75.50".parse().unwrap()),
//!         invoicing_date: Some("2024-03-10".to_string()),
//!         supplier: Some("Acme".to_string()),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! }];
//!
//! assert!(find_attachment(&transaction, &attachments).is_some());
//! ```

pub mod matching;
pub mod types;

// Re-export commonly used types
pub use matching::*;
pub use types::*;
