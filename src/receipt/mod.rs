//! Receipt rendering.
//!
//! Receipts are composed into a format-neutral [`Document`] and then written
//! by a [`DocumentWriter`]. Amounts are rounded to cents here and nowhere
//! else.

mod composer;
mod document;
mod format;
mod writers;

pub use composer::{
    MULTIPLE_CAREGIVERS, ReceiptComposer, compose_consolidated_receipt, compose_entry_receipt,
    compose_work_log_receipt, receipt_id,
};
pub use document::{Document, DocumentWriter, Table};
pub use format::{format_hours, format_money, format_rate, round_money};
pub use writers::{JsonWriter, PlainTextWriter};
