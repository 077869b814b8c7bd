//! # Tax Core
//!
//! Shared cost-entry tax calculation for fleet platform modules (workshop
//! quotes, trade-in costings, supplier invoices).
//!
//! A cost entry carries a user-entered net amount, a tax rate in percent and a
//! tax treatment. The tax and gross totals are never edited directly; they are
//! always re-derived from those three inputs.
//!
//! ## Usage
//!
//! ```rust
//! use tax_core::{calculate_tax_from_text, TaxType};
//!
//! let totals = calculate_tax_from_text("100", "10", TaxType::Exclusive).unwrap();
//! assert_eq!(totals.total_tax_display(), "10.00");
//! assert_eq!(totals.total_amount_display(), "110.00");
//! ```

mod calculator;
mod cost_entry;
mod error;
mod models;

pub use calculator::{calculate_tax, calculate_tax_from_text, parse_amount, round_money};
pub use cost_entry::{CostEntry, CostEntryEdit};
pub use error::TaxError;
pub use models::{TaxTotals, TaxType};
