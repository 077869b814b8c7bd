use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while computing cost entry totals
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxError {
    #[error("Tax rate must be non-negative, got {0}")]
    InvalidTaxRate(Decimal),

    #[error("Unknown tax type: {0} (expected exclusive, inclusive or zero_gst)")]
    UnknownTaxType(String),

    #[error("Arithmetic overflow while computing tax")]
    Overflow,
}
