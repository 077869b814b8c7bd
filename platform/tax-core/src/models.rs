use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TaxError;

/// How the tax rate applies to the entered net amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaxType {
    /// Tax is added on top of the net amount.
    #[default]
    Exclusive,
    /// The entered amount already contains the tax.
    Inclusive,
    /// Zero-rated: no tax regardless of rate.
    ZeroGst,
}

impl TaxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxType::Exclusive => "exclusive",
            TaxType::Inclusive => "inclusive",
            TaxType::ZeroGst => "zero_gst",
        }
    }
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxType {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclusive" => Ok(TaxType::Exclusive),
            "inclusive" => Ok(TaxType::Inclusive),
            "zero_gst" | "zero-gst" | "zerogst" => Ok(TaxType::ZeroGst),
            other => Err(TaxError::UnknownTaxType(other.to_string())),
        }
    }
}

/// Derived totals for a cost entry, rounded to two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTotals {
    pub total_tax: Decimal,
    pub total_amount: Decimal,
}

impl TaxTotals {
    pub fn zero() -> Self {
        Self {
            total_tax: Decimal::ZERO,
            total_amount: Decimal::ZERO,
        }
    }

    /// Tax formatted with exactly two decimals, e.g. `"10.00"`
    pub fn total_tax_display(&self) -> String {
        format!("{:.2}", self.total_tax)
    }

    /// Gross amount formatted with exactly two decimals
    pub fn total_amount_display(&self) -> String {
        format!("{:.2}", self.total_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_type_parse_variants() {
        assert_eq!("exclusive".parse::<TaxType>().unwrap(), TaxType::Exclusive);
        assert_eq!("Inclusive".parse::<TaxType>().unwrap(), TaxType::Inclusive);
        assert_eq!("zero_gst".parse::<TaxType>().unwrap(), TaxType::ZeroGst);
        assert_eq!("ZERO-GST".parse::<TaxType>().unwrap(), TaxType::ZeroGst);
    }

    #[test]
    fn test_tax_type_parse_unknown() {
        assert_eq!(
            "vat".parse::<TaxType>(),
            Err(TaxError::UnknownTaxType("vat".to_string()))
        );
    }

    #[test]
    fn test_tax_type_serde_snake_case() {
        let json = serde_json::to_string(&TaxType::ZeroGst).unwrap();
        assert_eq!(json, "\"zero_gst\"");
        let back: TaxType = serde_json::from_str("\"inclusive\"").unwrap();
        assert_eq!(back, TaxType::Inclusive);
    }

    #[test]
    fn test_display_pads_two_decimals() {
        let totals = TaxTotals {
            total_tax: Decimal::new(5, 0),
            total_amount: Decimal::new(1055, 1),
        };
        assert_eq!(totals.total_tax_display(), "5.00");
        assert_eq!(totals.total_amount_display(), "105.50");
    }
}
