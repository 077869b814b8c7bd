use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::{calculate_tax, parse_amount};
use crate::error::TaxError;
use crate::models::{TaxTotals, TaxType};

/// One line item of a cost form
///
/// `total_tax` and `total_amount` are derived; they only change through
/// [`CostEntry::apply`] or [`CostEntry::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEntry {
    pub currency: String,
    pub exchange_rate: Decimal,
    pub tax_rate: Decimal,
    pub tax_type: TaxType,
    pub net_amount: Decimal,
    pub total_tax: Decimal,
    pub total_amount: Decimal,
}

/// A single field edit on a cost entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostEntryEdit {
    NetAmount(String),
    TaxRate(String),
    TaxType(TaxType),
    Currency(String),
    ExchangeRate(String),
}

impl CostEntry {
    pub fn new(
        currency: impl Into<String>,
        exchange_rate: Decimal,
        net_amount: Decimal,
        tax_rate: Decimal,
        tax_type: TaxType,
    ) -> Result<Self, TaxError> {
        let totals = calculate_tax(net_amount, tax_rate, tax_type)?;
        Ok(Self {
            currency: currency.into(),
            exchange_rate,
            tax_rate,
            tax_type,
            net_amount,
            total_tax: totals.total_tax,
            total_amount: totals.total_amount,
        })
    }

    pub fn totals(&self) -> TaxTotals {
        TaxTotals {
            total_tax: self.total_tax,
            total_amount: self.total_amount,
        }
    }

    /// Apply one edit and return the resulting entry
    ///
    /// Edits to net amount, rate or tax type recompute the totals from the
    /// entry's other current values. Currency and exchange rate pass through.
    /// On error the original entry is left untouched.
    pub fn apply(&self, edit: CostEntryEdit) -> Result<Self, TaxError> {
        let mut next = self.clone();

        match edit {
            CostEntryEdit::NetAmount(text) => next.net_amount = parse_amount(&text),
            CostEntryEdit::TaxRate(text) => next.tax_rate = parse_amount(&text),
            CostEntryEdit::TaxType(tax_type) => next.tax_type = tax_type,
            CostEntryEdit::Currency(currency) => {
                next.currency = currency;
                return Ok(next);
            }
            CostEntryEdit::ExchangeRate(text) => {
                next.exchange_rate = parse_amount(&text);
                return Ok(next);
            }
        }

        let totals = calculate_tax(next.net_amount, next.tax_rate, next.tax_type)?;
        next.total_tax = totals.total_tax;
        next.total_amount = totals.total_amount;
        Ok(next)
    }
}

impl Default for CostEntry {
    fn default() -> Self {
        Self {
            currency: String::new(),
            exchange_rate: Decimal::ONE,
            tax_rate: Decimal::ZERO,
            tax_type: TaxType::default(),
            net_amount: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            total_amount: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_edits_recompute_with_current_values() {
        let entry = CostEntry::default()
            .apply(CostEntryEdit::NetAmount("100".into()))
            .unwrap();
        assert_eq!(entry.total_amount, dec!(100));

        let entry = entry.apply(CostEntryEdit::TaxRate("10".into())).unwrap();
        assert_eq!(entry.total_tax, dec!(10));
        assert_eq!(entry.total_amount, dec!(110));

        let entry = entry.apply(CostEntryEdit::TaxType(TaxType::Inclusive)).unwrap();
        assert_eq!(entry.total_tax, dec!(9.09));
        assert_eq!(entry.total_amount, dec!(100));
    }

    #[test]
    fn test_currency_and_exchange_rate_pass_through() {
        let entry = CostEntry::new("NZD", dec!(1), dec!(50), dec!(15), TaxType::Exclusive).unwrap();
        let edited = entry
            .apply(CostEntryEdit::Currency("AUD".into()))
            .and_then(|e| e.apply(CostEntryEdit::ExchangeRate("0.92".into())))
            .unwrap();

        assert_eq!(edited.currency, "AUD");
        assert_eq!(edited.exchange_rate, dec!(0.92));
        assert_eq!(edited.totals(), entry.totals());
    }

    #[test]
    fn test_negative_rate_edit_rejected() {
        let entry = CostEntry::new("USD", dec!(1), dec!(100), dec!(10), TaxType::Inclusive).unwrap();
        let result = entry.apply(CostEntryEdit::TaxRate("-100".into()));
        assert_eq!(result, Err(TaxError::InvalidTaxRate(dec!(-100))));
        assert_eq!(entry.tax_rate, dec!(10));
    }
}
