//! Tax and gross amount derivation for a single cost entry
//!
//! Arithmetic is carried out in `Decimal` so that values such as
//! `100 * 1.10` stay exact; only the final outputs are rounded.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::TaxError;
use crate::models::{TaxTotals, TaxType};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Parse a user-entered amount. Empty or non-numeric text yields zero.
pub fn parse_amount(input: &str) -> Decimal {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

/// Round a monetary value to two decimals, halves away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute tax and gross totals for a net amount
///
/// # Rules
///
/// - `Exclusive`: tax = net × rate / 100, total = net + tax
/// - `Inclusive`: total = net, tax = net × rate / (100 + rate)
/// - `ZeroGst`: tax = 0, total = net
///
/// # Errors
///
/// Returns `TaxError::InvalidTaxRate` for a negative rate and
/// `TaxError::Overflow` if an intermediate value exceeds `Decimal` range.
pub fn calculate_tax(
    net_amount: Decimal,
    tax_rate: Decimal,
    tax_type: TaxType,
) -> Result<TaxTotals, TaxError> {
    if tax_rate.is_sign_negative() && !tax_rate.is_zero() {
        return Err(TaxError::InvalidTaxRate(tax_rate));
    }

    let (tax, total) = match tax_type {
        TaxType::Exclusive => {
            let tax = net_amount
                .checked_mul(tax_rate)
                .and_then(|v| v.checked_div(HUNDRED))
                .ok_or(TaxError::Overflow)?;
            let total = net_amount.checked_add(tax).ok_or(TaxError::Overflow)?;
            (tax, total)
        }
        TaxType::Inclusive => {
            let divisor = HUNDRED.checked_add(tax_rate).ok_or(TaxError::Overflow)?;
            let tax = net_amount
                .checked_mul(tax_rate)
                .and_then(|v| v.checked_div(divisor))
                .ok_or(TaxError::Overflow)?;
            (tax, net_amount)
        }
        TaxType::ZeroGst => (Decimal::ZERO, net_amount),
    };

    Ok(TaxTotals {
        total_tax: round_money(tax),
        total_amount: round_money(total),
    })
}

/// Text-input variant used by form collaborators
///
/// Both fields go through [`parse_amount`], so malformed input counts as zero.
pub fn calculate_tax_from_text(
    net_amount: &str,
    tax_rate: &str,
    tax_type: TaxType,
) -> Result<TaxTotals, TaxError> {
    let net = parse_amount(net_amount);
    let rate = parse_amount(tax_rate);

    tracing::trace!(%net, %rate, %tax_type, "Recomputing cost entry tax");

    calculate_tax(net, rate, tax_type)
}
