use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{
    calculate_tax, calculate_tax_from_text, round_money, CostEntry, CostEntryEdit, TaxError,
    TaxType,
};

#[test]
fn test_exclusive_scenario_from_quote_form() {
    let totals = calculate_tax_from_text("100", "10", TaxType::Exclusive).unwrap();

    assert_eq!(totals.total_tax_display(), "10.00");
    assert_eq!(totals.total_amount_display(), "110.00");
}

#[test]
fn test_inclusive_scenario_from_quote_form() {
    let totals = calculate_tax_from_text("110", "10", TaxType::Inclusive).unwrap();

    assert_eq!(totals.total_tax_display(), "10.00");
    assert_eq!(totals.total_amount_display(), "110.00");
}

#[test]
fn test_exclusive_total_is_net_times_one_plus_rate() {
    let cases = [
        (dec!(0), dec!(0)),
        (dec!(100), dec!(10)),
        (dec!(1234.56), dec!(15)),
        (dec!(99.99), dec!(12.5)),
        (dec!(0.01), dec!(20)),
    ];

    for (net, rate) in cases {
        let totals = calculate_tax(net, rate, TaxType::Exclusive).unwrap();
        let expected = round_money(net * (Decimal::ONE + rate / dec!(100)));
        assert_eq!(totals.total_amount, expected, "net={net} rate={rate}");
    }
}

#[test]
fn test_inclusive_tax_fraction_and_net_reconstruction() {
    let cases = [
        (dec!(110), dec!(10)),
        (dec!(115), dec!(15)),
        (dec!(49.99), dec!(5)),
        (dec!(1000), dec!(0)),
    ];

    for (net, rate) in cases {
        let totals = calculate_tax(net, rate, TaxType::Inclusive).unwrap();
        let expected_tax = round_money(net * rate / (dec!(100) + rate));

        assert_eq!(totals.total_tax, expected_tax, "net={net} rate={rate}");
        assert_eq!(totals.total_amount, net);
        assert_eq!(
            totals.total_tax + (totals.total_amount - totals.total_tax),
            net
        );
    }
}

#[test]
fn test_zero_gst_never_taxes() {
    for rate in [dec!(0), dec!(5), dec!(15), dec!(100)] {
        let totals = calculate_tax(dec!(320.40), rate, TaxType::ZeroGst).unwrap();
        assert_eq!(totals.total_tax, Decimal::ZERO);
        assert_eq!(totals.total_amount, dec!(320.40));
    }
}

#[test]
fn test_recompute_is_idempotent() {
    let first = calculate_tax_from_text("77.77", "7", TaxType::Inclusive).unwrap();
    let second = calculate_tax_from_text("77.77", "7", TaxType::Inclusive).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_boundary_rate_rejected_instead_of_non_finite() {
    let result = calculate_tax_from_text("100", "-100", TaxType::Inclusive);
    assert_eq!(result, Err(TaxError::InvalidTaxRate(dec!(-100))));
}

#[test]
fn test_edits_are_order_independent() {
    let base = CostEntry::default();

    let a = base
        .apply(CostEntryEdit::NetAmount("200".into()))
        .and_then(|e| e.apply(CostEntryEdit::TaxRate("12.5".into())))
        .and_then(|e| e.apply(CostEntryEdit::TaxType(TaxType::Exclusive)))
        .unwrap();

    let b = base
        .apply(CostEntryEdit::TaxType(TaxType::Exclusive))
        .and_then(|e| e.apply(CostEntryEdit::TaxRate("12.5".into())))
        .and_then(|e| e.apply(CostEntryEdit::NetAmount("200".into())))
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(a.total_tax, dec!(25));
    assert_eq!(a.total_amount, dec!(225));
}

#[test]
fn test_cost_entry_serializes_amounts_as_strings() {
    let entry = CostEntry::new("USD", dec!(1), dec!(100), dec!(10), TaxType::Exclusive).unwrap();
    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["tax_type"], "exclusive");
    let total: Decimal = json["total_amount"].as_str().unwrap().parse().unwrap();
    assert_eq!(total, dec!(110));
    assert_eq!(json["currency"], "USD");
}
