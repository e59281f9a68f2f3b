//! Line-total / discount / IVA arithmetic for quotations, orders and sales.
//!
//! Totals are never persisted as an invariant by the client: they are
//! recomputed from the lines on every edit and sent along with the document.

use serde::{Deserialize, Serialize};

/// IVA rate applied when the configuration does not say otherwise.
pub const DEFAULT_IVA_RATE: f64 = 0.16;

/// How the `discount` of a line is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountType {
    /// `discount` is a percentage of the gross line amount (0..=100).
    #[default]
    Percentage,
    /// `discount` is a fixed amount subtracted from the gross line amount.
    Amount,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Amount => "amount",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "amount" => DiscountType::Amount,
            _ => DiscountType::Percentage,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "%",
            DiscountType::Amount => "$",
        }
    }
}

/// Anything that can be priced as a document line.
pub trait PricedLine {
    fn quantity(&self) -> f64;
    fn unit_price(&self) -> f64;
    fn discount(&self) -> f64;
    fn discount_type(&self) -> DiscountType;

    fn applies_iva(&self) -> bool {
        true
    }
}

/// Derived header amounts of a document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub iva: f64,
    pub total: f64,
}

/// Round half away from zero to two decimals.
///
/// Half-cent inputs such as `1.005` are stored slightly below the half, so
/// the scaled value is nudged a few ulps away from zero before rounding.
pub fn round2(value: f64) -> f64 {
    let cents = value * 100.0;
    let nudged = cents + cents.signum() * cents.abs() * f64::EPSILON * 8.0;
    nudged.round() / 100.0
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// `quantity × unit_price`; negative or non-finite inputs count as zero.
pub fn line_gross(quantity: f64, unit_price: f64) -> f64 {
    non_negative(quantity) * non_negative(unit_price)
}

/// Discount amount for a gross line amount.
pub fn line_discount(gross: f64, discount: f64, discount_type: DiscountType) -> f64 {
    let discount = non_negative(discount);
    match discount_type {
        DiscountType::Percentage => gross * discount.min(100.0) / 100.0,
        DiscountType::Amount => discount.min(gross),
    }
}

pub fn line_total<L: PricedLine + ?Sized>(line: &L) -> f64 {
    let gross = line_gross(line.quantity(), line.unit_price());
    round2(gross - line_discount(gross, line.discount(), line.discount_type()))
}

pub fn compute_totals<L: PricedLine>(lines: &[L], iva_rate: f64) -> DocumentTotals {
    let mut subtotal = 0.0;
    let mut discount = 0.0;
    let mut taxable = 0.0;

    for line in lines {
        let gross = line_gross(line.quantity(), line.unit_price());
        let line_disc = line_discount(gross, line.discount(), line.discount_type());
        subtotal += gross;
        discount += line_disc;
        if line.applies_iva() {
            taxable += gross - line_disc;
        }
    }

    let subtotal = round2(subtotal);
    let discount = round2(discount);
    let iva = round2(taxable * non_negative(iva_rate));
    DocumentTotals {
        subtotal,
        discount,
        iva,
        total: round2(subtotal - discount + iva),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line {
        quantity: f64,
        unit_price: f64,
        discount: f64,
        discount_type: DiscountType,
        applies_iva: bool,
    }

    impl Line {
        fn new(quantity: f64, unit_price: f64) -> Self {
            Self {
                quantity,
                unit_price,
                discount: 0.0,
                discount_type: DiscountType::Percentage,
                applies_iva: true,
            }
        }

        fn with_discount(mut self, discount: f64, discount_type: DiscountType) -> Self {
            self.discount = discount;
            self.discount_type = discount_type;
            self
        }
    }

    impl PricedLine for Line {
        fn quantity(&self) -> f64 {
            self.quantity
        }
        fn unit_price(&self) -> f64 {
            self.unit_price
        }
        fn discount(&self) -> f64 {
            self.discount
        }
        fn discount_type(&self) -> DiscountType {
            self.discount_type
        }
        fn applies_iva(&self) -> bool {
            self.applies_iva
        }
    }

    #[test]
    fn percentage_and_amount_discounts() {
        let pct = Line::new(4.0, 25.0).with_discount(10.0, DiscountType::Percentage);
        assert_eq!(line_total(&pct), 90.0);

        let amount = Line::new(4.0, 25.0).with_discount(15.0, DiscountType::Amount);
        assert_eq!(line_total(&amount), 85.0);
    }

    #[test]
    fn discounts_are_clamped() {
        let over_pct = Line::new(1.0, 50.0).with_discount(150.0, DiscountType::Percentage);
        assert_eq!(line_total(&over_pct), 0.0);

        let over_amount = Line::new(1.0, 50.0).with_discount(80.0, DiscountType::Amount);
        assert_eq!(line_total(&over_amount), 0.0);

        let negative = Line::new(2.0, 10.0).with_discount(-5.0, DiscountType::Amount);
        assert_eq!(line_total(&negative), 20.0);

        let negative_qty = Line::new(-3.0, 10.0);
        assert_eq!(line_total(&negative_qty), 0.0);
    }

    #[test]
    fn document_totals_with_iva() {
        let lines = vec![
            Line::new(2.0, 100.0).with_discount(10.0, DiscountType::Percentage),
            Line::new(1.0, 50.0).with_discount(5.0, DiscountType::Amount),
        ];
        let totals = compute_totals(&lines, DEFAULT_IVA_RATE);
        assert_eq!(totals.subtotal, 250.0);
        assert_eq!(totals.discount, 25.0);
        assert_eq!(totals.iva, 36.0);
        assert_eq!(totals.total, 261.0);
    }

    #[test]
    fn exempt_lines_do_not_carry_iva() {
        let mut exempt = Line::new(1.0, 100.0);
        exempt.applies_iva = false;
        let lines = vec![Line::new(1.0, 100.0), exempt];
        let totals = compute_totals(&lines, DEFAULT_IVA_RATE);
        assert_eq!(totals.subtotal, 200.0);
        assert_eq!(totals.iva, 16.0);
        assert_eq!(totals.total, 216.0);
    }

    #[test]
    fn empty_document_is_zero() {
        let lines: Vec<Line> = Vec::new();
        assert_eq!(compute_totals(&lines, DEFAULT_IVA_RATE), DocumentTotals::default());
    }

    #[test]
    fn rounding_to_cents() {
        assert_eq!(round2(10.005_1), 10.01);
        assert_eq!(round2(-2.345_1), -2.35);
        assert_eq!(round2(10.004_9), 10.0);
        let lines = vec![Line::new(3.0, 33.333)];
        let totals = compute_totals(&lines, DEFAULT_IVA_RATE);
        assert_eq!(totals.subtotal, 100.0);
        assert_eq!(totals.iva, 16.0);
    }

    #[test]
    fn half_cents_round_away_from_zero() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(1.015), 1.02);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-1.005), -1.01);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn discount_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&DiscountType::Amount).unwrap(),
            "\"amount\""
        );
        assert_eq!(DiscountType::parse("percentage"), DiscountType::Percentage);
        assert_eq!(DiscountType::parse("garbage"), DiscountType::Percentage);
    }
}
