// src/services/totals.rs

use rust_decimal::Decimal;

use crate::models::billing::{DocumentTotals, ItemInput};

/// Line amount for one item: quantity × unit price.
pub fn line_total(item: &ItemInput) -> Decimal {
    item.quantity * item.unit_price
}

/// Computes the three derived figures of a quotation or invoice.
///
/// Pure and total: it computes whatever the inputs imply and never clamps.
/// An empty item list with a discount yields a negative final amount;
/// rejecting that (or out-of-range inputs) is the caller's job, done in the
/// payload validators before the service layer gets here.
///
/// Amounts keep full `Decimal` precision so chained edits do not accumulate
/// rounding error; use [`DocumentTotals::rounded`] for display.
pub fn compute_totals(items: &[ItemInput], discount: Decimal, vat_rate: Decimal) -> DocumentTotals {
    let subtotal: Decimal = items.iter().map(line_total).sum();
    let vat_amount = subtotal * vat_rate / Decimal::ONE_HUNDRED;
    let final_amount = subtotal - discount + vat_amount;

    DocumentTotals {
        subtotal,
        vat_amount,
        final_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: Decimal, unit_price: Decimal) -> ItemInput {
        ItemInput {
            product_id: None,
            description: "item".to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn empty_items_without_discount_is_all_zero() {
        let totals = compute_totals(&[], dec!(0), dec!(0));
        assert_eq!(totals.subtotal, dec!(0));
        assert_eq!(totals.vat_amount, dec!(0));
        assert_eq!(totals.final_amount, dec!(0));
    }

    #[test]
    fn worked_example_from_the_billing_rules() {
        // 2 × 100, discount 10, VAT 16% → 200 / 32 / 222
        let totals = compute_totals(&[item(dec!(2), dec!(100))], dec!(10), dec!(16));
        assert_eq!(totals.subtotal, dec!(200));
        assert_eq!(totals.vat_amount, dec!(32));
        assert_eq!(totals.final_amount, dec!(222));
    }

    #[test]
    fn subtotal_is_order_independent() {
        let a = item(dec!(3), dec!(19.99));
        let b = item(dec!(1), dec!(250));
        let c = item(dec!(0.5), dec!(33.10));

        let forward = compute_totals(&[a.clone(), b.clone(), c.clone()], dec!(5), dec!(16));
        let backward = compute_totals(&[c, b, a], dec!(5), dec!(16));
        assert_eq!(forward, backward);
    }

    #[test]
    fn repeated_calls_yield_identical_results() {
        let items = vec![item(dec!(2), dec!(100)), item(dec!(1), dec!(49.50))];
        let first = compute_totals(&items, dec!(10), dec!(16));
        let second = compute_totals(&items, dec!(10), dec!(16));
        assert_eq!(first, second);
    }

    #[test]
    fn discount_can_push_the_total_negative() {
        // Not clamped; the caller decides whether a negative payable is allowed.
        let totals = compute_totals(&[], dec!(50), dec!(0));
        assert_eq!(totals.final_amount, dec!(-50));

        let totals = compute_totals(&[item(dec!(1), dec!(100))], dec!(200), dec!(16));
        assert_eq!(totals.final_amount, dec!(-84));
    }

    #[test]
    fn discount_applies_before_vat_is_added() {
        // VAT is computed on the subtotal, not on the discounted amount.
        let totals = compute_totals(&[item(dec!(1), dec!(1000))], dec!(100), dec!(16));
        assert_eq!(totals.vat_amount, dec!(160));
        assert_eq!(totals.final_amount, dec!(1060));
    }

    #[test]
    fn fractional_quantities_keep_precision() {
        let totals = compute_totals(&[item(dec!(0.333), dec!(3))], dec!(0), dec!(0));
        assert_eq!(totals.subtotal, dec!(0.999));
        assert_eq!(totals.rounded().subtotal, dec!(1.00));
    }

    #[test]
    fn zero_vat_rate_adds_nothing() {
        let totals = compute_totals(&[item(dec!(4), dec!(25))], dec!(0), dec!(0));
        assert_eq!(totals.vat_amount, dec!(0));
        assert_eq!(totals.final_amount, dec!(100));
    }
}
