// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount for display on documents: `KES 1,234.56`.
///
/// Rounding happens here only; stored amounts keep full precision.
pub fn format_kes(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let as_text = format!("{:.2}", rounded.abs());

    let (int_part, frac_part) = as_text.split_once('.').unwrap_or((as_text.as_str(), "00"));

    // Group the integer digits in threes, right to left.
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("KES {}{}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_plain_amount() {
        assert_eq!(format_kes(dec!(222)), "KES 222.00");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_kes(dec!(1234567.5)), "KES 1,234,567.50");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_kes(dec!(10.005)), "KES 10.01");
    }

    #[test]
    fn keeps_sign_on_negative_totals() {
        assert_eq!(format_kes(dec!(-1500)), "KES -1,500.00");
    }

    #[test]
    fn zero_is_unsigned() {
        assert_eq!(format_kes(dec!(0)), "KES 0.00");
    }
}
