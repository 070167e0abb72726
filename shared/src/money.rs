//! Money calculation helpers using rust_decimal for precision
//!
//! Prices travel as `f64` in the wire models (the store serialises doubles);
//! every sum is computed in `Decimal` and rounded half-up to cents.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert a wire price to `Decimal`. Non-finite input collapses to zero —
/// the store never produces it, but a snapshot must not poison a total.
pub fn to_money(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// `price * qty` in cents-precise arithmetic
pub fn line_total(price: f64, qty: i32) -> Decimal {
    to_money(price) * Decimal::from(qty)
}

/// Round to cents, half-up
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// German display format: `"7,00 €"`
pub fn format_eur(value: Decimal) -> String {
    format!("{:.2} €", round_money(value)).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_is_exact() {
        // 3 * 3.50 must be exactly 10.50, not 10.499999...
        assert_eq!(line_total(3.50, 3), Decimal::new(1050, 2));
    }

    #[test]
    fn test_round_half_up() {
        let v = Decimal::new(12345, 4); // 1.2345
        assert_eq!(round_money(v), Decimal::new(123, 2));
        let v = Decimal::new(12350, 4); // 1.2350
        assert_eq!(round_money(v), Decimal::new(124, 2));
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(Decimal::new(700, 2)), "7,00 €");
        assert_eq!(format_eur(Decimal::new(1234, 2)), "12,34 €");
    }

    #[test]
    fn test_non_finite_collapses_to_zero() {
        assert_eq!(to_money(f64::NAN), Decimal::ZERO);
        assert_eq!(to_money(f64::INFINITY), Decimal::ZERO);
    }
}
