//! Money helpers using rust_decimal
//!
//! Amounts are `Decimal` end to end. Every computed total goes through
//! [`round_money`] so the rounding policy lives in one place.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Round to the minor unit, midpoint away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Line total: unit price * quantity, rounded
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_money(Decimal::new(10005, 3)), Decimal::new(1001, 2));
        assert_eq!(round_money(Decimal::new(10004, 3)), Decimal::new(1000, 2));
        assert_eq!(round_money(Decimal::new(-10005, 3)), Decimal::new(-1001, 2));
    }

    #[test]
    fn test_accumulation_precision() {
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += Decimal::new(1, 2);
        }
        assert_eq!(round_money(total), Decimal::from(10));
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(Decimal::new(1099, 2), 3), Decimal::new(3297, 2));
        assert_eq!(line_total(Decimal::from(4500), 0), Decimal::ZERO);
    }
}
