//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary values stay `Decimal` from storage through arithmetic to the
//! wire; binary floats appear nowhere in the money path. Rounding happens
//! once per derived amount, to the minor unit, half-up.

use rust_decimal::prelude::*;

/// Monetary values round to 2 decimal places (minor currency unit)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary amount to the minor unit, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `base * percentage / 100`, rounded to the minor unit
///
/// Used for the flat tax percentage; the division happens in exact decimal
/// space so 8.25% of $20.00 is exactly $1.65.
#[inline]
pub fn percentage_of(base: Decimal, percentage: Decimal) -> Decimal {
    round_money(base * percentage / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_half_up() {
        // 0.005 rounds up to 0.01
        assert_eq!(round_money(Decimal::new(5, 3)), Decimal::new(1, 2));
        // 0.004 rounds down to 0.00
        assert_eq!(round_money(Decimal::new(4, 3)), Decimal::ZERO);
    }

    #[test]
    fn test_accumulation_precision() {
        // Sum $0.01 one thousand times: no drift
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += Decimal::new(1, 2);
        }
        assert_eq!(total, Decimal::new(1000, 2));
    }

    #[test]
    fn test_percentage_of_exact() {
        // 8.25% of $20.00 = $1.65 exactly
        assert_eq!(
            percentage_of(Decimal::new(2000, 2), Decimal::new(825, 2)),
            Decimal::new(165, 2)
        );
        // 10% of $0.05 = $0.005 → rounds half-up to $0.01
        assert_eq!(
            percentage_of(Decimal::new(5, 2), Decimal::new(10, 0)),
            Decimal::new(1, 2)
        );
    }

    #[test]
    fn test_decimal_edge_multiplications() {
        // The classic float-drift cases stay exact in decimal space
        assert_eq!(
            Decimal::new(179, 2) * Decimal::from(3),
            Decimal::new(537, 2)
        ); // 1.79 * 3 = 5.37
        assert_eq!(Decimal::new(25, 2) * Decimal::from(1), Decimal::new(25, 2));
        assert_eq!(
            Decimal::new(1470, 2) * Decimal::from(7),
            Decimal::new(10290, 2)
        ); // 14.70 * 7 = 102.90
    }
}
