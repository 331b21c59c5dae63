//! Money helpers built on decimal arithmetic.
//!
//! All amounts are plain USD [`Decimal`] values in the currency's standard
//! unit (dollars, not cents). Multi-currency support is out of scope for the
//! demo storefront.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to whole cents using standard currency rounding
/// (half-up, away from zero).
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display, e.g. `$19.99`.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", round_to_cents(amount))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents_truncates_extra_places() {
        // 139.97 + 8% tax = 151.1676
        let total = Decimal::new(1_511_676, 4);
        assert_eq!(round_to_cents(total), Decimal::new(15_117, 2));
    }

    #[test]
    fn test_round_to_cents_half_up() {
        // 2.005 rounds up, not to even
        assert_eq!(round_to_cents(Decimal::new(2005, 3)), Decimal::new(201, 2));
    }

    #[test]
    fn test_round_to_cents_already_exact() {
        let amount = Decimal::new(7999, 2);
        assert_eq!(round_to_cents(amount), amount);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(Decimal::new(7999, 2)), "$79.99");
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
        assert_eq!(format_usd(Decimal::new(5, 0)), "$5.00");
    }
}
