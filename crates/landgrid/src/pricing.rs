//! Derived plot pricing.

use rust_decimal::Decimal;

/// Computes the derived total price of a plot.
///
/// Runs immediately before every plot persist that carries both inputs;
/// whatever the caller supplied for `total_price` is overwritten. Decimal
/// arithmetic keeps the recomputation exact: repeated recomputes from the
/// same inputs always yield the same stored value.
pub fn total_price(area: Decimal, price_per_sq_ft: Decimal) -> Decimal {
    area * price_per_sq_ft
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    #[test]
    fn test_exact_product() {
        let area = Decimal::from(1200);
        let rate = Decimal::from(1500);
        assert_eq!(total_price(area, rate), Decimal::from(1_800_000));
    }

    #[test]
    fn test_fractional_inputs_stay_exact() {
        let area = Decimal::from_str("1066.5").unwrap();
        let rate = Decimal::from_str("1250.25").unwrap();
        assert_eq!(
            total_price(area, rate),
            Decimal::from_str("1333391.625").unwrap()
        );
    }

    proptest! {
        /// Recomputing from the same inputs is idempotent: no drift across
        /// repeated derivation, which floating point would not guarantee.
        #[test]
        fn prop_recompute_is_idempotent(area in 50u32..=100_000, rate in 100u32..=50_000) {
            let area = Decimal::from(area);
            let rate = Decimal::from(rate);
            let first = total_price(area, rate);
            let second = total_price(area, rate);
            prop_assert_eq!(first, second);
        }
    }
}
