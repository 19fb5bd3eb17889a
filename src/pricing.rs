use crate::config::UnitPrice;

/// Cost of `selected` cells, rounded up to a whole currency unit.
///
/// Computed with integer arithmetic so a fractional unit price never
/// under-charges through float truncation.
pub fn cost(selected: usize, unit_price: UnitPrice) -> u64 {
    let numerator = (selected as u128) * (unit_price.numerator() as u128);
    let den = unit_price.denominator().get() as u128;
    let rounded = numerator.div_ceil(den);
    u64::try_from(rounded).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reference_price_is_ten_per_cell() {
        let price = UnitPrice::default();
        assert_eq!(cost(0, price), 0);
        assert_eq!(cost(1, price), 10);
        assert_eq!(cost(7, price), 70);
        assert_eq!(cost(64, price), 640);
    }

    #[test]
    fn fractional_price_rounds_up() {
        // 2.5 per cell
        let price = UnitPrice::new(5, 2).unwrap();
        assert_eq!(cost(1, price), 3);
        assert_eq!(cost(2, price), 5);
        assert_eq!(cost(3, price), 8);
    }

    proptest! {
        #[test]
        fn cost_is_ceiling_and_monotonic(n in 0usize..=64, num in 1u64..10_000, den in 1u64..500) {
            let price = UnitPrice::new(num, den).unwrap();
            let c = cost(n, price);
            let exact = (n as u64) * num;
            prop_assert!(c * den >= exact);
            prop_assert!(c == 0 || (c - 1) * den < exact);
            if n < 64 {
                prop_assert!(cost(n + 1, price) >= c);
            }
        }
    }
}
