use cosmwasm_std::{Decimal, Uint128, Uint256};

use crate::seed::SEED_LEN;

/// The highest supported precision. This is the native number of decimal places
/// of [`Decimal`].
pub const MAX_RAND_PREC: u32 = 18;

/// Number of high-order seed bytes interpreted as the random integer
const HIGH_ORDER_BYTES: usize = 16;

/// Returns a Decimal d with 0 <= d < 1 and `rand_prec` decimal places.
///
/// The 16 high-order bytes of the seed are read as a big endian integer x and
/// normalized to floor(x * 10^rand_prec / 2^128) / 10^rand_prec. Precisions above
/// [`MAX_RAND_PREC`] are capped.
pub fn random_decimal(seed: &[u8; SEED_LEN], rand_prec: u32) -> Decimal {
    let rand_prec = rand_prec.min(MAX_RAND_PREC);

    let mut high = [0u8; HIGH_ORDER_BYTES];
    high.copy_from_slice(&seed[..HIGH_ORDER_BYTES]);
    let x = Uint256::from(u128::from_be_bytes(high));
    let scale = Uint256::from(10u128.pow(rand_prec));

    // x < 2^128 and scale <= 10^18 < 2^60, so the product fits into 188 bits
    // and the shifted result is < scale.
    let atomics = (x * scale) >> (8 * HIGH_ORDER_BYTES as u32);
    let atomics = Uint128::try_from(atomics).unwrap();

    // Cannot overflow since atomics < 10^rand_prec <= 10^18
    Decimal::from_atomics(atomics, rand_prec).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    use sha2::{Digest, Sha256};
    use std::str::FromStr;

    #[test]
    fn random_decimal_works() {
        assert_eq!(random_decimal(&[0x00; 32], 18), Decimal::zero());
        assert_eq!(
            random_decimal(&[0xFF; 32], 18),
            Decimal::from_str("0.999999999999999999").unwrap()
        );
        let mut half = [0x00; 32];
        half[0] = 0x80;
        assert_eq!(random_decimal(&half, 18), Decimal::percent(50));

        assert_eq!(
            random_decimal(&[0xAB; 32], 18),
            Decimal::from_str("0.670588235294117647").unwrap()
        );
    }

    #[test]
    fn random_decimal_truncates_to_precision() {
        assert_eq!(
            random_decimal(&[0xAB; 32], 5),
            Decimal::from_str("0.67058").unwrap()
        );
        assert_eq!(
            random_decimal(&[0xAB; 32], 1),
            Decimal::from_str("0.6").unwrap()
        );
        assert_eq!(
            random_decimal(&[0xFF; 32], 2),
            Decimal::from_str("0.99").unwrap()
        );
        // Zero digits leaves nothing but zero
        assert_eq!(random_decimal(&[0xFF; 32], 0), Decimal::zero());
        // capped
        assert_eq!(
            random_decimal(&[0xAB; 32], 30),
            random_decimal(&[0xAB; 32], 18)
        );
    }

    #[test]
    fn random_decimal_only_uses_high_order_bytes() {
        let mut a = [0xAB; 32];
        a[16..].copy_from_slice(&[0x00; 16]);
        assert_eq!(random_decimal(&a, 18), random_decimal(&[0xAB; 32], 18));
    }

    #[test]
    fn random_decimal_is_uniform() {
        const ROUNDS: u32 = 50_000;
        const BUCKETS: usize = 10;
        // Critical value of the chi-square distribution with 9 degrees of freedom at p = 0.0001
        const CHI_SQUARE_CRITICAL: f64 = 33.72;

        let mut counts = [0usize; BUCKETS];
        for i in 0..ROUNDS {
            let seed: [u8; 32] = Sha256::digest(i.to_be_bytes()).into();
            let value = random_decimal(&seed, 18);
            assert!(value < Decimal::one());
            // The first decimal digit selects the bucket
            let bucket = (value.atomics().u128() / 100_000_000_000_000_000) as usize;
            counts[bucket] += 1;
        }

        println!("Distribution: {counts:?}");
        assert_eq!(counts.iter().sum::<usize>(), ROUNDS as usize);

        let expected = ROUNDS as f64 / BUCKETS as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        println!("Chi-square: {chi_square}");
        assert!(chi_square < CHI_SQUARE_CRITICAL);
        for count in counts {
            assert!((4_700..=5_300).contains(&count));
        }
    }
}
