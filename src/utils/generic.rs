// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Scalar vector utilities shared by the prover and verifiers

use curve25519_dalek::scalar::Scalar;

use crate::{errors::ProofError, range_parameters::MAX_BIT_LENGTH};

/// Decompose a given value into a vector of scalars for the required bit length
pub fn bit_vector_of_scalars(value: u64, bit_length: usize) -> Result<Vec<Scalar>, ProofError> {
    if bit_length == 0 || bit_length > MAX_BIT_LENGTH {
        return Err(ProofError::InvalidArgument(format!(
            "Bit length must be in 1..={}",
            MAX_BIT_LENGTH
        )));
    }
    if bit_length < MAX_BIT_LENGTH && value >> bit_length != 0 {
        return Err(ProofError::RangeViolation(format!(
            "Value does not fit in {} bits",
            bit_length
        )));
    }
    let mut result = Vec::with_capacity(bit_length);
    for i in 0..bit_length {
        if (value >> i) & 1 == 0 {
            result.push(Scalar::ZERO);
        } else {
            result.push(Scalar::ONE);
        }
    }
    Ok(result)
}

/// Inner product of two equal length scalar vectors
pub fn inner_product(a: &[Scalar], b: &[Scalar]) -> Result<Scalar, ProofError> {
    if a.len() != b.len() {
        return Err(ProofError::LengthMismatch(format!(
            "Inner product of vectors of lengths {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// The first `n` powers of `x`, starting at `x^0`
pub fn powers(x: &Scalar, n: usize) -> Vec<Scalar> {
    let mut result = Vec::with_capacity(n);
    let mut current = Scalar::ONE;
    for _ in 0..n {
        result.push(current);
        current *= x;
    }
    result
}

/// `sum_{i < n} x^i`
pub fn sum_of_powers(x: &Scalar, n: usize) -> Scalar {
    powers(x, n).iter().sum()
}

/// The verifier's correction term `(z - z^2) * sum(y^i) - sum_j z^(3+j) * (2^n - 1)` for `m` values of `n` bits
pub fn delta(y: &Scalar, z: &Scalar, n: usize, m: usize) -> Scalar {
    let z_sq = z * z;
    let z_cu = z_sq * z;
    let sum_y = sum_of_powers(y, n * m);
    let sum_2 = sum_of_powers(&Scalar::from(2u8), n);
    let sum_z = sum_of_powers(z, m);

    (z - z_sq) * sum_y - z_cu * sum_2 * sum_z
}

#[cfg(test)]
mod tests {
    use curve25519_dalek::scalar::Scalar;
    use rand::thread_rng;

    use super::*;
    use crate::protocols::scalar_protocol::ScalarProtocol;

    fn bit_vector_to_value(bit_vector: &[Scalar]) -> u64 {
        let mut result = 0u128;
        for (i, bit) in bit_vector.iter().enumerate() {
            if *bit == Scalar::ONE {
                result += 1 << i;
            }
        }
        #[allow(clippy::cast_possible_truncation)]
        let result = result as u64;
        result
    }

    #[test]
    fn test_bit_vector() {
        assert_eq!(bit_vector_to_value(&bit_vector_of_scalars(11, 4).unwrap()), 11);
        assert_eq!(bit_vector_to_value(&bit_vector_of_scalars(15, 4).unwrap()), 15);
        assert_eq!(bit_vector_to_value(&bit_vector_of_scalars(15, 5).unwrap()), 15);
        assert_eq!(bit_vector_of_scalars(1, 1).unwrap(), vec![Scalar::ONE]);
        assert!(matches!(bit_vector_of_scalars(16, 4), Err(ProofError::RangeViolation(_))));
        assert!(matches!(
            bit_vector_of_scalars(0, MAX_BIT_LENGTH * 2),
            Err(ProofError::InvalidArgument(_))
        ));
        assert!(bit_vector_of_scalars(0, 0).is_err());
        assert_eq!(
            bit_vector_to_value(&bit_vector_of_scalars(u64::MAX - 12187, MAX_BIT_LENGTH).unwrap()),
            u64::MAX - 12187
        );
        assert_eq!(
            bit_vector_to_value(&bit_vector_of_scalars(u64::MAX, MAX_BIT_LENGTH).unwrap()),
            u64::MAX
        );
    }

    #[test]
    fn test_powers_and_sums() {
        let two = Scalar::from(2u8);
        assert_eq!(powers(&two, 4), vec![
            Scalar::ONE,
            two,
            Scalar::from(4u8),
            Scalar::from(8u8)
        ]);
        assert!(powers(&two, 0).is_empty());
        assert_eq!(sum_of_powers(&two, 8), Scalar::from(255u8));
        assert_eq!(sum_of_powers(&two, 64), Scalar::from(u64::MAX));
    }

    #[test]
    fn test_inner_product() {
        let a = vec![Scalar::from(1u8), Scalar::from(2u8), Scalar::from(3u8)];
        let b = vec![Scalar::from(4u8), Scalar::from(5u8), Scalar::from(6u8)];
        assert_eq!(inner_product(&a, &b).unwrap(), Scalar::from(32u8));
        assert!(matches!(inner_product(&a, &b[..2]), Err(ProofError::LengthMismatch(_))));
    }

    #[test]
    fn test_delta_matches_definition() {
        let mut rng = thread_rng();
        let (y, z) = (Scalar::random_wide(&mut rng), Scalar::random_wide(&mut rng));
        let (n, m) = (8, 4);
        let y_powers = powers(&y, n * m);
        let two_powers = powers(&Scalar::from(2u8), n);
        // <1, y^nm> (z - z^2) - sum_j z^(j+3) <1, 2^n>
        let mut expected = Scalar::ZERO;
        for i in 0..n * m {
            expected += (z - z * z) * y_powers[i];
        }
        for j in 0..m {
            let z_j3 = powers(&z, j + 4)[j + 3];
            for two_k in &two_powers {
                expected -= z_j3 * two_k;
            }
        }
        assert_eq!(delta(&y, &z, n, m), expected);
    }
}
