// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! `ScalarProtocol` trait for using a Scalar

use std::cmp::Ordering;

use curve25519_dalek::scalar::Scalar;
use digest::Digest;
use rand_core::CryptoRngCore;
use sha3::Sha3_512;

use crate::{errors::ProofError, traits::FixedBytesRepr};

/// Defines a `ScalarProtocol` trait for using a Scalar
pub trait ScalarProtocol: Sized {
    /// Returns a uniformly random Scalar, sampled as 64 bytes and reduced
    fn random_wide<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Scalar;

    /// Returns a non-zero random Scalar
    fn random_not_zero<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Scalar;

    /// Deterministically hash arbitrary bytes to a Scalar
    fn hash_to_scalar(input: &[u8]) -> Scalar;

    /// Construct a scalar from an existing Sha3_512 instance
    fn from_hasher_sha3_512(hasher: Sha3_512) -> Scalar;

    /// Decode a canonical 32-byte little-endian encoding
    fn from_canonical_slice(bytes: &[u8]) -> Result<Scalar, ProofError>;

    /// Returns `a * b + c`
    fn mul_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar;

    /// Sets `self` to `self + a * b`
    fn mul_add_assign(&mut self, a: &Scalar, b: &Scalar);

    /// Multiplicative inverse, failing for zero
    fn invert_checked(&self) -> Result<Scalar, ProofError>;

    /// The value as a `u64`, if it fits
    fn to_u64(&self) -> Option<u64>;

    /// Total order on the canonical integer values. Not constant time; only use on public scalars.
    fn compare_vartime(&self, other: &Scalar) -> Ordering;

    /// Returns true if any two scalars in the slice are equal. Not constant time.
    fn has_duplicates(scalars: &[Scalar]) -> bool;

    /// Helper function to multiply one scalar vector with another scalar vector
    fn mul_scalar_vec_with_scalar(scalar_vec: &[Scalar], scalar: &Scalar) -> Result<Vec<Scalar>, ProofError>;

    /// Helper function to add two scalar vectors
    fn add_scalar_vectors(a: &[Scalar], b: &[Scalar]) -> Result<Vec<Scalar>, ProofError>;
}

impl ScalarProtocol for Scalar {
    fn random_wide<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Scalar {
        let mut bytes = [0u8; 64];
        rng.fill_bytes(&mut bytes);
        Scalar::from_bytes_mod_order_wide(&bytes)
    }

    // A uniform sample is zero with negligible probability, but the callers rely on it never happening
    fn random_not_zero<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Scalar {
        loop {
            let value = Scalar::random_wide(rng);
            if value != Scalar::ZERO {
                return value;
            }
        }
    }

    fn hash_to_scalar(input: &[u8]) -> Scalar {
        let mut hasher = Sha3_512::default();
        hasher.update(input);
        Self::from_hasher_sha3_512(hasher)
    }

    fn from_hasher_sha3_512(hasher: Sha3_512) -> Scalar {
        let mut output = [0u8; 64];
        output.copy_from_slice(hasher.finalize().as_slice());
        Scalar::from_bytes_mod_order_wide(&output)
    }

    fn from_canonical_slice(bytes: &[u8]) -> Result<Scalar, ProofError> {
        let bytes: &[u8; 32] = bytes
            .try_into()
            .map_err(|_| ProofError::InvalidEncoding(format!("scalar must be 32 bytes, got {}", bytes.len())))?;
        Scalar::from_fixed_bytes(bytes)
    }

    fn mul_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        a * b + c
    }

    fn mul_add_assign(&mut self, a: &Scalar, b: &Scalar) {
        *self += a * b;
    }

    fn invert_checked(&self) -> Result<Scalar, ProofError> {
        if *self == Scalar::ZERO {
            Err(ProofError::InvalidArgument("Cannot invert a zero valued Scalar".to_string()))
        } else {
            Ok(self.invert())
        }
    }

    fn to_u64(&self) -> Option<u64> {
        let bytes = self.as_bytes();
        if bytes[8..].iter().any(|b| *b != 0) {
            return None;
        }
        let mut low = [0u8; 8];
        low.copy_from_slice(&bytes[..8]);
        Some(u64::from_le_bytes(low))
    }

    fn compare_vartime(&self, other: &Scalar) -> Ordering {
        // Little-endian, so compare from the most significant byte down
        self.as_bytes().iter().rev().cmp(other.as_bytes().iter().rev())
    }

    fn has_duplicates(scalars: &[Scalar]) -> bool {
        let mut sorted = scalars.to_vec();
        sorted.sort_unstable_by(|a, b| a.compare_vartime(b));
        sorted.windows(2).any(|pair| pair[0] == pair[1])
    }

    fn mul_scalar_vec_with_scalar(scalar_vec: &[Scalar], scalar: &Scalar) -> Result<Vec<Scalar>, ProofError> {
        if scalar_vec.is_empty() {
            return Err(ProofError::InvalidArgument(
                "Cannot multiply empty scalar vector with scalar".to_string(),
            ));
        }
        Ok(scalar_vec.iter().map(|s| s * scalar).collect())
    }

    fn add_scalar_vectors(a: &[Scalar], b: &[Scalar]) -> Result<Vec<Scalar>, ProofError> {
        if a.is_empty() {
            return Err(ProofError::InvalidArgument("Cannot add empty scalar vectors".to_string()));
        }
        if a.len() != b.len() {
            return Err(ProofError::LengthMismatch(format!(
                "Cannot add scalar vectors of lengths {} and {}",
                a.len(),
                b.len()
            )));
        }
        Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
    }
}
