// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! `RistrettoPointProtocol` trait for using a RistrettoPoint

use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_COMPRESSED,
    ristretto::RistrettoPoint,
    scalar::Scalar,
    traits::{MultiscalarMul, VartimeMultiscalarMul},
};
use digest::Digest;
use sha3::Sha3_512;

use crate::{errors::ProofError, traits::FixedBytesRepr};

/// Defines a `RistrettoPointProtocol` trait for using a RistrettoPoint
pub trait RistrettoPointProtocol: Sized {
    /// Helper function to implement 'RistrettoPoint::hash_from_bytes::<Sha3_512>'
    fn hash_from_bytes_sha3_512(input: &[u8]) -> RistrettoPoint;

    /// Helper function to implement 'RistrettoPoint::from_hash::<Sha3_512>'
    fn from_hash_sha3_512(hasher: Sha3_512) -> RistrettoPoint;

    /// Derive an independent generator from the compressed basepoint, a domain string and an index
    fn hash_to_point_from_index(index: u64, domain: &[u8]) -> RistrettoPoint;

    /// `scalar * B` for the group basepoint, using the precomputed table
    fn scalar_mult_base(scalar: &Scalar) -> RistrettoPoint;

    /// `a * p + b * q`, in constant time
    fn add_pedersen(a: &Scalar, p: &RistrettoPoint, b: &Scalar, q: &RistrettoPoint) -> RistrettoPoint;

    /// Constant-time multiscalar multiplication; use when any scalar is secret
    fn multiscalar_mul_checked(scalars: &[Scalar], points: &[RistrettoPoint]) -> Result<RistrettoPoint, ProofError>;

    /// Variable-time multiscalar multiplication; only use when every scalar is public
    fn vartime_multiscalar_mul_checked(
        scalars: &[Scalar],
        points: &[RistrettoPoint],
    ) -> Result<RistrettoPoint, ProofError>;

    /// Decode a canonical 32-byte encoding
    fn from_canonical_slice(bytes: &[u8]) -> Result<RistrettoPoint, ProofError>;

    /// Helper function to multiply a point vector with a scalar vector
    fn mul_point_vec_with_scalar(
        point_vec: &[RistrettoPoint],
        scalar: &Scalar,
    ) -> Result<Vec<RistrettoPoint>, ProofError>;

    /// Helper function to add two point vectors
    fn add_point_vectors(a: &[RistrettoPoint], b: &[RistrettoPoint]) -> Result<Vec<RistrettoPoint>, ProofError>;
}

fn check_msm_lengths(scalars: &[Scalar], points: &[RistrettoPoint]) -> Result<(), ProofError> {
    if scalars.len() == points.len() {
        Ok(())
    } else {
        Err(ProofError::LengthMismatch(format!(
            "Multiscalar multiplication with {} scalars and {} points",
            scalars.len(),
            points.len()
        )))
    }
}

impl RistrettoPointProtocol for RistrettoPoint {
    fn hash_from_bytes_sha3_512(input: &[u8]) -> RistrettoPoint {
        let mut hasher = Sha3_512::default();
        hasher.update(input);
        Self::from_hash_sha3_512(hasher)
    }

    fn from_hash_sha3_512(hasher: Sha3_512) -> RistrettoPoint {
        let output = hasher.finalize();
        let mut output_bytes = [0u8; 64];
        output_bytes.copy_from_slice(output.as_slice());

        RistrettoPoint::from_uniform_bytes(&output_bytes)
    }

    fn hash_to_point_from_index(index: u64, domain: &[u8]) -> RistrettoPoint {
        let mut hasher = Sha3_512::default();
        hasher.update(RISTRETTO_BASEPOINT_COMPRESSED.as_bytes());
        hasher.update(domain);
        hasher.update(index.to_le_bytes());
        Self::from_hash_sha3_512(hasher)
    }

    fn scalar_mult_base(scalar: &Scalar) -> RistrettoPoint {
        RistrettoPoint::mul_base(scalar)
    }

    fn add_pedersen(a: &Scalar, p: &RistrettoPoint, b: &Scalar, q: &RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint::multiscalar_mul([a, b], [p, q])
    }

    fn multiscalar_mul_checked(scalars: &[Scalar], points: &[RistrettoPoint]) -> Result<RistrettoPoint, ProofError> {
        check_msm_lengths(scalars, points)?;
        Ok(RistrettoPoint::multiscalar_mul(scalars, points))
    }

    fn vartime_multiscalar_mul_checked(
        scalars: &[Scalar],
        points: &[RistrettoPoint],
    ) -> Result<RistrettoPoint, ProofError> {
        check_msm_lengths(scalars, points)?;
        Ok(RistrettoPoint::vartime_multiscalar_mul(scalars, points))
    }

    fn from_canonical_slice(bytes: &[u8]) -> Result<RistrettoPoint, ProofError> {
        let bytes: &[u8; 32] = bytes
            .try_into()
            .map_err(|_| ProofError::InvalidEncoding(format!("point must be 32 bytes, got {}", bytes.len())))?;
        RistrettoPoint::from_fixed_bytes(bytes)
    }

    fn mul_point_vec_with_scalar(
        point_vec: &[RistrettoPoint],
        scalar: &Scalar,
    ) -> Result<Vec<RistrettoPoint>, ProofError> {
        if point_vec.is_empty() {
            return Err(ProofError::InvalidArgument(
                "Cannot multiply empty point vector with scalar".to_string(),
            ));
        }
        Ok(point_vec.iter().map(|p| p * scalar).collect())
    }

    fn add_point_vectors(a: &[RistrettoPoint], b: &[RistrettoPoint]) -> Result<Vec<RistrettoPoint>, ProofError> {
        if a.is_empty() {
            return Err(ProofError::InvalidArgument("Cannot add empty point vectors".to_string()));
        }
        if a.len() != b.len() {
            return Err(ProofError::LengthMismatch(format!(
                "Cannot add point vectors of lengths {} and {}",
                a.len(),
                b.len()
            )));
        }
        Ok(a.iter().zip(b).map(|(p, q)| p + q).collect())
    }
}
