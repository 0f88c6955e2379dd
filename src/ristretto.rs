// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! # Ristretto encodings
//!
//! Canonical byte and text representations of the `ristretto255` scalars and points used throughout the crate.

use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};

use crate::{
    errors::ProofError,
    traits::{FixedBytesRepr, HexRepr},
};

impl FixedBytesRepr for Scalar {
    fn to_fixed_bytes(&self) -> [u8; 32] {
        self.to_bytes()
    }

    fn from_fixed_bytes(bytes: &[u8; 32]) -> Result<Self, ProofError> {
        Option::from(Scalar::from_canonical_bytes(*bytes))
            .ok_or_else(|| ProofError::InvalidEncoding("scalar is not canonically reduced".to_string()))
    }
}

impl FixedBytesRepr for CompressedRistretto {
    fn to_fixed_bytes(&self) -> [u8; 32] {
        self.to_bytes()
    }

    // Only canonical encodings of valid group elements are accepted
    fn from_fixed_bytes(bytes: &[u8; 32]) -> Result<Self, ProofError> {
        let compressed = CompressedRistretto(*bytes);
        match compressed.decompress() {
            Some(_) => Ok(compressed),
            None => Err(ProofError::InvalidEncoding(
                "bytes are not the canonical encoding of a point".to_string(),
            )),
        }
    }
}

impl FixedBytesRepr for RistrettoPoint {
    fn to_fixed_bytes(&self) -> [u8; 32] {
        self.compress().to_bytes()
    }

    fn from_fixed_bytes(bytes: &[u8; 32]) -> Result<Self, ProofError> {
        CompressedRistretto(*bytes).decompress().ok_or_else(|| {
            ProofError::InvalidEncoding("bytes are not the canonical encoding of a point".to_string())
        })
    }
}

impl HexRepr for Scalar {}

impl HexRepr for CompressedRistretto {}

impl HexRepr for RistrettoPoint {}
