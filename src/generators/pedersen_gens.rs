// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause
//   Modified from:
//     Copyright (c) 2018 Chain, Inc.
//     SPDX-License-Identifier: MIT

use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};

use crate::{errors::ProofError, protocols::ristretto_point_protocol::RistrettoPointProtocol};

/// Number of generators in a Pedersen generator set
pub const PEDERSEN_CAPACITY: usize = 5;
/// Slot of the committed value; always the `ristretto255` basepoint
pub const VALUE_INDEX: usize = 0;
/// Slot for a private key opening
pub const PRIVATE_KEY_INDEX: usize = 1;
/// Slot for a serial number derivation opening
pub const SND_INDEX: usize = 2;
/// Slot for a shard identifier opening
pub const SHARD_ID_INDEX: usize = 3;
/// Slot of the blinding factor
pub const RANDOMNESS_INDEX: usize = 4;

/// Domain string of the default generator set
pub const DEFAULT_PEDERSEN_DOMAIN: &[u8] = b"PedersenGens";

lazy_static! {
    static ref DEFAULT_PEDERSEN_GENS: PedersenGens = PedersenGens::with_domain(DEFAULT_PEDERSEN_DOMAIN);
}

/// An ordered set of independent generators for Pedersen commitments.
///
/// The generator at [`VALUE_INDEX`] is the `ristretto255` basepoint. Every other generator is the SHA3-512
/// hash-to-group of the compressed basepoint, a domain string and its index, so no discrete log relation between any
/// two of them is known.
///
/// A range proof commitment is `v * G[VALUE_INDEX] + r * G[RANDOMNESS_INDEX]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PedersenGens {
    gens: [RistrettoPoint; PEDERSEN_CAPACITY],
    gens_compressed: [CompressedRistretto; PEDERSEN_CAPACITY],
}

impl PedersenGens {
    /// Derive a generator set from a domain string. Different domains give unrelated sets.
    pub fn with_domain(domain: &[u8]) -> Self {
        let mut gens = [RISTRETTO_BASEPOINT_POINT; PEDERSEN_CAPACITY];
        for (i, item) in gens.iter_mut().enumerate().skip(1) {
            *item = RistrettoPoint::hash_to_point_from_index(i as u64, domain);
        }
        let gens_compressed = gens.map(|p| p.compress());
        Self { gens, gens_compressed }
    }

    /// All generators in slot order
    pub fn generators(&self) -> &[RistrettoPoint; PEDERSEN_CAPACITY] {
        &self.gens
    }

    /// The generator at `index`
    pub fn generator(&self, index: usize) -> Result<RistrettoPoint, ProofError> {
        self.gens.get(index).copied().ok_or_else(|| {
            ProofError::InvalidArgument(format!(
                "Generator index {} out of range, capacity is {}",
                index, PEDERSEN_CAPACITY
            ))
        })
    }

    /// Base for the committed value
    pub fn value_base(&self) -> RistrettoPoint {
        self.gens[VALUE_INDEX]
    }

    /// Base for the blinding factor
    pub fn blinding_base(&self) -> RistrettoPoint {
        self.gens[RANDOMNESS_INDEX]
    }

    /// Compressed base for the committed value
    pub fn value_base_compressed(&self) -> CompressedRistretto {
        self.gens_compressed[VALUE_INDEX]
    }

    /// Compressed base for the blinding factor
    pub fn blinding_base_compressed(&self) -> CompressedRistretto {
        self.gens_compressed[RANDOMNESS_INDEX]
    }

    /// Commit to a full opening vector, one scalar per generator slot
    pub fn commit_all(&self, openings: &[Scalar]) -> Result<RistrettoPoint, ProofError> {
        if openings.len() != PEDERSEN_CAPACITY {
            return Err(ProofError::LengthMismatch(format!(
                "Expected {} openings, got {}",
                PEDERSEN_CAPACITY,
                openings.len()
            )));
        }
        RistrettoPoint::multiscalar_mul_checked(openings, &self.gens)
    }

    /// Commit to `value` at slot `index`, blinded by `blinding` at the randomness slot
    pub fn commit_at_index(&self, value: &Scalar, blinding: &Scalar, index: usize) -> Result<RistrettoPoint, ProofError> {
        let base = self.generator(index)?;
        Ok(RistrettoPoint::add_pedersen(
            value,
            &base,
            blinding,
            &self.gens[RANDOMNESS_INDEX],
        ))
    }

    /// Creates a Pedersen commitment to a value with a blinding factor, as used by range proofs
    pub fn commit(&self, value: &Scalar, blinding: &Scalar) -> RistrettoPoint {
        RistrettoPoint::add_pedersen(value, &self.gens[VALUE_INDEX], blinding, &self.gens[RANDOMNESS_INDEX])
    }
}

impl Default for PedersenGens {
    fn default() -> Self {
        DEFAULT_PEDERSEN_GENS.clone()
    }
}

#[cfg(test)]
mod tests {
    use curve25519_dalek::{
        constants::RISTRETTO_BASEPOINT_POINT,
        ristretto::RistrettoPoint,
        scalar::Scalar,
        traits::IsIdentity,
    };
    use rand::thread_rng;

    use super::*;
    use crate::protocols::scalar_protocol::ScalarProtocol;

    #[test]
    fn test_const() {
        let pc_gens = PedersenGens::default();
        assert_eq!(pc_gens.value_base(), RISTRETTO_BASEPOINT_POINT);
        for i in 0..PEDERSEN_CAPACITY {
            assert_eq!(pc_gens.gens[i].compress(), pc_gens.gens_compressed[i]);
            assert!(!pc_gens.gens[i].is_identity());
            for j in 0..i {
                assert_ne!(pc_gens.gens[i], pc_gens.gens[j]);
            }
        }
        assert_eq!(pc_gens, PedersenGens::with_domain(DEFAULT_PEDERSEN_DOMAIN));
        assert_ne!(pc_gens, PedersenGens::with_domain(b"another domain"));
        assert_eq!(
            pc_gens.blinding_base(),
            RistrettoPoint::hash_to_point_from_index(RANDOMNESS_INDEX as u64, DEFAULT_PEDERSEN_DOMAIN)
        );
    }

    #[test]
    fn test_commit_at_index_matches_commit_all() {
        let mut rng = thread_rng();
        let pc_gens = PedersenGens::default();
        let value = Scalar::random_wide(&mut rng);
        let blinding = Scalar::random_wide(&mut rng);
        for index in [VALUE_INDEX, PRIVATE_KEY_INDEX, SND_INDEX, SHARD_ID_INDEX] {
            let mut openings = vec![Scalar::ZERO; PEDERSEN_CAPACITY];
            openings[index] = value;
            openings[RANDOMNESS_INDEX] = blinding;
            assert_eq!(
                pc_gens.commit_at_index(&value, &blinding, index).unwrap(),
                pc_gens.commit_all(&openings).unwrap()
            );
        }
        assert_eq!(
            pc_gens.commit(&value, &blinding),
            pc_gens.commit_at_index(&value, &blinding, VALUE_INDEX).unwrap()
        );
        // Committing at the blinding slot doubles up on the same generator
        assert_eq!(
            pc_gens.commit_at_index(&value, &blinding, RANDOMNESS_INDEX).unwrap(),
            pc_gens.blinding_base() * (value + blinding)
        );
    }

    #[test]
    fn test_commitment_errors() {
        let pc_gens = PedersenGens::default();
        assert!(matches!(
            pc_gens.commit_all(&[Scalar::ONE; 4]),
            Err(ProofError::LengthMismatch(_))
        ));
        assert!(matches!(
            pc_gens.commit_all(&[Scalar::ONE; 6]),
            Err(ProofError::LengthMismatch(_))
        ));
        assert!(matches!(
            pc_gens.commit_at_index(&Scalar::ONE, &Scalar::ONE, PEDERSEN_CAPACITY),
            Err(ProofError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_commitment_is_homomorphic() {
        let mut rng = thread_rng();
        let pc_gens = PedersenGens::default();
        let (v1, r1) = (Scalar::from(40u64), Scalar::random_wide(&mut rng));
        let (v2, r2) = (Scalar::from(2u64), Scalar::random_wide(&mut rng));
        assert_eq!(
            pc_gens.commit(&v1, &r1) + pc_gens.commit(&v2, &r2),
            pc_gens.commit(&Scalar::from(42u64), &(r1 + r2))
        );
        assert!(pc_gens.commit(&Scalar::ZERO, &Scalar::ZERO).is_identity());
    }
}
