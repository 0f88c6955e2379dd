// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Commitment opening struct

use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::generators::PedersenGens;

/// The secret opening `(v, r)` of a range proof commitment `v * G[0] + r * G[4]`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CommitmentOpening {
    pub(crate) v: u64,
    pub(crate) r: Scalar,
}

impl CommitmentOpening {
    /// Construct a new commitment opening
    pub fn new(v: u64, r: Scalar) -> Self {
        Self { v, r }
    }

    /// The committed value
    pub fn value(&self) -> u64 {
        self.v
    }

    /// The blinding factor
    pub fn blinding(&self) -> &Scalar {
        &self.r
    }

    /// Whether this opening opens `commitment`, compared in constant time
    pub fn opens(&self, commitment: &CompressedRistretto, pc_gens: &PedersenGens) -> bool {
        let expected = pc_gens.commit(&Scalar::from(self.v), &self.r).compress();
        expected.ct_eq(commitment).into()
    }
}

#[cfg(test)]
mod tests {
    use curve25519_dalek::scalar::Scalar;

    use super::CommitmentOpening;
    use crate::generators::PedersenGens;

    #[test]
    fn test_opens() {
        let pc_gens = PedersenGens::default();
        let opening = CommitmentOpening::new(42, Scalar::from(7u8));
        let commitment = pc_gens.commit(&Scalar::from(42u8), &Scalar::from(7u8)).compress();
        assert!(opening.opens(&commitment, &pc_gens));
        assert!(!CommitmentOpening::new(43, Scalar::from(7u8)).opens(&commitment, &pc_gens));
        assert!(!CommitmentOpening::new(42, Scalar::from(8u8)).opens(&commitment, &pc_gens));
    }
}
