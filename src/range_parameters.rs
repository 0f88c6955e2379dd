// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Range proof parameters: bit length, aggregation capacity, generators and transcript label

use std::sync::Arc;

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};

use crate::{
    errors::ProofError,
    generators::{BulletproofGens, PedersenGens},
};

/// The largest supported bit length
pub const MAX_BIT_LENGTH: usize = 64;
/// The largest supported number of values in one aggregated proof
pub const MAX_AGGREGATION_CAPACITY: usize = 128;
/// Bit length of the default parameters
pub const DEFAULT_BIT_LENGTH: usize = 64;
/// Aggregation capacity of the default parameters
pub const DEFAULT_AGGREGATION_CAPACITY: usize = 32;
/// Transcript label of the default parameters
pub const DEFAULT_TRANSCRIPT_LABEL: &str = "AggregatedRangeProof";

lazy_static! {
    static ref DEFAULT_PARAMETERS: RangeParameters = RangeParameters {
        bit_length: DEFAULT_BIT_LENGTH,
        aggregation_capacity: DEFAULT_AGGREGATION_CAPACITY,
        bp_gens: Arc::new(BulletproofGens::new(DEFAULT_BIT_LENGTH, DEFAULT_AGGREGATION_CAPACITY)),
        pc_gens: PedersenGens::default(),
        transcript_label: DEFAULT_TRANSCRIPT_LABEL,
    };
}

/// Contains all the generators and settings needed to prove and verify aggregated range proofs
#[derive(Clone, Debug)]
pub struct RangeParameters {
    bit_length: usize,
    aggregation_capacity: usize,
    /// Generators needed for aggregating up to `aggregation_capacity` proofs of `bit_length` bits each
    bp_gens: Arc<BulletproofGens>,
    /// The generator set for Pedersen commitments
    pc_gens: PedersenGens,
    transcript_label: &'static str,
}

impl RangeParameters {
    /// Initialize range parameters with sanity checks
    pub fn init(bit_length: usize, aggregation_capacity: usize, pc_gens: PedersenGens) -> Result<Self, ProofError> {
        if !bit_length.is_power_of_two() || bit_length > MAX_BIT_LENGTH {
            return Err(ProofError::InvalidArgument(format!(
                "Bit length must be a power of two and <= {}",
                MAX_BIT_LENGTH
            )));
        }
        if !aggregation_capacity.is_power_of_two() || aggregation_capacity > MAX_AGGREGATION_CAPACITY {
            return Err(ProofError::InvalidArgument(format!(
                "Aggregation capacity must be a power of two and <= {}",
                MAX_AGGREGATION_CAPACITY
            )));
        }

        Ok(Self {
            bit_length,
            aggregation_capacity,
            bp_gens: Arc::new(BulletproofGens::new(bit_length, aggregation_capacity)),
            pc_gens,
            transcript_label: DEFAULT_TRANSCRIPT_LABEL,
        })
    }

    /// Use a different transcript label; provers and verifiers must agree on it
    pub fn with_transcript_label(mut self, transcript_label: &'static str) -> Self {
        self.transcript_label = transcript_label;
        self
    }

    /// Process-wide parameters for 64-bit values and up to 32 values per proof
    pub fn default_parameters() -> &'static RangeParameters {
        &DEFAULT_PARAMETERS
    }

    pub fn bp_gens(&self) -> &BulletproofGens {
        &self.bp_gens
    }

    pub fn pc_gens(&self) -> &PedersenGens {
        &self.pc_gens
    }

    pub fn aggregation_capacity(&self) -> usize {
        self.aggregation_capacity
    }

    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    pub fn transcript_label(&self) -> &'static str {
        self.transcript_label
    }

    /// Base for the committed value
    pub fn value_base(&self) -> RistrettoPoint {
        self.pc_gens.value_base()
    }

    /// Base for the blinding factor
    pub fn blinding_base(&self) -> RistrettoPoint {
        self.pc_gens.blinding_base()
    }

    pub fn value_base_compressed(&self) -> CompressedRistretto {
        self.pc_gens.value_base_compressed()
    }

    pub fn blinding_base_compressed(&self) -> CompressedRistretto {
        self.pc_gens.blinding_base_compressed()
    }

    /// The first `bit_length * parties` \\(\mathbf G\\) generators
    pub fn gi_base(&self, parties: usize) -> Vec<RistrettoPoint> {
        self.bp_gens.g_iter(self.bit_length, parties).copied().collect()
    }

    /// The first `bit_length * parties` \\(\mathbf H\\) generators
    pub fn hi_base(&self, parties: usize) -> Vec<RistrettoPoint> {
        self.bp_gens.h_iter(self.bit_length, parties).copied().collect()
    }
}

impl Default for RangeParameters {
    fn default() -> Self {
        DEFAULT_PARAMETERS.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_validation() {
        assert!(RangeParameters::init(64, 32, PedersenGens::default()).is_ok());
        assert!(RangeParameters::init(1, 1, PedersenGens::default()).is_ok());
        for (bit_length, capacity) in [(0, 1), (3, 1), (128, 1), (8, 0), (8, 3), (8, 256)] {
            assert!(
                matches!(
                    RangeParameters::init(bit_length, capacity, PedersenGens::default()),
                    Err(ProofError::InvalidArgument(_))
                ),
                "({}, {})",
                bit_length,
                capacity
            );
        }
    }

    #[test]
    fn test_default_parameters() {
        let params = RangeParameters::default_parameters();
        assert_eq!(params.bit_length(), 64);
        assert_eq!(params.aggregation_capacity(), 32);
        assert_eq!(params.gi_base(2).len(), 128);
        assert_eq!(params.hi_base(32).len(), 64 * 32);
        assert_eq!(params.transcript_label(), DEFAULT_TRANSCRIPT_LABEL);
        assert_eq!(params.value_base(), PedersenGens::default().value_base());
    }

    #[test]
    fn test_smaller_parameters_share_generators() {
        let small = RangeParameters::init(64, 4, PedersenGens::default()).unwrap();
        assert_eq!(small.gi_base(4), RangeParameters::default_parameters().gi_base(4));
        assert_eq!(small.hi_base(1), RangeParameters::default_parameters().hi_base(1));
    }
}
