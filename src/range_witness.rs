// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

#![deny(missing_docs)]

//! Commitment openings for the aggregated case

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{commitment_opening::CommitmentOpening, errors::ProofError, range_parameters::RangeParameters};

/// The validated secret input of an aggregated range proof: one opening per committed value, in order
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RangeWitness {
    pub(crate) openings: Vec<CommitmentOpening>,
}

impl RangeWitness {
    /// Construct a witness from values and their blinding factors, checking them against `params`
    pub fn set(values: &[u64], blindings: &[Scalar], params: &RangeParameters) -> Result<Self, ProofError> {
        if values.len() != blindings.len() {
            return Err(ProofError::LengthMismatch(format!(
                "{} values but {} blinding factors",
                values.len(),
                blindings.len()
            )));
        }
        let openings = values
            .iter()
            .zip(blindings)
            .map(|(v, r)| CommitmentOpening::new(*v, *r))
            .collect();
        Self::init(openings, params)
    }

    /// Construct a witness from openings, checking them against `params`
    pub fn init(openings: Vec<CommitmentOpening>, params: &RangeParameters) -> Result<Self, ProofError> {
        if openings.is_empty() {
            return Err(ProofError::InvalidArgument("A witness needs at least one value".to_string()));
        }
        if openings.len() > params.aggregation_capacity() {
            return Err(ProofError::InvalidArgument(format!(
                "{} values exceed the aggregation capacity of {}",
                openings.len(),
                params.aggregation_capacity()
            )));
        }
        let bit_length = params.bit_length();
        if bit_length < 64 {
            if let Some(position) = openings.iter().position(|o| o.v >> bit_length != 0) {
                return Err(ProofError::RangeViolation(format!(
                    "Value at position {} does not fit in {} bits",
                    position, bit_length
                )));
            }
        }
        Ok(Self { openings })
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.openings.len()
    }

    /// Always false for a validated witness
    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    /// The commitments this witness opens, in order
    pub fn commitments(&self, params: &RangeParameters) -> Vec<RistrettoPoint> {
        self.openings
            .iter()
            .map(|o| params.pc_gens().commit(&Scalar::from(o.v), &o.r))
            .collect()
    }
}
