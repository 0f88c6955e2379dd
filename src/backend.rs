// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Interchangeable provers behind a byte-in/byte-out contract.
//!
//! Values are `u64`s and blinding factors are canonical 32-byte little-endian scalars. The output is the canonical
//! proof encoding of [`RangeProof::to_bytes`]. Any prover honouring the contract, in process or across a foreign
//! function boundary, produces proofs the native verifier accepts.

use std::{fmt, sync::Arc};

use curve25519_dalek::scalar::Scalar;
use log::debug;

use crate::{
    commitment_opening::CommitmentOpening,
    errors::ProofError,
    range_parameters::RangeParameters,
    range_proof::RangeProof,
    range_witness::RangeWitness,
    traits::FixedBytesRepr,
};

/// A byte-boundary prover, such as a wrapper around a foreign accelerator
pub type BoundaryProver = Arc<dyn Fn(&[u64], &[[u8; 32]]) -> Result<Vec<u8>, ProofError> + Send + Sync>;

/// Proves and verifies aggregated range proofs in their canonical byte encoding
pub trait RangeProofBackend: Send + Sync {
    /// Prove that every value fits the configured bit length
    fn prove(&self, values: &[u64], blindings: &[[u8; 32]]) -> Result<Vec<u8>, ProofError>;

    /// Verify an encoded proof
    fn verify(&self, proof_bytes: &[u8]) -> Result<bool, ProofError>;
}

/// Native implementation of the byte-boundary prove contract
pub fn prove_raw(params: &RangeParameters, values: &[u64], blindings: &[[u8; 32]]) -> Result<Vec<u8>, ProofError> {
    let blindings = blindings
        .iter()
        .map(Scalar::from_fixed_bytes)
        .collect::<Result<Vec<Scalar>, ProofError>>()?;
    let witness = RangeWitness::set(values, &blindings, params)?;
    Ok(RangeProof::prove(params, witness)?.to_bytes())
}

fn verify_native(params: &RangeParameters, proof_bytes: &[u8]) -> Result<bool, ProofError> {
    RangeProof::from_bytes(proof_bytes)?.verify_faster(params)
}

/// The in-process prover and verifier
#[derive(Clone, Debug)]
pub struct NativeBackend {
    params: RangeParameters,
}

impl NativeBackend {
    /// Construct a native backend for `params`
    pub fn new(params: RangeParameters) -> Self {
        Self { params }
    }
}

impl RangeProofBackend for NativeBackend {
    fn prove(&self, values: &[u64], blindings: &[[u8; 32]]) -> Result<Vec<u8>, ProofError> {
        prove_raw(&self.params, values, blindings)
    }

    fn verify(&self, proof_bytes: &[u8]) -> Result<bool, ProofError> {
        verify_native(&self.params, proof_bytes)
    }
}

/// Forwards proving to a [`BoundaryProver`]; verification stays native
#[derive(Clone)]
pub struct BoundaryBackend {
    params: RangeParameters,
    prover: BoundaryProver,
}

impl BoundaryBackend {
    /// Construct a boundary backend for `params`
    pub fn new(params: RangeParameters, prover: BoundaryProver) -> Self {
        Self { params, prover }
    }
}

impl fmt::Debug for BoundaryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryBackend")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl RangeProofBackend for BoundaryBackend {
    fn prove(&self, values: &[u64], blindings: &[[u8; 32]]) -> Result<Vec<u8>, ProofError> {
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
            .map(|(value, blinding)| Scalar::from_fixed_bytes(blinding).map(|r| CommitmentOpening::new(*value, r)))
            .collect::<Result<Vec<CommitmentOpening>, ProofError>>()?;

        let proof_bytes = (self.prover)(values, blindings)?;
        // Whatever crosses the boundary must decode canonically and commit to exactly the given openings
        let proof = RangeProof::from_bytes(&proof_bytes)?;
        if proof.commitments().len() != values.len() {
            return Err(ProofError::InvalidEncoding(format!(
                "Boundary prover returned {} commitments for {} values",
                proof.commitments().len(),
                values.len()
            )));
        }
        for (index, (opening, commitment)) in openings.iter().zip(proof.commitments()).enumerate() {
            if !opening.opens(commitment, self.params.pc_gens()) {
                return Err(ProofError::InvalidEncoding(format!(
                    "Boundary prover commitment {} does not open to the given value and blinding factor",
                    index
                )));
            }
        }
        if !proof.verify_faster(&self.params)? {
            return Err(ProofError::VerificationFailed(
                "Boundary prover returned a proof the native verifier rejects".to_string(),
            ));
        }
        debug!(target: "aggregated_bulletproofs", "Boundary prover produced {} bytes", proof_bytes.len());
        Ok(proof_bytes)
    }

    fn verify(&self, proof_bytes: &[u8]) -> Result<bool, ProofError> {
        verify_native(&self.params, proof_bytes)
    }
}

/// Selects the prover implementation
#[derive(Clone, Default)]
pub enum BackendConfig {
    /// The in-process prover
    #[default]
    Native,
    /// A byte-boundary prover
    Boundary(BoundaryProver),
}

impl BackendConfig {
    /// Construct the configured backend
    pub fn build(self, params: RangeParameters) -> Box<dyn RangeProofBackend> {
        match self {
            BackendConfig::Native => Box::new(NativeBackend::new(params)),
            BackendConfig::Boundary(prover) => Box::new(BoundaryBackend::new(params, prover)),
        }
    }
}
