//  Copyright 2022 The Tari Project
//  SPDX-License-Identifier: BSD-3-Clause

use core::mem::size_of;

use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use merlin::{Transcript, TranscriptRng};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::{
    errors::ProofError,
    protocols::transcript_protocol::TranscriptProtocol,
    range_parameters::RangeParameters,
    range_witness::RangeWitness,
};

/// A wrapper around a Merlin transcript, fixing the message order of the aggregated range proof
pub(crate) struct RangeProofTranscript {
    transcript: Transcript,
}

impl RangeProofTranscript {
    // Initialize a transcript with the parameters and the statement
    pub(crate) fn new(
        params: &RangeParameters,
        padded_size: usize,
        commitments: &[CompressedRistretto],
    ) -> Result<Self, ProofError> {
        let mut transcript = Transcript::new(params.transcript_label().as_bytes());
        transcript.domain_separator(b"Bulletproofs", b"Aggregated Range Proof");
        transcript.validate_and_append_point(b"B", &params.value_base_compressed())?;
        transcript.validate_and_append_point(b"B_blinding", &params.blinding_base_compressed())?;
        transcript.append_u64(b"n", params.bit_length() as u64);
        transcript.append_u64(b"m", padded_size as u64);
        transcript.append_u64(b"count", commitments.len() as u64);
        for item in commitments {
            transcript.append_point(b"V", item);
        }

        Ok(Self { transcript })
    }

    /// Construct the `y` and `z` challenges
    pub(crate) fn challenges_y_z(
        &mut self,
        a: &CompressedRistretto,
        s: &CompressedRistretto,
    ) -> Result<(Scalar, Scalar), ProofError> {
        self.transcript.validate_and_append_point(b"A", a)?;
        self.transcript.validate_and_append_point(b"S", s)?;
        Ok((
            self.transcript.challenge_scalar(b"y")?,
            self.transcript.challenge_scalar(b"z")?,
        ))
    }

    /// Construct the polynomial evaluation challenge `x`
    pub(crate) fn challenge_x(
        &mut self,
        t1: &CompressedRistretto,
        t2: &CompressedRistretto,
    ) -> Result<Scalar, ProofError> {
        self.transcript.validate_and_append_point(b"T_1", t1)?;
        self.transcript.validate_and_append_point(b"T_2", t2)?;
        self.transcript.challenge_scalar(b"x")
    }

    /// Construct the challenge `w` binding the inner product to the polynomial evaluation
    pub(crate) fn challenge_w(&mut self, t_hat: &Scalar, tau_x: &Scalar, mu: &Scalar) -> Result<Scalar, ProofError> {
        self.transcript.append_scalar(b"t_x", t_hat);
        self.transcript.append_scalar(b"t_x_blinding", tau_x);
        self.transcript.append_scalar(b"e_blinding", mu);
        self.transcript.domain_separator(b"Bulletproofs", b"Inner Product Proof");
        self.transcript.challenge_scalar(b"w")
    }

    /// Construct an inner-product round `u` challenge
    pub(crate) fn challenge_round_u(
        &mut self,
        l: &CompressedRistretto,
        r: &CompressedRistretto,
    ) -> Result<Scalar, ProofError> {
        self.transcript.validate_and_append_point(b"L", l)?;
        self.transcript.validate_and_append_point(b"R", r)?;
        self.transcript.challenge_scalar(b"u")
    }

    /// Construct a random number generator from the current transcript state
    pub(crate) fn build_rng<R: CryptoRngCore>(&self, witness: &RangeWitness, rng: &mut R) -> TranscriptRng {
        // Produce a (non-canonical) byte representation of the witness
        let size = witness.openings.len() * (size_of::<u64>() + size_of::<Scalar>());
        let mut witness_bytes = Zeroizing::new(Vec::<u8>::with_capacity(size));
        for opening in &witness.openings {
            witness_bytes.extend(opening.v.to_le_bytes());
            witness_bytes.extend(opening.r.as_bytes());
        }

        self.transcript
            .build_rng()
            .rekey_with_witness_bytes(b"witness", &witness_bytes)
            .finalize(rng)
    }
}
