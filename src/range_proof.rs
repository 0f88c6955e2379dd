// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Aggregated range proof: creation, verification and canonical serialization

use std::fmt;

use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::IsIdentity,
};
use log::{debug, trace};
use rand::thread_rng;
use rand_core::CryptoRngCore;
use serde::{
    de::{self, Visitor},
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use zeroize::{Zeroize, Zeroizing};

use crate::{
    errors::ProofError,
    inner_product_round::{InnerProductProof, InnerProductRound, VerificationScalars, MAX_ROUNDS},
    protocols::{ristretto_point_protocol::RistrettoPointProtocol, scalar_protocol::ScalarProtocol},
    range_parameters::{RangeParameters, MAX_BIT_LENGTH},
    range_witness::RangeWitness,
    traits::FixedBytesRepr,
    transcripts::RangeProofTranscript,
    utils::generic::{bit_vector_of_scalars, delta, inner_product, powers},
};

/// Size of one encoded scalar or point
const ENCODED_SIZE: usize = 32;
/// `A, S, T1, T2, t_hat, tau_x, mu, a, b`
const FIXED_ELEMENTS: usize = 9;

/// A proof that every committed value lies in `[0, 2^n)`, for up to the aggregation capacity of values
#[derive(Clone, PartialEq, Eq)]
pub struct RangeProof {
    commitments: Vec<CompressedRistretto>,
    a: CompressedRistretto,
    s: CompressedRistretto,
    t1: CompressedRistretto,
    t2: CompressedRistretto,
    t_hat: Scalar,
    tau_x: Scalar,
    mu: Scalar,
    ipp: InnerProductProof,
}

/// Transcript challenges recomputed by a verifier
struct Challenges {
    y: Scalar,
    z: Scalar,
    x: Scalar,
    w: Scalar,
    ipp: VerificationScalars,
}

/// Running coefficients of a single multiscalar multiplication that checks one or more proofs
struct BatchAccumulator {
    b_base_scalar: Scalar,
    b_blinding_scalar: Scalar,
    gi_base_scalars: Vec<Scalar>,
    hi_base_scalars: Vec<Scalar>,
    scalars: Vec<Scalar>,
    points: Vec<RistrettoPoint>,
}

impl BatchAccumulator {
    fn new(max_nm: usize) -> Self {
        Self {
            b_base_scalar: Scalar::ZERO,
            b_blinding_scalar: Scalar::ZERO,
            gi_base_scalars: vec![Scalar::ZERO; max_nm],
            hi_base_scalars: vec![Scalar::ZERO; max_nm],
            scalars: Vec::new(),
            points: Vec::new(),
        }
    }

    // The batch holds iff the weighted sum of all checks is the identity
    fn verify(mut self, params: &RangeParameters) -> Result<(), ProofError> {
        let max_m = self.gi_base_scalars.len() / params.bit_length();
        self.scalars.push(self.b_base_scalar);
        self.points.push(params.value_base());
        self.scalars.push(self.b_blinding_scalar);
        self.points.push(params.blinding_base());
        self.scalars.extend(self.gi_base_scalars);
        self.points.extend(params.gi_base(max_m));
        self.scalars.extend(self.hi_base_scalars);
        self.points.extend(params.hi_base(max_m));

        if RistrettoPoint::vartime_multiscalar_mul_checked(&self.scalars, &self.points)?.is_identity() {
            Ok(())
        } else {
            Err(ProofError::VerificationFailed(
                "Range proof batch not valid".to_string(),
            ))
        }
    }
}

// A rejected proof is a `false` result rather than an error
fn verification_result(result: Result<(), ProofError>) -> Result<bool, ProofError> {
    match result {
        Ok(()) => Ok(true),
        Err(ProofError::VerificationFailed(reason)) => {
            debug!(target: "aggregated_bulletproofs", "Range proof rejected: {}", reason);
            Ok(false)
        },
        Err(e) => Err(e),
    }
}

fn decompress(point: &CompressedRistretto, name: &str) -> Result<RistrettoPoint, ProofError> {
    point.decompress().ok_or_else(|| {
        ProofError::InvalidEncoding(format!("Member '{}' was not the canonical encoding of a point", name))
    })
}

impl RangeProof {
    /// The maximum bit length that proofs can be generated for
    pub const MAX_BIT_LENGTH: usize = MAX_BIT_LENGTH;

    /// Create an aggregated range proof for every opening in `witness`, using the thread random number generator
    pub fn prove(params: &RangeParameters, witness: RangeWitness) -> Result<RangeProof, ProofError> {
        Self::prove_with_rng(params, witness, &mut thread_rng())
    }

    /// Create an aggregated range proof for every opening in `witness`.
    ///
    /// The witness is consumed and zeroized. Masks are drawn from a transcript-bound generator seeded by `rng` and the
    /// witness, so a weak `rng` alone does not leak the openings.
    pub fn prove_with_rng<R: CryptoRngCore>(
        params: &RangeParameters,
        witness: RangeWitness,
        rng: &mut R,
    ) -> Result<RangeProof, ProofError> {
        let count = witness.len();
        if count == 0 || count > params.aggregation_capacity() {
            return Err(ProofError::InvalidArgument(format!(
                "Cannot prove {} values with an aggregation capacity of {}",
                count,
                params.aggregation_capacity()
            )));
        }
        let bit_length = params.bit_length();
        let padded_size = count.next_power_of_two();
        let nm = bit_length * padded_size;

        // Global generators
        let (b_base, b_blinding) = (params.value_base(), params.blinding_base());
        let (gi_base, hi_base) = (params.gi_base(padded_size), params.hi_base(padded_size));

        // Padding openings are (0, 0), whose commitments are the identity and are left out of the proof
        let commitments: Vec<CompressedRistretto> = witness
            .commitments(params)
            .iter()
            .map(|c| c.compress())
            .collect();
        let mut transcript = RangeProofTranscript::new(params, padded_size, &commitments)?;
        let mut rng = transcript.build_rng(&witness, rng);

        // Set bit arrays
        let mut a_li = Zeroizing::new(Vec::with_capacity(nm));
        let mut a_ri = Zeroizing::new(Vec::with_capacity(nm));
        for j in 0..padded_size {
            let value = witness.openings.get(j).map_or(0, |o| o.v);
            for bit in bit_vector_of_scalars(value, bit_length)? {
                a_li.push(bit);
                a_ri.push(bit - Scalar::ONE);
            }
        }

        // Compute A and S; the bits and masks are secret
        let alpha = Zeroizing::new(Scalar::random_not_zero(&mut rng));
        let rho = Zeroizing::new(Scalar::random_not_zero(&mut rng));
        let s_li = Zeroizing::new((0..nm).map(|_| Scalar::random_not_zero(&mut rng)).collect::<Vec<_>>());
        let s_ri = Zeroizing::new((0..nm).map(|_| Scalar::random_not_zero(&mut rng)).collect::<Vec<_>>());

        let mut points = Vec::with_capacity(2 * nm + 1);
        points.push(b_blinding);
        points.extend_from_slice(&gi_base);
        points.extend_from_slice(&hi_base);

        let mut scalars = Zeroizing::new(Vec::with_capacity(2 * nm + 1));
        scalars.push(*alpha);
        scalars.extend_from_slice(&a_li);
        scalars.extend_from_slice(&a_ri);
        let a = RistrettoPoint::multiscalar_mul_checked(&scalars, &points)?.compress();

        scalars.zeroize();
        scalars.push(*rho);
        scalars.extend_from_slice(&s_li);
        scalars.extend_from_slice(&s_ri);
        let s = RistrettoPoint::multiscalar_mul_checked(&scalars, &points)?.compress();

        let (y, z) = transcript.challenges_y_z(&a, &s)?;
        let z_square = z * z;
        let y_powers = powers(&y, nm);
        let two_powers = powers(&Scalar::from(2u8), bit_length);
        let z_powers = powers(&z, padded_size);

        // Coefficients of l(X) = l0 + l1 X and r(X) = r0 + r1 X
        let mut l0 = Zeroizing::new(Vec::with_capacity(nm));
        let mut r0 = Zeroizing::new(Vec::with_capacity(nm));
        let mut r1 = Zeroizing::new(Vec::with_capacity(nm));
        for j in 0..padded_size {
            let z_j = z_square * z_powers[j];
            for k in 0..bit_length {
                let i = j * bit_length + k;
                l0.push(a_li[i] - z);
                r0.push(y_powers[i] * (a_ri[i] + z) + z_j * two_powers[k]);
                r1.push(y_powers[i] * s_ri[i]);
            }
        }
        let l1 = &s_li;

        let t1 = Zeroizing::new(inner_product(&l0, &r1)? + inner_product(l1, &r0)?);
        let t2 = Zeroizing::new(inner_product(l1, &r1)?);
        let tau1 = Zeroizing::new(Scalar::random_not_zero(&mut rng));
        let tau2 = Zeroizing::new(Scalar::random_not_zero(&mut rng));
        let t1_point = RistrettoPoint::add_pedersen(&t1, &b_base, &tau1, &b_blinding).compress();
        let t2_point = RistrettoPoint::add_pedersen(&t2, &b_base, &tau2, &b_blinding).compress();

        let x = transcript.challenge_x(&t1_point, &t2_point)?;

        let mut tau_x = *tau2 * x * x + *tau1 * x;
        for (j, opening) in witness.openings.iter().enumerate() {
            tau_x.mul_add_assign(&(z_square * z_powers[j]), &opening.r);
        }
        let mu = *alpha + *rho * x;

        let mut li = Zeroizing::new(Vec::with_capacity(nm));
        let mut ri = Zeroizing::new(Vec::with_capacity(nm));
        for i in 0..nm {
            li.push(Scalar::mul_add(&l1[i], &x, &l0[i]));
            ri.push(Scalar::mul_add(&r1[i], &x, &r0[i]));
        }
        let t_hat = inner_product(&li, &ri)?;

        let w = transcript.challenge_w(&t_hat, &tau_x, &mu)?;
        let q_base = b_base * w;

        // The argument runs over H'_i = y^-i H_i
        let y_inverse_powers = powers(&y.invert_checked()?, nm);
        let hi_base_prime: Vec<RistrettoPoint> = hi_base
            .iter()
            .zip(y_inverse_powers.iter())
            .map(|(h, y_inv)| h * y_inv)
            .collect();

        let mut ip_data = InnerProductRound::init(
            gi_base,
            hi_base_prime,
            q_base,
            li.to_vec(),
            ri.to_vec(),
            &mut transcript,
        )?;
        while !ip_data.is_done() {
            ip_data.inner_product()?;
        }
        let ipp = ip_data.proof()?;
        trace!(
            target: "aggregated_bulletproofs",
            "Created range proof for {} values of {} bits",
            count,
            bit_length
        );

        Ok(RangeProof {
            commitments,
            a,
            s,
            t1: t1_point,
            t2: t2_point,
            t_hat,
            tau_x,
            mu,
            ipp,
        })
    }

    /// The commitments to the proven values, in order
    pub fn commitments(&self) -> &[CompressedRistretto] {
        &self.commitments
    }

    /// Number of inner product rounds, `log2(n * m)`
    pub fn rounds(&self) -> usize {
        self.ipp.rounds()
    }

    // Returns the padded value count after checking the proof dimensions against the parameters
    fn padded_size(&self, params: &RangeParameters) -> Result<usize, ProofError> {
        let count = self.commitments.len();
        if count == 0 || count > params.aggregation_capacity() {
            return Err(ProofError::InvalidArgument(format!(
                "Proof holds {} commitments, aggregation capacity is {}",
                count,
                params.aggregation_capacity()
            )));
        }
        let padded_size = count.next_power_of_two();
        let nm = params.bit_length() * padded_size;
        let rounds = self.ipp.rounds();
        if self.ipp.ri.len() != rounds || rounds >= MAX_ROUNDS || 1 << rounds != nm {
            return Err(ProofError::LengthMismatch(format!(
                "Proof has {} inner product rounds, expected log2({})",
                rounds, nm
            )));
        }
        Ok(padded_size)
    }

    fn challenges(&self, params: &RangeParameters, padded_size: usize) -> Result<Challenges, ProofError> {
        let mut transcript = RangeProofTranscript::new(params, padded_size, &self.commitments)?;
        let (y, z) = transcript.challenges_y_z(&self.a, &self.s)?;
        let x = transcript.challenge_x(&self.t1, &self.t2)?;
        let w = transcript.challenge_w(&self.t_hat, &self.tau_x, &self.mu)?;
        let ipp = self
            .ipp
            .verification_scalars(params.bit_length() * padded_size, &mut transcript)?;
        Ok(Challenges { y, z, x, w, ipp })
    }

    fn commitments_decompressed(&self) -> Result<Vec<RistrettoPoint>, ProofError> {
        self.commitments.iter().map(|c| decompress(c, "V")).collect()
    }

    /// Verify the proof with two separate checks: the polynomial commitment and the inner product argument.
    ///
    /// Returns `Ok(false)` for a proof that does not verify, and an error if the proof does not fit `params`.
    pub fn verify(&self, params: &RangeParameters) -> Result<bool, ProofError> {
        let padded_size = self.padded_size(params)?;
        verification_result(self.verify_standard(params, padded_size))
    }

    fn verify_standard(&self, params: &RangeParameters, padded_size: usize) -> Result<(), ProofError> {
        let bit_length = params.bit_length();
        let nm = bit_length * padded_size;
        let Challenges { y, z, x, w, ipp } = self.challenges(params, padded_size)?;

        let (b_base, b_blinding) = (params.value_base(), params.blinding_base());
        let (gi_base, hi_base) = (params.gi_base(padded_size), params.hi_base(padded_size));
        let commitments = self.commitments_decompressed()?;
        let (a, s) = (decompress(&self.a, "A")?, decompress(&self.s, "S")?);
        let (t1, t2) = (decompress(&self.t1, "T1")?, decompress(&self.t2, "T2")?);
        let (li, ri) = (self.ipp.li_decompressed()?, self.ipp.ri_decompressed()?);

        let z_square = z * z;
        let z_powers = powers(&z, padded_size);
        let two_powers = powers(&Scalar::from(2u8), bit_length);
        let y_inverse_powers = powers(&y.invert_checked()?, nm);

        // t_hat B + tau_x B_blinding == sum(z^(2+j) V_j) + delta B + x T1 + x^2 T2
        let lhs = RistrettoPoint::vartime_multiscalar_mul_checked(&[self.t_hat, self.tau_x], &[b_base, b_blinding])?;
        let mut scalars = Vec::with_capacity(commitments.len() + 3);
        let mut points = Vec::with_capacity(commitments.len() + 3);
        for (j, commitment) in commitments.iter().enumerate() {
            scalars.push(z_square * z_powers[j]);
            points.push(*commitment);
        }
        scalars.push(delta(&y, &z, bit_length, padded_size));
        points.push(b_base);
        scalars.push(x);
        points.push(t1);
        scalars.push(x * x);
        points.push(t2);
        if lhs != RistrettoPoint::vartime_multiscalar_mul_checked(&scalars, &points)? {
            return Err(ProofError::VerificationFailed(
                "Polynomial commitment check failed".to_string(),
            ));
        }

        // P = A + x S - z <1, G> + sum((z + z^(2+j) 2^k y^-i) H_i) - mu B_blinding + t_hat w B
        let mut scalars = Vec::with_capacity(2 * nm + 4);
        let mut points = Vec::with_capacity(2 * nm + 4);
        scalars.extend_from_slice(&[Scalar::ONE, x, -self.mu, self.t_hat * w]);
        points.extend_from_slice(&[a, s, b_blinding, b_base]);
        for (i, g) in gi_base.iter().enumerate() {
            scalars.push(-z);
            points.push(*g);
            let (j, k) = (i / bit_length, i % bit_length);
            scalars.push(z + z_square * z_powers[j] * two_powers[k] * y_inverse_powers[i]);
            points.push(hi_base[i]);
        }
        let p = RistrettoPoint::vartime_multiscalar_mul_checked(&scalars, &points)?;

        // P == ab w B + <a s, G> + <b s^-1 y^-i, H> - sum(u^2 L) - sum(u^-2 R)
        let (ipp_a, ipp_b) = (self.ipp.a, self.ipp.b);
        let mut scalars = Vec::with_capacity(2 * nm + 2 * li.len() + 1);
        let mut points = Vec::with_capacity(2 * nm + 2 * li.len() + 1);
        scalars.push(ipp_a * ipp_b * w);
        points.push(b_base);
        for i in 0..nm {
            scalars.push(ipp_a * ipp.s[i]);
            points.push(gi_base[i]);
            scalars.push(ipp_b * ipp.s[nm - 1 - i] * y_inverse_powers[i]);
            points.push(hi_base[i]);
        }
        for k in 0..li.len() {
            scalars.push(-ipp.u_sq[k]);
            points.push(li[k]);
            scalars.push(-ipp.u_inv_sq[k]);
            points.push(ri[k]);
        }
        if p != RistrettoPoint::vartime_multiscalar_mul_checked(&scalars, &points)? {
            return Err(ProofError::VerificationFailed(
                "Inner product argument check failed".to_string(),
            ));
        }

        Ok(())
    }

    /// Verify the proof with a single multiscalar multiplication, using the thread random number generator.
    ///
    /// Accepts and rejects exactly the same proofs as [`RangeProof::verify`].
    pub fn verify_faster(&self, params: &RangeParameters) -> Result<bool, ProofError> {
        self.verify_faster_with_rng(params, &mut thread_rng())
    }

    /// Verify the proof with a single multiscalar multiplication, combining the two checks with a random weight
    pub fn verify_faster_with_rng<R: CryptoRngCore>(
        &self,
        params: &RangeParameters,
        rng: &mut R,
    ) -> Result<bool, ProofError> {
        let padded_size = self.padded_size(params)?;
        let mut batch = BatchAccumulator::new(params.bit_length() * padded_size);
        verification_result(
            self.accumulate(params, padded_size, &Scalar::ONE, rng, &mut batch)
                .and_then(|_| batch.verify(params)),
        )
    }

    /// Verify any number of proofs made with `params` in a single multiscalar multiplication.
    ///
    /// Returns `Ok(false)` if any proof in the batch does not verify.
    pub fn verify_batch(params: &RangeParameters, proofs: &[RangeProof]) -> Result<bool, ProofError> {
        Self::verify_batch_with_rng(params, proofs, &mut thread_rng())
    }

    /// As [`RangeProof::verify_batch`], drawing batch weights from `rng`
    pub fn verify_batch_with_rng<R: CryptoRngCore>(
        params: &RangeParameters,
        proofs: &[RangeProof],
        rng: &mut R,
    ) -> Result<bool, ProofError> {
        if proofs.is_empty() {
            return Err(ProofError::InvalidArgument("Range proof batch is empty".to_string()));
        }
        let padded_sizes = proofs
            .iter()
            .map(|proof| proof.padded_size(params))
            .collect::<Result<Vec<usize>, ProofError>>()?;
        let max_m = padded_sizes.iter().copied().max().unwrap_or(1);

        verification_result(Self::accumulate_batch(params, proofs, &padded_sizes, max_m, rng))
    }

    fn accumulate_batch<R: CryptoRngCore>(
        params: &RangeParameters,
        proofs: &[RangeProof],
        padded_sizes: &[usize],
        max_m: usize,
        rng: &mut R,
    ) -> Result<(), ProofError> {
        let mut batch = BatchAccumulator::new(params.bit_length() * max_m);
        for (proof, padded_size) in proofs.iter().zip(padded_sizes) {
            // Batch weight, never zero
            let weight = Scalar::random_not_zero(rng);
            proof.accumulate(params, *padded_size, &weight, rng, &mut batch)?;
        }
        batch.verify(params)
    }

    // Add `weight` times the combined check of this proof to `batch`:
    //   A + x S + c x T1 + c x^2 T2 + sum(u^2 L) + sum(u^-2 R) + sum(c z^(2+j) V_j)
    //   - (mu + c tau_x) B_blinding + (w (t_hat - ab) + c (delta - t_hat)) B
    //   + sum((-z - a s_i) G_i) + sum((z + y^-i (z^(2+j) 2^k - b s_(nm-1-i))) H_i) == 0
    fn accumulate<R: CryptoRngCore>(
        &self,
        params: &RangeParameters,
        padded_size: usize,
        weight: &Scalar,
        rng: &mut R,
        batch: &mut BatchAccumulator,
    ) -> Result<(), ProofError> {
        let bit_length = params.bit_length();
        let nm = bit_length * padded_size;
        let Challenges { y, z, x, w, ipp } = self.challenges(params, padded_size)?;

        // Weight of the polynomial check against the inner product check
        let c = Scalar::random_not_zero(rng);

        let commitments = self.commitments_decompressed()?;
        let (li, ri) = (self.ipp.li_decompressed()?, self.ipp.ri_decompressed()?);

        let z_square = z * z;
        let z_powers = powers(&z, padded_size);
        let two_powers = powers(&Scalar::from(2u8), bit_length);
        let y_inverse_powers = powers(&y.invert_checked()?, nm);
        let (ipp_a, ipp_b) = (self.ipp.a, self.ipp.b);

        batch.scalars.push(*weight);
        batch.points.push(decompress(&self.a, "A")?);
        batch.scalars.push(weight * x);
        batch.points.push(decompress(&self.s, "S")?);
        batch.scalars.push(weight * c * x);
        batch.points.push(decompress(&self.t1, "T1")?);
        batch.scalars.push(weight * c * x * x);
        batch.points.push(decompress(&self.t2, "T2")?);
        for k in 0..li.len() {
            batch.scalars.push(weight * ipp.u_sq[k]);
            batch.points.push(li[k]);
            batch.scalars.push(weight * ipp.u_inv_sq[k]);
            batch.points.push(ri[k]);
        }
        for (j, commitment) in commitments.iter().enumerate() {
            batch.scalars.push(weight * c * z_square * z_powers[j]);
            batch.points.push(*commitment);
        }

        batch.b_blinding_scalar -= weight * (self.mu + c * self.tau_x);
        batch.b_base_scalar += weight *
            (w * (self.t_hat - ipp_a * ipp_b) + c * (delta(&y, &z, bit_length, padded_size) - self.t_hat));

        for i in 0..nm {
            let (j, k) = (i / bit_length, i % bit_length);
            batch.gi_base_scalars[i] -= weight * (z + ipp_a * ipp.s[i]);
            batch.hi_base_scalars[i] += weight *
                (z + y_inverse_powers[i] * (z_square * z_powers[j] * two_powers[k] - ipp_b * ipp.s[nm - 1 - i]));
        }

        Ok(())
    }

    /// Serialize the proof:
    ///
    /// `count (1 byte) || V_j (count x 32) || A || S || T1 || T2 || t_hat || tau_x || mu || (L_k || R_k) (rounds x 64)
    /// || a || b`
    pub fn to_bytes(&self) -> Vec<u8> {
        let rounds = self.ipp.rounds();
        let mut buf = Vec::with_capacity(Self::encoded_len(self.commitments.len(), rounds));
        #[allow(clippy::cast_possible_truncation)]
        let count = self.commitments.len() as u8;
        buf.push(count);
        for commitment in &self.commitments {
            buf.extend_from_slice(commitment.as_bytes());
        }
        for point in [&self.a, &self.s, &self.t1, &self.t2] {
            buf.extend_from_slice(point.as_bytes());
        }
        for scalar in [&self.t_hat, &self.tau_x, &self.mu] {
            buf.extend_from_slice(scalar.as_bytes());
        }
        for (l, r) in self.ipp.li.iter().zip(self.ipp.ri.iter()) {
            buf.extend_from_slice(l.as_bytes());
            buf.extend_from_slice(r.as_bytes());
        }
        buf.extend_from_slice(self.ipp.a.as_bytes());
        buf.extend_from_slice(self.ipp.b.as_bytes());
        buf
    }

    fn encoded_len(count: usize, rounds: usize) -> usize {
        1 + ENCODED_SIZE * (count + FIXED_ELEMENTS + 2 * rounds)
    }

    /// Deserialize a proof, accepting only canonical encodings
    pub fn from_bytes(slice: &[u8]) -> Result<RangeProof, ProofError> {
        let count = match slice.first() {
            Some(0) | None => {
                return Err(ProofError::InvalidEncoding(
                    "Range proof must hold at least one commitment".to_string(),
                ))
            },
            Some(count) => *count as usize,
        };
        let fixed_len = Self::encoded_len(count, 0);
        if slice.len() < fixed_len || (slice.len() - fixed_len) % (2 * ENCODED_SIZE) != 0 {
            return Err(ProofError::InvalidEncoding(format!(
                "Invalid range proof length {}",
                slice.len()
            )));
        }
        let rounds = (slice.len() - fixed_len) / (2 * ENCODED_SIZE);
        // log2(n * m) with a power of two bit length n in 1..=64
        let lg_m = count.next_power_of_two().trailing_zeros() as usize;
        let max_lg_n = MAX_BIT_LENGTH.trailing_zeros() as usize;
        if rounds < lg_m || rounds > lg_m + max_lg_n || rounds >= MAX_ROUNDS {
            return Err(ProofError::InvalidEncoding(format!(
                "Invalid number of inner product rounds {} for {} commitments",
                rounds, count
            )));
        }

        let mut chunks = slice[1..].chunks_exact(ENCODED_SIZE).map(|chunk| {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(chunk);
            bytes
        });
        let mut next = || {
            chunks
                .next()
                .ok_or_else(|| ProofError::InvalidEncoding("Range proof is truncated".to_string()))
        };

        let mut commitments = Vec::with_capacity(count);
        for _ in 0..count {
            commitments.push(CompressedRistretto::from_fixed_bytes(&next()?)?);
        }
        let a = CompressedRistretto::from_fixed_bytes(&next()?)?;
        let s = CompressedRistretto::from_fixed_bytes(&next()?)?;
        let t1 = CompressedRistretto::from_fixed_bytes(&next()?)?;
        let t2 = CompressedRistretto::from_fixed_bytes(&next()?)?;
        let t_hat = Scalar::from_fixed_bytes(&next()?)?;
        let tau_x = Scalar::from_fixed_bytes(&next()?)?;
        let mu = Scalar::from_fixed_bytes(&next()?)?;
        let mut li = Vec::with_capacity(rounds);
        let mut ri = Vec::with_capacity(rounds);
        for _ in 0..rounds {
            li.push(CompressedRistretto::from_fixed_bytes(&next()?)?);
            ri.push(CompressedRistretto::from_fixed_bytes(&next()?)?);
        }
        let ipp_a = Scalar::from_fixed_bytes(&next()?)?;
        let ipp_b = Scalar::from_fixed_bytes(&next()?)?;

        Ok(RangeProof {
            commitments,
            a,
            s,
            t1,
            t2,
            t_hat,
            tau_x,
            mu,
            ipp: InnerProductProof {
                li,
                ri,
                a: ipp_a,
                b: ipp_b,
            },
        })
    }

    /// The canonical byte encoding as lowercase hex
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Decode a proof from hex text over its canonical byte encoding
    pub fn from_hex(text: &str) -> Result<RangeProof, ProofError> {
        let bytes = hex::decode(text.trim()).map_err(|e| ProofError::InvalidEncoding(format!("hex: {}", e)))?;
        RangeProof::from_bytes(&bytes)
    }
}

impl fmt::Debug for RangeProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeProof")
            .field("commitments", &self.commitments.len())
            .field("rounds", &self.ipp.rounds())
            .finish()
    }
}

impl Serialize for RangeProof {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        serializer.serialize_bytes(&self.to_bytes()[..])
    }
}

impl<'de> Deserialize<'de> for RangeProof {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        struct RangeProofVisitor;

        impl<'de> Visitor<'de> for RangeProofVisitor {
            type Value = RangeProof;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a valid RangeProof")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<RangeProof, E>
            where E: de::Error {
                RangeProof::from_bytes(v).map_err(|e| de::Error::custom(e.to_string()))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<RangeProof, A::Error>
            where A: de::SeqAccess<'de> {
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                RangeProof::from_bytes(&bytes).map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_bytes(RangeProofVisitor)
    }
}
