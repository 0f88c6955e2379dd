// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause
//   Modified from:
//     Copyright (c) 2018 Chain, Inc.
//     SPDX-License-Identifier: MIT

//! Inner product argument: prover rounds and verifier scalars

use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::VartimeMultiscalarMul,
};
use zeroize::Zeroize;

use crate::{
    errors::ProofError,
    protocols::{ristretto_point_protocol::RistrettoPointProtocol, scalar_protocol::ScalarProtocol},
    transcripts::RangeProofTranscript,
    utils::{generic::inner_product, non_debug::NonDebug},
};

/// The most inner product rounds a proof may claim; bounds vectors of length `2^32`
pub(crate) const MAX_ROUNDS: usize = 32;

/// The prover state of the inner product argument, advanced one halving round at a time
#[derive(Debug)]
pub(crate) struct InnerProductRound<'a> {
    // Common data
    gi_base: Vec<RistrettoPoint>,
    hi_base: Vec<RistrettoPoint>,
    q_base: RistrettoPoint,
    done: bool,

    // Prover data
    ai: Vec<Scalar>,
    bi: Vec<Scalar>,

    // Proof data
    li: Vec<CompressedRistretto>,
    ri: Vec<CompressedRistretto>,

    // Transcript
    transcript: NonDebug<&'a mut RangeProofTranscript>,
}

impl<'a> InnerProductRound<'a> {
    /// Initialize a new 'InnerProductRound' with sanity checks
    pub(crate) fn init(
        gi_base: Vec<RistrettoPoint>,
        hi_base: Vec<RistrettoPoint>,
        q_base: RistrettoPoint,
        ai: Vec<Scalar>,
        bi: Vec<Scalar>,
        transcript: &'a mut RangeProofTranscript,
    ) -> Result<Self, ProofError> {
        let n = gi_base.len();
        if n == 0 || !n.is_power_of_two() {
            return Err(ProofError::InvalidArgument(
                "Inner product vectors must have a non-zero power of two length".to_string(),
            ));
        }
        if !(hi_base.len() == n && ai.len() == n && bi.len() == n) {
            return Err(ProofError::LengthMismatch(
                "Vector length for inner product round".to_string(),
            ));
        }
        let rounds = n.trailing_zeros() as usize;
        Ok(Self {
            gi_base,
            hi_base,
            q_base,
            done: n == 1,
            ai,
            bi,
            li: Vec::with_capacity(rounds),
            ri: Vec::with_capacity(rounds),
            transcript: transcript.into(),
        })
    }

    /// Perform one halving round, updating 'self'
    pub(crate) fn inner_product(&mut self) -> Result<(), ProofError> {
        let mut n = self.gi_base.len();
        if n == 1 {
            self.done = true;
            return Ok(());
        }

        n /= 2;
        let (a_lo, a_hi) = self.ai.split_at(n);
        let (b_lo, b_hi) = self.bi.split_at(n);
        let (gi_base_lo, gi_base_hi) = self.gi_base.split_at(n);
        let (hi_base_lo, hi_base_hi) = self.hi_base.split_at(n);

        let c_l = inner_product(a_lo, b_hi)?;
        let c_r = inner_product(a_hi, b_lo)?;

        // The vectors are secret, so L and R use constant time multiplication
        let mut li_scalars = Vec::with_capacity(2 * n + 1);
        li_scalars.extend_from_slice(a_lo);
        li_scalars.extend_from_slice(b_hi);
        li_scalars.push(c_l);
        let mut li_points = Vec::with_capacity(2 * n + 1);
        li_points.extend_from_slice(gi_base_hi);
        li_points.extend_from_slice(hi_base_lo);
        li_points.push(self.q_base);
        let l = RistrettoPoint::multiscalar_mul_checked(&li_scalars, &li_points)?.compress();

        let mut ri_scalars = Vec::with_capacity(2 * n + 1);
        ri_scalars.extend_from_slice(a_hi);
        ri_scalars.extend_from_slice(b_lo);
        ri_scalars.push(c_r);
        let mut ri_points = Vec::with_capacity(2 * n + 1);
        ri_points.extend_from_slice(gi_base_lo);
        ri_points.extend_from_slice(hi_base_hi);
        ri_points.push(self.q_base);
        let r = RistrettoPoint::multiscalar_mul_checked(&ri_scalars, &ri_points)?.compress();

        li_scalars.zeroize();
        ri_scalars.zeroize();

        let u = self.transcript.challenge_round_u(&l, &r)?;
        let u_inverse = u.invert_checked()?;
        self.li.push(l);
        self.ri.push(r);

        // Fold the upper halves into the lower halves in place
        let (a_lo, a_hi) = self.ai.split_at_mut(n);
        for (lo, hi) in a_lo.iter_mut().zip(a_hi.iter()) {
            *lo = *lo * u + hi * u_inverse;
        }
        let (b_lo, b_hi) = self.bi.split_at_mut(n);
        for (lo, hi) in b_lo.iter_mut().zip(b_hi.iter()) {
            *lo = *lo * u_inverse + hi * u;
        }
        let (gi_base_lo, gi_base_hi) = self.gi_base.split_at_mut(n);
        for (lo, hi) in gi_base_lo.iter_mut().zip(gi_base_hi.iter()) {
            *lo = RistrettoPoint::vartime_multiscalar_mul([u_inverse, u], [*lo, *hi]);
        }
        let (hi_base_lo, hi_base_hi) = self.hi_base.split_at_mut(n);
        for (lo, hi) in hi_base_lo.iter_mut().zip(hi_base_hi.iter()) {
            *lo = RistrettoPoint::vartime_multiscalar_mul([u, u_inverse], [*lo, *hi]);
        }

        for scalar in self.ai[n..].iter_mut().chain(self.bi[n..].iter_mut()) {
            scalar.zeroize();
        }
        self.ai.truncate(n);
        self.bi.truncate(n);
        self.gi_base.truncate(n);
        self.hi_base.truncate(n);
        self.done = self.gi_base.len() == 1;

        Ok(())
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done
    }

    /// The finished proof; only available once every round has run
    pub(crate) fn proof(&self) -> Result<InnerProductProof, ProofError> {
        if !self.done {
            return Err(ProofError::InvalidArgument(
                "Inner product rounds not completed yet".to_string(),
            ));
        }
        Ok(InnerProductProof {
            li: self.li.clone(),
            ri: self.ri.clone(),
            a: self.ai[0],
            b: self.bi[0],
        })
    }
}

/// Overwrite secrets with null bytes when they go out of scope.
impl<'a> Drop for InnerProductRound<'a> {
    fn drop(&mut self) {
        self.ai.zeroize();
        self.bi.zeroize();
    }
}

/// The public output of the inner product argument
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InnerProductProof {
    pub(crate) li: Vec<CompressedRistretto>,
    pub(crate) ri: Vec<CompressedRistretto>,
    pub(crate) a: Scalar,
    pub(crate) b: Scalar,
}

/// Scalars the verifier needs to check an inner product proof in one multiscalar multiplication
pub(crate) struct VerificationScalars {
    /// Squares of the round challenges
    pub(crate) u_sq: Vec<Scalar>,
    /// Squares of the inverted round challenges
    pub(crate) u_inv_sq: Vec<Scalar>,
    /// Coefficients of the folded \\(\mathbf G\\) generators; \\(\mathbf H\\) uses them in reverse order
    pub(crate) s: Vec<Scalar>,
}

impl InnerProductProof {
    /// Number of halving rounds
    pub fn rounds(&self) -> usize {
        self.li.len()
    }

    /// Replay the rounds on `transcript` and compute the verification scalars for vectors of length `n`
    pub(crate) fn verification_scalars(
        &self,
        n: usize,
        transcript: &mut RangeProofTranscript,
    ) -> Result<VerificationScalars, ProofError> {
        let lg_n = self.li.len();
        if lg_n >= MAX_ROUNDS || self.ri.len() != lg_n {
            return Err(ProofError::LengthMismatch(
                "Inner product proof has an invalid number of rounds".to_string(),
            ));
        }
        if n != 1 << lg_n {
            return Err(ProofError::LengthMismatch(format!(
                "Inner product proof of {} rounds cannot open vectors of length {}",
                lg_n, n
            )));
        }

        let mut challenges = Vec::with_capacity(lg_n);
        for (l, r) in self.li.iter().zip(self.ri.iter()) {
            challenges.push(transcript.challenge_round_u(l, r)?);
        }

        let mut challenges_inv = challenges.clone();
        let allinv = Scalar::batch_invert(&mut challenges_inv);

        let u_sq: Vec<Scalar> = challenges.iter().map(|u| u * u).collect();
        let u_inv_sq: Vec<Scalar> = challenges_inv.iter().map(|u| u * u).collect();

        // s_i is the product of u_k or its inverse, chosen by bit k of i
        let mut s = Vec::with_capacity(n);
        s.push(allinv);
        for i in 1..n {
            #[allow(clippy::cast_possible_truncation)]
            let lg_i = (usize::BITS - 1 - i.leading_zeros()) as usize;
            let k = 1 << lg_i;
            let u_lg_i_sq = u_sq[(lg_n - 1) - lg_i];
            s.push(s[i - k] * u_lg_i_sq);
        }

        Ok(VerificationScalars { u_sq, u_inv_sq, s })
    }

    pub(crate) fn li_decompressed(&self) -> Result<Vec<RistrettoPoint>, ProofError> {
        self.li
            .iter()
            .map(|item| {
                item.decompress().ok_or_else(|| {
                    ProofError::InvalidEncoding(
                        "An item in member 'L' was not the canonical encoding of a point".to_string(),
                    )
                })
            })
            .collect()
    }

    pub(crate) fn ri_decompressed(&self) -> Result<Vec<RistrettoPoint>, ProofError> {
        self.ri
            .iter()
            .map(|item| {
                item.decompress().ok_or_else(|| {
                    ProofError::InvalidEncoding(
                        "An item in member 'R' was not the canonical encoding of a point".to_string(),
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use curve25519_dalek::{
        ristretto::RistrettoPoint,
        scalar::Scalar,
        traits::{Identity, VartimeMultiscalarMul},
    };
    use rand::thread_rng;

    use super::*;
    use crate::{generators::PedersenGens, range_parameters::RangeParameters, utils::generic::inner_product};

    fn transcript(params: &RangeParameters) -> RangeProofTranscript {
        RangeProofTranscript::new(params, 1, &[]).unwrap()
    }

    fn prove(
        params: &RangeParameters,
        g: &[RistrettoPoint],
        h: &[RistrettoPoint],
        q: RistrettoPoint,
        a: &[Scalar],
        b: &[Scalar],
    ) -> InnerProductProof {
        let mut transcript = transcript(params);
        let mut round = InnerProductRound::init(g.to_vec(), h.to_vec(), q, a.to_vec(), b.to_vec(), &mut transcript)
            .unwrap();
        while !round.is_done() {
            round.inner_product().unwrap();
        }
        round.proof().unwrap()
    }

    // P == (ab)Q + <a s, G> + <b s^-1, H> - sum(u^2 L) - sum(u^-2 R)
    fn verify(
        params: &RangeParameters,
        proof: &InnerProductProof,
        g: &[RistrettoPoint],
        h: &[RistrettoPoint],
        q: RistrettoPoint,
        p: RistrettoPoint,
    ) -> bool {
        let n = g.len();
        let mut transcript = transcript(params);
        let scalars = match proof.verification_scalars(n, &mut transcript) {
            Ok(scalars) => scalars,
            Err(_) => return false,
        };
        let mut msm_scalars = vec![proof.a * proof.b];
        let mut msm_points = vec![q];
        for i in 0..n {
            msm_scalars.push(proof.a * scalars.s[i]);
            msm_points.push(g[i]);
            msm_scalars.push(proof.b * scalars.s[n - 1 - i]);
            msm_points.push(h[i]);
        }
        let li = proof.li_decompressed().unwrap();
        let ri = proof.ri_decompressed().unwrap();
        for k in 0..proof.rounds() {
            msm_scalars.push(-scalars.u_sq[k]);
            msm_points.push(li[k]);
            msm_scalars.push(-scalars.u_inv_sq[k]);
            msm_points.push(ri[k]);
        }
        RistrettoPoint::vartime_multiscalar_mul(msm_scalars, msm_points) == p
    }

    #[test]
    fn test_inner_product_argument() {
        let mut rng = thread_rng();
        let params = RangeParameters::init(8, 4, PedersenGens::default()).unwrap();
        let q = RistrettoPoint::hash_from_bytes_sha3_512(b"Q");
        for n in [1usize, 2, 4, 8, 32] {
            let g = params.gi_base(4)[..n].to_vec();
            let h = params.hi_base(4)[..n].to_vec();
            let a: Vec<Scalar> = (0..n).map(|_| Scalar::random_wide(&mut rng)).collect();
            let b: Vec<Scalar> = (0..n).map(|_| Scalar::random_wide(&mut rng)).collect();
            let p = RistrettoPoint::vartime_multiscalar_mul(
                a.iter().chain(b.iter()).chain([inner_product(&a, &b).unwrap()].iter()),
                g.iter().chain(h.iter()).chain([q].iter()),
            );

            let proof = prove(&params, &g, &h, q, &a, &b);
            assert_eq!(proof.rounds(), n.trailing_zeros() as usize);
            assert!(verify(&params, &proof, &g, &h, q, p));
            assert!(!verify(&params, &proof, &g, &h, q, p + q));

            let mut bad = proof.clone();
            bad.a += Scalar::ONE;
            assert!(!verify(&params, &bad, &g, &h, q, p));
        }
    }

    #[test]
    fn test_round_halves_vectors_in_place() {
        let mut rng = thread_rng();
        let params = RangeParameters::init(8, 1, PedersenGens::default()).unwrap();
        let g = params.gi_base(1);
        let h = params.hi_base(1);
        let q = RistrettoPoint::hash_from_bytes_sha3_512(b"Q");
        let a: Vec<Scalar> = (0..8).map(|_| Scalar::random_wide(&mut rng)).collect();
        let b: Vec<Scalar> = (0..8).map(|_| Scalar::random_wide(&mut rng)).collect();

        let mut t = transcript(&params);
        let mut round = InnerProductRound::init(g.clone(), h.clone(), q, a.clone(), b.clone(), &mut t).unwrap();
        round.inner_product().unwrap();
        let (l, r) = (round.li[0], round.ri[0]);
        let (ai, bi) = (round.ai.clone(), round.bi.clone());
        let (gi, hi) = (round.gi_base.clone(), round.hi_base.clone());
        assert!(!round.is_done());
        drop(round);

        let u = transcript(&params).challenge_round_u(&l, &r).unwrap();
        let u_inv = u.invert();
        assert_eq!(ai.len(), 4);
        assert_eq!(gi.len(), 4);
        for i in 0..4 {
            assert_eq!(ai[i], a[i] * u + a[i + 4] * u_inv);
            assert_eq!(bi[i], b[i] * u_inv + b[i + 4] * u);
            assert_eq!(gi[i], g[i] * u_inv + g[i + 4] * u);
            assert_eq!(hi[i], h[i] * u + h[i + 4] * u_inv);
        }
        // The folded witness still satisfies the relation against the folded bases
        let l = l.decompress().unwrap();
        let r = r.decompress().unwrap();
        let p = RistrettoPoint::vartime_multiscalar_mul(
            a.iter().chain(b.iter()).chain([inner_product(&a, &b).unwrap()].iter()),
            g.iter().chain(h.iter()).chain([q].iter()),
        );
        let folded = RistrettoPoint::vartime_multiscalar_mul(
            ai.iter().chain(bi.iter()).chain([inner_product(&ai, &bi).unwrap()].iter()),
            gi.iter().chain(hi.iter()).chain([q].iter()),
        );
        assert_eq!(folded, p + l * (u * u) + r * (u_inv * u_inv));
    }

    #[test]
    fn test_init_and_round_checks() {
        let params = RangeParameters::init(8, 1, PedersenGens::default()).unwrap();
        let g = params.gi_base(1);
        let h = params.hi_base(1);
        let scalars = vec![Scalar::ONE; 8];
        let q = RistrettoPoint::identity();

        let mut t = transcript(&params);
        assert!(InnerProductRound::init(
            g[..3].to_vec(),
            h[..3].to_vec(),
            q,
            scalars[..3].to_vec(),
            scalars[..3].to_vec(),
            &mut t
        )
        .is_err());
        let mut t = transcript(&params);
        assert!(matches!(
            InnerProductRound::init(g.clone(), h[..4].to_vec(), q, scalars.clone(), scalars.clone(), &mut t),
            Err(ProofError::LengthMismatch(_))
        ));
        let mut t = transcript(&params);
        let round = InnerProductRound::init(g, h, q, scalars.clone(), scalars, &mut t).unwrap();
        assert!(round.proof().is_err());

        let proof = InnerProductProof {
            li: vec![CompressedRistretto::default(); 2],
            ri: vec![CompressedRistretto::default(); 2],
            a: Scalar::ONE,
            b: Scalar::ONE,
        };
        let mut t = transcript(&params);
        assert!(matches!(
            proof.verification_scalars(8, &mut t),
            Err(ProofError::LengthMismatch(_))
        ));
    }
}
