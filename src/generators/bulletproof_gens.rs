// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause
//   Modified from:
//     Copyright (c) 2018 Chain, Inc.
//     SPDX-License-Identifier: MIT

use byteorder::{ByteOrder, LittleEndian};
use curve25519_dalek::ristretto::RistrettoPoint;

use crate::generators::generators_chain::GeneratorsChain;

/// Domain of the default vector generators
pub const DEFAULT_VECTOR_DOMAIN: &[u8] = b"GeneratorsChain";

/// The vector generators \\(\mathbf G\\) and \\(\mathbf H\\) for aggregating up to `party_capacity` values of up to
/// `gens_capacity` bits each.
///
/// Every party gets its own pair of chains, labelled `'G' || u32_le(party)` and `'H' || u32_le(party)` under the
/// domain. An aggregated proof over `m` values of `n` bits uses the first `n` points of the first `m` chains, party
/// by party, so one set serves every smaller bit length and aggregation size.
#[derive(Clone, Debug)]
pub struct BulletproofGens {
    domain: Vec<u8>,
    gens_capacity: usize,
    party_capacity: usize,
    pub(crate) g_vec: Vec<Vec<RistrettoPoint>>,
    pub(crate) h_vec: Vec<Vec<RistrettoPoint>>,
}

impl BulletproofGens {
    /// Vector generators under [`DEFAULT_VECTOR_DOMAIN`]
    pub fn new(gens_capacity: usize, party_capacity: usize) -> Self {
        Self::with_domain(DEFAULT_VECTOR_DOMAIN, gens_capacity, party_capacity)
    }

    /// Vector generators under `domain`. Different domains give unrelated generators.
    pub fn with_domain(domain: &[u8], gens_capacity: usize, party_capacity: usize) -> Self {
        let mut gens = Self {
            domain: domain.to_vec(),
            gens_capacity: 0,
            party_capacity,
            g_vec: vec![Vec::new(); party_capacity],
            h_vec: vec![Vec::new(); party_capacity],
        };
        gens.increase_capacity(gens_capacity);
        gens
    }

    /// Extend every chain to `new_capacity` points; a smaller capacity is a no-op
    pub fn increase_capacity(&mut self, new_capacity: usize) {
        if new_capacity <= self.gens_capacity {
            return;
        }
        let extra = new_capacity - self.gens_capacity;
        for party in 0..self.party_capacity {
            #[allow(clippy::cast_possible_truncation)]
            let party_index = party as u32;
            let mut label = [0u8; 5];
            LittleEndian::write_u32(&mut label[1..], party_index);

            label[0] = b'G';
            let g_chain = GeneratorsChain::new(&self.domain, &label).skip_points(self.gens_capacity);
            self.g_vec[party].extend(g_chain.take(extra));

            label[0] = b'H';
            let h_chain = GeneratorsChain::new(&self.domain, &label).skip_points(self.gens_capacity);
            self.h_vec[party].extend(h_chain.take(extra));
        }
        self.gens_capacity = new_capacity;
    }

    /// Points available in each chain
    pub fn gens_capacity(&self) -> usize {
        self.gens_capacity
    }

    /// Number of chains of each kind
    pub fn party_capacity(&self) -> usize {
        self.party_capacity
    }

    /// The first `n` \\(\mathbf G\\) generators of each of the first `m` parties
    pub(crate) fn g_iter(&self, n: usize, m: usize) -> impl Iterator<Item = &RistrettoPoint> {
        aggregated(&self.g_vec, n, m)
    }

    /// The first `n` \\(\mathbf H\\) generators of each of the first `m` parties
    pub(crate) fn h_iter(&self, n: usize, m: usize) -> impl Iterator<Item = &RistrettoPoint> {
        aggregated(&self.h_vec, n, m)
    }
}

fn aggregated(chains: &[Vec<RistrettoPoint>], n: usize, m: usize) -> impl Iterator<Item = &RistrettoPoint> {
    chains.iter().take(m).flat_map(move |chain| chain.iter().take(n))
}
