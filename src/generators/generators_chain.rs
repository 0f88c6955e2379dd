// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause
//   Modified from:
//     Copyright (c) 2018 Chain, Inc.
//     SPDX-License-Identifier: MIT

use curve25519_dalek::ristretto::RistrettoPoint;
use digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake256, Shake256Reader};

/// Endless stream of generators squeezed from `SHAKE256(domain || label)`, 64 bytes per point
pub(crate) struct GeneratorsChain {
    reader: Shake256Reader,
}

impl GeneratorsChain {
    pub(crate) fn new(domain: &[u8], label: &[u8]) -> Self {
        let mut shake = Shake256::default();
        shake.update(domain);
        shake.update(label);
        Self {
            reader: shake.finalize_xof(),
        }
    }

    /// Discard the first `n` generators
    pub(crate) fn skip_points(mut self, n: usize) -> Self {
        let mut discard = [0u8; 64];
        for _ in 0..n {
            self.reader.read(&mut discard);
        }
        self
    }
}

impl Iterator for GeneratorsChain {
    type Item = RistrettoPoint;

    fn next(&mut self) -> Option<RistrettoPoint> {
        let mut uniform_bytes = [0u8; 64];
        self.reader.read(&mut uniform_bytes);
        Some(RistrettoPoint::from_uniform_bytes(&uniform_bytes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
