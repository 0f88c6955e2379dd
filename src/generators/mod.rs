// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Pedersen and vector generators, all derived by hashing so that no discrete log relation between them is known

/// Per-party \\(\mathbf G\\) and \\(\mathbf H\\) vector generators
pub mod bulletproof_gens;
/// SHAKE256 generator stream
mod generators_chain;
/// The ordered generator set for Pedersen commitments
pub mod pedersen_gens;

pub use bulletproof_gens::BulletproofGens;
pub use pedersen_gens::PedersenGens;
