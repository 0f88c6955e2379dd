// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Pedersen commitments and aggregated Bulletproof range proofs over `ristretto255`.
//!
//! A [`RangeProof`] shows that each of up to [`RangeParameters::aggregation_capacity`] committed values lies in
//! `[0, 2^n)`, where `n` is the configured bit length. Proofs are non-interactive through a Merlin transcript. They
//! encode canonically to bytes or hex, and through serde to any serde format.

#![cfg_attr(not(debug_assertions), deny(unused_variables))]
#![cfg_attr(not(debug_assertions), deny(unused_imports))]
#![cfg_attr(not(debug_assertions), deny(dead_code))]
#![cfg_attr(not(debug_assertions), deny(unused_extern_crates))]
#![deny(unused_must_use)]
#![deny(unreachable_patterns)]
#![deny(unknown_lints)]
#![recursion_limit = "1024"]
// Some functions have a large amount of dependencies (e.g. services) and historically this warning
// has lead to bundling of dependencies into a resources struct, which is then overused and is the
// wrong abstraction
#![allow(clippy::too_many_arguments)]

#[macro_use]
extern crate lazy_static;

pub mod backend;
pub mod commitment_opening;
pub mod errors;
pub mod generators;
mod inner_product_round;
pub mod protocols;
pub mod range_parameters;
pub mod range_proof;
pub mod range_witness;
pub mod ristretto;
pub mod traits;
mod transcripts;
pub mod utils;

pub use crate::{
    backend::{BackendConfig, RangeProofBackend},
    commitment_opening::CommitmentOpening,
    errors::ProofError,
    generators::{BulletproofGens, PedersenGens},
    range_parameters::RangeParameters,
    range_proof::RangeProof,
    range_witness::RangeWitness,
};
