// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Extension traits over the curve, scalar and transcript types

/// `RistrettoPointProtocol` trait for group arithmetic, hashing to the group and multiscalar multiplication
pub mod ristretto_point_protocol;
/// `ScalarProtocol` trait for field arithmetic, sampling and hashing to scalars
pub mod scalar_protocol;
/// `TranscriptProtocol` trait for using a Merlin transcript
pub mod transcript_protocol;
