// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Utilities

/// Scalar vector utilities shared by the prover and verifiers
pub mod generic;
/// Add 'Debug' functionality to other struct members that do not implement 'Debug'
pub mod non_debug;
