// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Range proof and commitment error definitions

use thiserror::Error;

/// Represents an error in commitment creation, proof creation, verification, or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// Bytes or text could not be decoded into a canonical scalar, point or proof
    #[error("Invalid encoding: `{0}`")]
    InvalidEncoding(String),
    /// Two inputs that must have equal lengths did not
    #[error("Length mismatch: `{0}`")]
    LengthMismatch(String),
    /// A value does not fit in the configured bit length
    #[error("Value out of range: `{0}`")]
    RangeViolation(String),
    /// A proof component failed to verify
    #[error("A proof component failed to verify: `{0}`")]
    VerificationFailed(String),
    /// An argument or internal state is invalid
    #[error("Invalid argument: `{0}`")]
    InvalidArgument(String),
}
