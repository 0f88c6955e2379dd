// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use crate::errors::ProofError;

/// Abstrations for any type that can be represented as 32 bytes
pub trait FixedBytesRepr: Sized {
    /// Returns the 32-byte representation
    fn to_fixed_bytes(&self) -> [u8; 32];

    /// Converts a 32-byte representation to an instance of this type, failing if the encoding is not canonical
    fn from_fixed_bytes(bytes: &[u8; 32]) -> Result<Self, ProofError>;
}

/// Hexadecimal text encoding of the canonical 32-byte representation
pub trait HexRepr: FixedBytesRepr {
    /// Encode as lowercase hex
    fn to_hex(&self) -> String {
        hex::encode(self.to_fixed_bytes())
    }

    /// Decode from hex, failing on bad characters, a wrong length or a non-canonical encoding
    fn from_hex(text: &str) -> Result<Self, ProofError> {
        let bytes = hex::decode(text.trim()).map_err(|e| ProofError::InvalidEncoding(format!("hex: {}", e)))?;
        let bytes: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ProofError::InvalidEncoding(format!("expected 32 bytes, got {}", bytes.len())))?;
        Self::from_fixed_bytes(&bytes)
    }
}
