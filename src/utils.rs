//! Utility functions for byte manipulation and parameter validation.

use crate::error::{Error, Result};
use subtle::ConstantTimeEq;

/// Maximum length for plaintext, ciphertext, and associated data
/// (2^61 - 1 bytes), so that bit lengths always fit a `u64`.
pub const MAX_DATA_LEN: u64 = (1u64 << 61) - 1;

/// Convert a 64-bit integer to little-endian bytes.
#[inline]
pub fn le64(n: u64) -> [u8; 8] {
    n.to_le_bytes()
}

/// XOR two 16-byte blocks.
#[inline]
pub fn xor_block(a: &[u8; 16], b: &[u8; 16]) -> [u8; 16] {
    let mut result = [0u8; 16];
    for i in 0..16 {
        result[i] = a[i] ^ b[i];
    }
    result
}

/// Constant-time comparison of two byte slices.
///
/// Backed by `subtle::ConstantTimeEq`; equal-length inputs are compared
/// without data-dependent branches. A length mismatch is public information
/// and short-circuits.
#[inline]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Validate key and nonce lengths plus the associated-data cap shared by
/// encryption and decryption, returning fixed-size views of key and nonce.
pub fn validate_params<'a>(
    key: &'a [u8],
    nonce: &'a [u8],
    ad_len: usize,
) -> Result<(&'a [u8; 32], &'a [u8; 16])> {
    let key = key.try_into().map_err(|_| Error::InvalidKeyLength)?;
    let nonce = nonce.try_into().map_err(|_| Error::InvalidNonceLength)?;
    if (ad_len as u64) > MAX_DATA_LEN {
        return Err(Error::AssociatedDataTooLong);
    }
    Ok((key, nonce))
}
