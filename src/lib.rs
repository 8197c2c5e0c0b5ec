//! # HiAE - High-throughput Authenticated Encryption
//!
//! This crate implements the HiAE authenticated encryption with associated
//! data (AEAD) primitive: a nonce-based cipher built on a sixteen-block
//! rolling state driven by a single AES round per block.
//!
//! ## Features
//!
//! - **High Performance**: a 16-block batched fast path and hardware AES on
//!   ARMv8 Crypto Extensions and x86-64 AES-NI, selected once per process
//! - **Security**: 256-bit keys, 128-bit nonces and tags, constant-time tag
//!   verification, zeroization of secrets on failure
//! - **Portable**: a constant-time bitsliced software fallback on targets
//!   without AES instructions
//! - **No-std Compatible**: only `alloc` is required without the `std`
//!   feature
//!
//! ## Usage
//!
//! ```rust
//! use hiae::{encrypt, decrypt};
//!
//! let key = [0u8; 32];      // 256-bit key
//! let nonce = [0u8; 16];    // 128-bit nonce
//! let plaintext = b"Hello, world!";
//! let aad = b"additional data";
//!
//! // Encrypt
//! let (ciphertext, tag) = encrypt(plaintext, aad, &key, &nonce)?;
//!
//! // Decrypt
//! let decrypted = decrypt(&ciphertext, &tag, aad, &key, &nonce)?;
//! assert_eq!(decrypted, plaintext);
//! # Ok::<(), hiae::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

extern crate alloc;

mod core;
mod error;
mod intrinsics;
mod utils;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};

use alloc::vec::Vec;

/// Key length in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Nonce length in bytes (128 bits).
pub const NONCE_LEN: usize = 16;

/// Authentication tag length in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// Block length in bytes (the AES block size).
pub const BLOCK_LEN: usize = 16;

/// Number of blocks in the cipher state.
pub const STATE_LEN: usize = 16;

/// Encrypts plaintext with associated data using HiAE.
///
/// # Arguments
///
/// * `plaintext` - The data to encrypt
/// * `aad` - Additional authenticated data (not encrypted, but authenticated)
/// * `key` - 256-bit encryption key (32 bytes)
/// * `nonce` - 128-bit nonce (16 bytes, must be unique per key)
///
/// # Returns
///
/// A tuple of (ciphertext, authentication tag) on success. The ciphertext
/// has exactly the length of the plaintext.
///
/// # Security
///
/// - The nonce MUST NOT be reused with the same key
/// - The key MUST be randomly chosen from a uniform distribution
///
/// # Example
///
/// ```rust
/// use hiae::encrypt;
///
/// let key = [0u8; 32];
/// let nonce = [0u8; 16];
///
/// let (ciphertext, tag) = encrypt(b"secret message", b"public header", &key, &nonce)?;
/// # Ok::<(), hiae::Error>(())
/// ```
pub fn encrypt(
    plaintext: &[u8],
    aad: &[u8],
    key: &[u8],
    nonce: &[u8],
) -> Result<(Vec<u8>, [u8; 16])> {
    core::encrypt(plaintext, aad, key, nonce)
}

/// Decrypts ciphertext and verifies the authentication tag.
///
/// # Arguments
///
/// * `ciphertext` - The encrypted data
/// * `tag` - 128-bit authentication tag (16 bytes)
/// * `aad` - Additional authenticated data (must match encryption)
/// * `key` - 256-bit encryption key (must match encryption)
/// * `nonce` - 128-bit nonce (must match encryption)
///
/// # Returns
///
/// The decrypted plaintext on success, or [`Error::AuthenticationFailed`] if
/// the ciphertext, tag, associated data, key, or nonce do not match the
/// encryption. No plaintext is returned on failure.
///
/// # Example
///
/// ```rust
/// use hiae::{encrypt, decrypt};
///
/// let key = [0u8; 32];
/// let nonce = [0u8; 16];
///
/// let (ciphertext, tag) = encrypt(b"secret message", b"public header", &key, &nonce)?;
/// let decrypted = decrypt(&ciphertext, &tag, b"public header", &key, &nonce)?;
///
/// assert_eq!(decrypted, b"secret message");
/// # Ok::<(), hiae::Error>(())
/// ```
pub fn decrypt(
    ciphertext: &[u8],
    tag: &[u8],
    aad: &[u8],
    key: &[u8],
    nonce: &[u8],
) -> Result<Vec<u8>> {
    core::decrypt(ciphertext, tag, aad, key, nonce)
}

/// Encrypts into caller-provided output buffers without allocating.
///
/// `ct_out` must be at least as long as `plaintext`; the ciphertext is
/// written to its first `plaintext.len()` bytes and the tag to `tag_out`.
pub fn encrypt_to(
    plaintext: &[u8],
    aad: &[u8],
    key: &[u8],
    nonce: &[u8],
    ct_out: &mut [u8],
    tag_out: &mut [u8; 16],
) -> Result<()> {
    core::encrypt_to(plaintext, aad, key, nonce, ct_out, tag_out)
}

/// Decrypts into a caller-provided output buffer without allocating.
///
/// `msg_out` must be at least as long as `ciphertext`; the plaintext is
/// written to its first `ciphertext.len()` bytes. On authentication failure
/// those bytes are zeroized before the error is returned.
pub fn decrypt_to(
    ciphertext: &[u8],
    tag: &[u8],
    aad: &[u8],
    key: &[u8],
    nonce: &[u8],
    msg_out: &mut [u8],
) -> Result<()> {
    core::decrypt_to(ciphertext, tag, aad, key, nonce, msg_out)
}
