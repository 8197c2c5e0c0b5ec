//! Core HiAE algorithm implementation.

use crate::error::{Error, Result};
use crate::intrinsics;
use crate::utils::{self, ct_eq, le64, xor_block};
use crate::{BLOCK_LEN, STATE_LEN, TAG_LEN};
use alloc::vec;
use alloc::vec::Vec;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// HiAE constants C0 and C1 (domain separation constants).
const C0: [u8; 16] = [
    0x32, 0x43, 0xF6, 0xA8, 0x88, 0x5A, 0x30, 0x8D, 0x31, 0x31, 0x98, 0xA2, 0xE0, 0x37, 0x07, 0x34,
];
const C1: [u8; 16] = [
    0x4A, 0x40, 0x93, 0x82, 0x22, 0x99, 0xF3, 0x1D, 0x00, 0x82, 0xEF, 0xA9, 0x8E, 0xC4, 0xE6, 0xC8,
];

/// Bytes consumed by one 16-block batch.
const BATCH_LEN: usize = STATE_LEN * BLOCK_LEN;

/// HiAE state: sixteen 128-bit blocks plus a rotation offset.
///
/// Logical index `i` lives at physical slot `(i + offset) % 16`, so a state
/// rotation is a counter increment rather than a 256-byte shuffle.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct HiaeState {
    blocks: [[u8; 16]; 16],
    offset: usize,
}

impl HiaeState {
    /// Create a new zero-initialized state.
    fn new() -> Self {
        Self {
            blocks: [[0u8; 16]; 16],
            offset: 0,
        }
    }

    /// Rotate the state left by one position. No data moves.
    #[inline]
    fn rol(&mut self) {
        self.offset = (self.offset + 1) % STATE_LEN;
    }

    /// Physical slot of logical index `i` at the current rotation.
    #[inline]
    fn slot(&self, i: usize) -> usize {
        (i + self.offset) % STATE_LEN
    }

    /// Absorb one input block without producing output.
    #[inline]
    fn update(&mut self, xi: &[u8; 16]) {
        let i0 = self.slot(0);
        let i1 = self.slot(1);
        let i3 = self.slot(3);
        let i13 = self.slot(13);

        let t = xor_block(
            &intrinsics::aesl(&xor_block(&self.blocks[i0], &self.blocks[i1])),
            xi,
        );
        self.blocks[i0] = xor_block(&intrinsics::aesl(&self.blocks[i13]), &t);
        self.blocks[i3] = xor_block(&self.blocks[i3], xi);
        self.blocks[i13] = xor_block(&self.blocks[i13], xi);
        self.rol();
    }

    /// Encrypt one plaintext block.
    #[inline]
    fn update_enc(&mut self, mi: &[u8; 16]) -> [u8; 16] {
        let i0 = self.slot(0);
        let i1 = self.slot(1);
        let i3 = self.slot(3);
        let i9 = self.slot(9);
        let i13 = self.slot(13);

        let t = xor_block(
            &intrinsics::aesl(&xor_block(&self.blocks[i0], &self.blocks[i1])),
            mi,
        );
        let ci = xor_block(&t, &self.blocks[i9]);
        self.blocks[i0] = xor_block(&intrinsics::aesl(&self.blocks[i13]), &t);
        self.blocks[i3] = xor_block(&self.blocks[i3], mi);
        self.blocks[i13] = xor_block(&self.blocks[i13], mi);
        self.rol();
        ci
    }

    /// Decrypt one ciphertext block.
    #[inline]
    fn update_dec(&mut self, ci: &[u8; 16]) -> [u8; 16] {
        let i0 = self.slot(0);
        let i1 = self.slot(1);
        let i3 = self.slot(3);
        let i9 = self.slot(9);
        let i13 = self.slot(13);

        let t = xor_block(ci, &self.blocks[i9]);
        let mi = xor_block(
            &intrinsics::aesl(&xor_block(&self.blocks[i0], &self.blocks[i1])),
            &t,
        );
        self.blocks[i0] = xor_block(&intrinsics::aesl(&self.blocks[i13]), &t);
        self.blocks[i3] = xor_block(&self.blocks[i3], &mi);
        self.blocks[i13] = xor_block(&self.blocks[i13], &mi);
        self.rol();
        mi
    }

    /// `update` with the rotation resolved at compile time. Only meaningful
    /// at `offset == 0`; sixteen consecutive calls with `I = 0..16` return
    /// the rotation to identity, so the offset is left untouched.
    #[inline]
    fn update_at<const I: usize>(&mut self, xi: &[u8; 16]) {
        let t = xor_block(
            &intrinsics::aesl(&xor_block(&self.blocks[I], &self.blocks[(I + 1) % 16])),
            xi,
        );
        self.blocks[I] = xor_block(&intrinsics::aesl(&self.blocks[(I + 13) % 16]), &t);
        self.blocks[(I + 3) % 16] = xor_block(&self.blocks[(I + 3) % 16], xi);
        self.blocks[(I + 13) % 16] = xor_block(&self.blocks[(I + 13) % 16], xi);
    }

    /// `update_enc` with the rotation resolved at compile time.
    #[inline]
    fn update_enc_at<const I: usize>(&mut self, mi: &[u8; 16]) -> [u8; 16] {
        let t = xor_block(
            &intrinsics::aesl(&xor_block(&self.blocks[I], &self.blocks[(I + 1) % 16])),
            mi,
        );
        let ci = xor_block(&t, &self.blocks[(I + 9) % 16]);
        self.blocks[I] = xor_block(&intrinsics::aesl(&self.blocks[(I + 13) % 16]), &t);
        self.blocks[(I + 3) % 16] = xor_block(&self.blocks[(I + 3) % 16], mi);
        self.blocks[(I + 13) % 16] = xor_block(&self.blocks[(I + 13) % 16], mi);
        ci
    }

    /// `update_dec` with the rotation resolved at compile time.
    #[inline]
    fn update_dec_at<const I: usize>(&mut self, ci: &[u8; 16]) -> [u8; 16] {
        let t = xor_block(ci, &self.blocks[(I + 9) % 16]);
        let mi = xor_block(
            &intrinsics::aesl(&xor_block(&self.blocks[I], &self.blocks[(I + 1) % 16])),
            &t,
        );
        self.blocks[I] = xor_block(&intrinsics::aesl(&self.blocks[(I + 13) % 16]), &t);
        self.blocks[(I + 3) % 16] = xor_block(&self.blocks[(I + 3) % 16], &mi);
        self.blocks[(I + 13) % 16] = xor_block(&self.blocks[(I + 13) % 16], &mi);
        mi
    }

    /// Absorb a batch of 16 blocks of associated data.
    ///
    /// Requires and preserves `offset == 0`.
    #[inline]
    fn absorb_batch(&mut self, ai: &[[u8; 16]; 16]) {
        debug_assert_eq!(self.offset, 0);
        self.update_at::<0>(&ai[0]);
        self.update_at::<1>(&ai[1]);
        self.update_at::<2>(&ai[2]);
        self.update_at::<3>(&ai[3]);
        self.update_at::<4>(&ai[4]);
        self.update_at::<5>(&ai[5]);
        self.update_at::<6>(&ai[6]);
        self.update_at::<7>(&ai[7]);
        self.update_at::<8>(&ai[8]);
        self.update_at::<9>(&ai[9]);
        self.update_at::<10>(&ai[10]);
        self.update_at::<11>(&ai[11]);
        self.update_at::<12>(&ai[12]);
        self.update_at::<13>(&ai[13]);
        self.update_at::<14>(&ai[14]);
        self.update_at::<15>(&ai[15]);
    }

    /// Encrypt a batch of 16 blocks.
    ///
    /// Requires and preserves `offset == 0`.
    #[inline]
    fn enc_batch(&mut self, mi: &[[u8; 16]; 16]) -> [[u8; 16]; 16] {
        debug_assert_eq!(self.offset, 0);
        [
            self.update_enc_at::<0>(&mi[0]),
            self.update_enc_at::<1>(&mi[1]),
            self.update_enc_at::<2>(&mi[2]),
            self.update_enc_at::<3>(&mi[3]),
            self.update_enc_at::<4>(&mi[4]),
            self.update_enc_at::<5>(&mi[5]),
            self.update_enc_at::<6>(&mi[6]),
            self.update_enc_at::<7>(&mi[7]),
            self.update_enc_at::<8>(&mi[8]),
            self.update_enc_at::<9>(&mi[9]),
            self.update_enc_at::<10>(&mi[10]),
            self.update_enc_at::<11>(&mi[11]),
            self.update_enc_at::<12>(&mi[12]),
            self.update_enc_at::<13>(&mi[13]),
            self.update_enc_at::<14>(&mi[14]),
            self.update_enc_at::<15>(&mi[15]),
        ]
    }

    /// Decrypt a batch of 16 blocks.
    ///
    /// Requires and preserves `offset == 0`.
    #[inline]
    fn dec_batch(&mut self, ci: &[[u8; 16]; 16]) -> [[u8; 16]; 16] {
        debug_assert_eq!(self.offset, 0);
        [
            self.update_dec_at::<0>(&ci[0]),
            self.update_dec_at::<1>(&ci[1]),
            self.update_dec_at::<2>(&ci[2]),
            self.update_dec_at::<3>(&ci[3]),
            self.update_dec_at::<4>(&ci[4]),
            self.update_dec_at::<5>(&ci[5]),
            self.update_dec_at::<6>(&ci[6]),
            self.update_dec_at::<7>(&ci[7]),
            self.update_dec_at::<8>(&ci[8]),
            self.update_dec_at::<9>(&ci[9]),
            self.update_dec_at::<10>(&ci[10]),
            self.update_dec_at::<11>(&ci[11]),
            self.update_dec_at::<12>(&ci[12]),
            self.update_dec_at::<13>(&ci[13]),
            self.update_dec_at::<14>(&ci[14]),
            self.update_dec_at::<15>(&ci[15]),
        ]
    }

    /// Apply 32 update rounds for full state diffusion.
    fn diffuse(&mut self, x: &[u8; 16]) {
        for _ in 0..32 {
            self.update(x);
        }
    }

    /// Initialize the state from key and nonce.
    fn init(&mut self, key: &[u8; 32], nonce: &[u8; 16]) {
        let mut k0 = [0u8; 16];
        let mut k1 = [0u8; 16];
        k0.copy_from_slice(&key[..16]);
        k1.copy_from_slice(&key[16..]);

        self.offset = 0;
        self.blocks[0] = C0;
        self.blocks[1] = k1;
        self.blocks[2] = *nonce;
        self.blocks[3] = C0;
        self.blocks[4] = [0u8; 16];
        self.blocks[5] = xor_block(nonce, &k0);
        self.blocks[6] = [0u8; 16];
        self.blocks[7] = C1;
        self.blocks[8] = xor_block(nonce, &k1);
        self.blocks[9] = [0u8; 16];
        self.blocks[10] = k1;
        self.blocks[11] = C0;
        self.blocks[12] = C1;
        self.blocks[13] = k1;
        self.blocks[14] = [0u8; 16];
        self.blocks[15] = xor_block(&C0, &C1);

        self.diffuse(&C0);

        // 32 rotations return the offset to 0, so logical and physical
        // indices coincide for the final key mix.
        debug_assert_eq!(self.offset, 0);
        self.blocks[9] = xor_block(&self.blocks[9], &k0);
        self.blocks[13] = xor_block(&self.blocks[13], &k1);

        k0.zeroize();
        k1.zeroize();
    }

    /// Decrypt a trailing partial ciphertext block of 1 to 15 bytes.
    ///
    /// Recovers the keystream the encryptor produced for its zero-padded
    /// final block, reconstructs the ciphertext bytes the encryptor threw
    /// away, and runs a normal block decryption so the state transitions
    /// match the encryption side exactly.
    fn dec_partial(&mut self, cn: &[u8], mn: &mut [u8]) {
        debug_assert!(!cn.is_empty() && cn.len() < BLOCK_LEN);
        debug_assert!(mn.len() >= cn.len());

        let i0 = self.slot(0);
        let i1 = self.slot(1);
        let i9 = self.slot(9);

        let mut padded = [0u8; 16];
        padded[..cn.len()].copy_from_slice(cn);

        let ks = xor_block(
            &xor_block(
                &intrinsics::aesl(&xor_block(&self.blocks[i0], &self.blocks[i1])),
                &padded,
            ),
            &self.blocks[i9],
        );

        let mut ci = [0u8; 16];
        ci[..cn.len()].copy_from_slice(cn);
        ci[cn.len()..].copy_from_slice(&ks[cn.len()..]);

        let mi = self.update_dec(&ci);
        mn[..cn.len()].copy_from_slice(&mi[..cn.len()]);
    }

    /// Generate the authentication tag from the encoded bit lengths.
    fn finalize(&mut self, ad_len_bits: u64, msg_len_bits: u64) -> [u8; 16] {
        let mut t = [0u8; 16];
        t[..8].copy_from_slice(&le64(ad_len_bits));
        t[8..].copy_from_slice(&le64(msg_len_bits));

        self.diffuse(&t);

        // The tag XORs every state block; rotation order is irrelevant to
        // an XOR reduction, so the physical layout can be used directly.
        intrinsics::xor_reduce_blocks(&self.blocks)
    }

    /// Absorb the associated data stream, zero-padding a trailing partial
    /// block.
    fn absorb_ad(&mut self, aad: &[u8]) {
        let mut i = 0;
        if self.offset == 0 {
            while i + BATCH_LEN <= aad.len() {
                let mut batch = [[0u8; 16]; 16];
                for (j, block) in batch.iter_mut().enumerate() {
                    block.copy_from_slice(&aad[i + j * BLOCK_LEN..i + (j + 1) * BLOCK_LEN]);
                }
                self.absorb_batch(&batch);
                i += BATCH_LEN;
            }
        }
        while i + BLOCK_LEN <= aad.len() {
            let mut block = [0u8; 16];
            block.copy_from_slice(&aad[i..i + BLOCK_LEN]);
            self.update(&block);
            i += BLOCK_LEN;
        }
        if i < aad.len() {
            let mut block = [0u8; 16];
            block[..aad.len() - i].copy_from_slice(&aad[i..]);
            self.update(&block);
        }
    }
}

/// Encrypt into caller-provided buffers.
pub fn encrypt_to(
    plaintext: &[u8],
    aad: &[u8],
    key: &[u8],
    nonce: &[u8],
    ct_out: &mut [u8],
    tag_out: &mut [u8; 16],
) -> Result<()> {
    let (key, nonce) = utils::validate_params(key, nonce, aad.len())?;
    if (plaintext.len() as u64) > utils::MAX_DATA_LEN {
        return Err(Error::PlaintextTooLong);
    }
    if ct_out.len() < plaintext.len() {
        return Err(Error::BufferTooSmall);
    }

    let mut state = HiaeState::new();
    state.init(key, nonce);

    state.absorb_ad(aad);

    let mut i = 0;
    if state.offset == 0 {
        while i + BATCH_LEN <= plaintext.len() {
            let mut batch = [[0u8; 16]; 16];
            for (j, block) in batch.iter_mut().enumerate() {
                block.copy_from_slice(&plaintext[i + j * BLOCK_LEN..i + (j + 1) * BLOCK_LEN]);
            }
            let encrypted = state.enc_batch(&batch);
            for (j, block) in encrypted.iter().enumerate() {
                ct_out[i + j * BLOCK_LEN..i + (j + 1) * BLOCK_LEN].copy_from_slice(block);
            }
            i += BATCH_LEN;
        }
    }
    while i + BLOCK_LEN <= plaintext.len() {
        let mut block = [0u8; 16];
        block.copy_from_slice(&plaintext[i..i + BLOCK_LEN]);
        ct_out[i..i + BLOCK_LEN].copy_from_slice(&state.update_enc(&block));
        i += BLOCK_LEN;
    }
    if i < plaintext.len() {
        // Zero-pad the trailing plaintext, encrypt a full block, and keep
        // only the bytes covering the actual message.
        let remainder = plaintext.len() - i;
        let mut block = [0u8; 16];
        block[..remainder].copy_from_slice(&plaintext[i..]);
        let encrypted = state.update_enc(&block);
        ct_out[i..i + remainder].copy_from_slice(&encrypted[..remainder]);
    }

    *tag_out = state.finalize((aad.len() as u64) * 8, (plaintext.len() as u64) * 8);

    Ok(())
}

/// Decrypt into a caller-provided buffer, verifying the tag.
pub fn decrypt_to(
    ciphertext: &[u8],
    tag: &[u8],
    aad: &[u8],
    key: &[u8],
    nonce: &[u8],
    msg_out: &mut [u8],
) -> Result<()> {
    let (key, nonce) = utils::validate_params(key, nonce, aad.len())?;
    if tag.len() != TAG_LEN {
        return Err(Error::InvalidTagLength);
    }
    if (ciphertext.len() as u64) > utils::MAX_DATA_LEN {
        return Err(Error::CiphertextTooLong);
    }
    if msg_out.len() < ciphertext.len() {
        return Err(Error::BufferTooSmall);
    }

    let mut state = HiaeState::new();
    state.init(key, nonce);

    state.absorb_ad(aad);

    let mut i = 0;
    if state.offset == 0 {
        while i + BATCH_LEN <= ciphertext.len() {
            let mut batch = [[0u8; 16]; 16];
            for (j, block) in batch.iter_mut().enumerate() {
                block.copy_from_slice(&ciphertext[i + j * BLOCK_LEN..i + (j + 1) * BLOCK_LEN]);
            }
            let decrypted = state.dec_batch(&batch);
            for (j, block) in decrypted.iter().enumerate() {
                msg_out[i + j * BLOCK_LEN..i + (j + 1) * BLOCK_LEN].copy_from_slice(block);
            }
            i += BATCH_LEN;
        }
    }
    while i + BLOCK_LEN <= ciphertext.len() {
        let mut block = [0u8; 16];
        block.copy_from_slice(&ciphertext[i..i + BLOCK_LEN]);
        msg_out[i..i + BLOCK_LEN].copy_from_slice(&state.update_dec(&block));
        i += BLOCK_LEN;
    }
    if i < ciphertext.len() {
        state.dec_partial(&ciphertext[i..], &mut msg_out[i..]);
    }

    let mut expected_tag = state.finalize((aad.len() as u64) * 8, (ciphertext.len() as u64) * 8);

    if !ct_eq(tag, &expected_tag) {
        msg_out[..ciphertext.len()].zeroize();
        expected_tag.zeroize();
        return Err(Error::AuthenticationFailed);
    }

    Ok(())
}

/// Encrypt plaintext with associated data, allocating the ciphertext.
pub fn encrypt(
    plaintext: &[u8],
    aad: &[u8],
    key: &[u8],
    nonce: &[u8],
) -> Result<(Vec<u8>, [u8; 16])> {
    let mut ciphertext = vec![0u8; plaintext.len()];
    let mut tag = [0u8; 16];
    encrypt_to(plaintext, aad, key, nonce, &mut ciphertext, &mut tag)?;
    Ok((ciphertext, tag))
}

/// Decrypt ciphertext with associated data, allocating the plaintext.
///
/// Nothing is returned unless the tag verifies.
pub fn decrypt(
    ciphertext: &[u8],
    tag: &[u8],
    aad: &[u8],
    key: &[u8],
    nonce: &[u8],
) -> Result<Vec<u8>> {
    let mut plaintext = vec![0u8; ciphertext.len()];
    decrypt_to(ciphertext, tag, aad, key, nonce, &mut plaintext)?;
    Ok(plaintext)
}
