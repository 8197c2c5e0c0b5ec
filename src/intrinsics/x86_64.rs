//! x86-64 AES-NI implementation.

#![allow(unsafe_code)]

use core::arch::x86_64::*;

/// One AES round with an all-zero round key, which is exactly AESL.
///
/// # Safety
///
/// The CPU must support the `aes` target feature.
#[target_feature(enable = "aes")]
pub(crate) unsafe fn aesl_unchecked(block: &[u8; 16]) -> [u8; 16] {
    let input = _mm_loadu_si128(block.as_ptr() as *const __m128i);
    let zero_key = _mm_setzero_si128();
    let result = _mm_aesenc_si128(input, zero_key);

    let mut output = [0u8; 16];
    _mm_storeu_si128(output.as_mut_ptr() as *mut __m128i, result);
    output
}

/// Safe wrapper, available when `aes` is a compile-time target feature.
#[cfg(target_feature = "aes")]
#[inline]
pub fn aesl(block: &[u8; 16]) -> [u8; 16] {
    unsafe { aesl_unchecked(block) }
}

/// XOR-reduce sixteen blocks using SSE2 (baseline on x86-64).
#[inline]
pub fn xor_reduce_blocks(blocks: &[[u8; 16]; 16]) -> [u8; 16] {
    unsafe { xor_reduce_blocks_impl(blocks) }
}

#[target_feature(enable = "sse2")]
unsafe fn xor_reduce_blocks_impl(blocks: &[[u8; 16]; 16]) -> [u8; 16] {
    let mut result = _mm_loadu_si128(blocks[0].as_ptr() as *const __m128i);
    for block in blocks.iter().skip(1) {
        let block_vec = _mm_loadu_si128(block.as_ptr() as *const __m128i);
        result = _mm_xor_si128(result, block_vec);
    }

    let mut output = [0u8; 16];
    _mm_storeu_si128(output.as_mut_ptr() as *mut __m128i, result);
    output
}
