//! ARMv8 Crypto Extensions implementation.

#![allow(unsafe_code)]

use core::arch::aarch64::*;

/// One AES round with an all-zero round key, which is exactly AESL.
///
/// `AESE` performs SubBytes and ShiftRows (plus the zero key add), `AESMC`
/// performs MixColumns.
///
/// # Safety
///
/// The CPU must support the `neon` and `aes` target features.
#[target_feature(enable = "neon,aes")]
pub(crate) unsafe fn aesl_unchecked(block: &[u8; 16]) -> [u8; 16] {
    let input = vld1q_u8(block.as_ptr());
    let zero_key = vdupq_n_u8(0);
    let after_sub_shift = vaeseq_u8(input, zero_key);
    let result = vaesmcq_u8(after_sub_shift);

    let mut output = [0u8; 16];
    vst1q_u8(output.as_mut_ptr(), result);
    output
}

/// Safe wrapper, available when `neon` and `aes` are compile-time target
/// features.
#[cfg(all(target_feature = "neon", target_feature = "aes"))]
#[inline]
pub fn aesl(block: &[u8; 16]) -> [u8; 16] {
    unsafe { aesl_unchecked(block) }
}

/// XOR-reduce sixteen blocks using NEON (baseline on aarch64).
#[inline]
pub fn xor_reduce_blocks(blocks: &[[u8; 16]; 16]) -> [u8; 16] {
    unsafe { xor_reduce_blocks_impl(blocks) }
}

#[target_feature(enable = "neon")]
unsafe fn xor_reduce_blocks_impl(blocks: &[[u8; 16]; 16]) -> [u8; 16] {
    let mut result = vld1q_u8(blocks[0].as_ptr());
    for block in blocks.iter().skip(1) {
        let block_vec = vld1q_u8(block.as_ptr());
        result = veorq_u8(result, block_vec);
    }

    let mut output = [0u8; 16];
    vst1q_u8(output.as_mut_ptr(), result);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aesl_reference_vector() {
        if !std::arch::is_aarch64_feature_detected!("aes") {
            return;
        }
        let input = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ];
        let expected = [
            0x63, 0x79, 0xe6, 0xd9, 0xf4, 0x67, 0xfb, 0x76, 0xad, 0x06, 0x3c, 0xf4, 0xd2, 0xeb,
            0x8a, 0xa3,
        ];
        assert_eq!(unsafe { aesl_unchecked(&input) }, expected);
    }
}
