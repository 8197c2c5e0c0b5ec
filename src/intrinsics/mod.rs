//! Platform-specific intrinsics behind the AESL capability boundary.
//!
//! The implementation is selected once: at compile time when the relevant
//! target features are enabled, otherwise through a one-time runtime CPU
//! probe (with `std`). The probe result is cached in an atomic and read-only
//! afterwards; without hardware support the constant-time bitsliced software
//! implementation is used.

#![allow(unsafe_code)]

/// AES round function without key addition: MixColumns(ShiftRows(SubBytes(x))).
#[inline]
pub fn aesl(block: &[u8; 16]) -> [u8; 16] {
    #[cfg(all(
        target_arch = "aarch64",
        target_feature = "neon",
        target_feature = "aes"
    ))]
    return aarch64::aesl(block);

    #[cfg(all(
        target_arch = "aarch64",
        not(all(target_feature = "neon", target_feature = "aes")),
        feature = "std"
    ))]
    if detect::aes_available() {
        return unsafe { aarch64::aesl_unchecked(block) };
    }

    #[cfg(all(target_arch = "x86_64", target_feature = "aes"))]
    return x86_64::aesl(block);

    #[cfg(all(target_arch = "x86_64", not(target_feature = "aes"), feature = "std"))]
    if detect::aes_available() {
        return unsafe { x86_64::aesl_unchecked(block) };
    }

    #[allow(unreachable_code)]
    fallback::aesl(block)
}

/// XOR-reduce the sixteen state blocks into a single block.
#[inline]
pub fn xor_reduce_blocks(blocks: &[[u8; 16]; 16]) -> [u8; 16] {
    #[cfg(target_arch = "aarch64")]
    return aarch64::xor_reduce_blocks(blocks);

    #[cfg(target_arch = "x86_64")]
    return x86_64::xor_reduce_blocks(blocks);

    #[allow(unreachable_code)]
    fallback::xor_reduce_blocks(blocks)
}

#[cfg(all(
    feature = "std",
    any(
        all(target_arch = "x86_64", not(target_feature = "aes")),
        all(
            target_arch = "aarch64",
            not(all(target_feature = "neon", target_feature = "aes"))
        )
    )
))]
mod detect {
    use core::sync::atomic::{AtomicU8, Ordering};

    const UNPROBED: u8 = 0;
    const SOFTWARE: u8 = 1;
    const HARDWARE: u8 = 2;

    static AES_SUPPORT: AtomicU8 = AtomicU8::new(UNPROBED);

    /// Whether hardware AES instructions may be used on this CPU.
    ///
    /// First call performs the probe; later calls read the cached result.
    #[inline]
    pub fn aes_available() -> bool {
        match AES_SUPPORT.load(Ordering::Relaxed) {
            UNPROBED => probe(),
            state => state == HARDWARE,
        }
    }

    #[cold]
    fn probe() -> bool {
        #[cfg(target_arch = "x86_64")]
        let available = std::arch::is_x86_feature_detected!("aes");
        #[cfg(target_arch = "aarch64")]
        let available = std::arch::is_aarch64_feature_detected!("aes")
            && std::arch::is_aarch64_feature_detected!("neon");

        AES_SUPPORT.store(
            if available { HARDWARE } else { SOFTWARE },
            Ordering::Relaxed,
        );
        available
    }
}

#[cfg(target_arch = "aarch64")]
mod aarch64;

#[cfg(target_arch = "x86_64")]
mod x86_64;

mod fallback;
