//! aarch64 byte blend using NEON.
//!
//! NEON is baseline on aarch64; the kernel still carries `target_feature` so
//! it is called the same way as the x86_64 ones.
//!
//! Only 128-bit registers have a single-instruction blend here; wider
//! vectors use the portable path.

/// NEON bitwise select of one 128-bit register: `(a & !mask) | (b & mask)`.
///
/// # Safety
///
/// Every slice must hold at least 16 bytes.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn blend_neon(a: &[u8], b: &[u8], mask: &[u8], out: &mut [u8]) {
    use std::arch::aarch64::{vbslq_u8, vld1q_u8, vst1q_u8};

    debug_assert!(a.len() >= 16 && b.len() >= 16 && mask.len() >= 16 && out.len() >= 16);

    let va = vld1q_u8(a.as_ptr());
    let vb = vld1q_u8(b.as_ptr());
    let vm = vld1q_u8(mask.as_ptr());
    vst1q_u8(out.as_mut_ptr(), vbslq_u8(vm, vb, va));
}
