//! x86_64 byte blends using SSE4.1, AVX2 and AVX-512BW.
//!
//! These functions are unsafe and require the matching target feature,
//! either enabled for the whole build or verified at runtime. The safe API in
//! `dispatch` handles this.
//!
//! Every kernel computes, per byte, `out = if mask & 0x80 { b } else { a }`.
//! Partition masks are whole lanes of `0x00` or `0xFF`, so the byte blend is a
//! lane blend for every lane size.
//!
//! | ISA | Register | Instruction |
//! |-----|----------|-------------|
//! | SSE4.1 | 128-bit | `pblendvb` |
//! | AVX2 | 256-bit | `vpblendvb` |
//! | AVX-512BW | 512-bit | `vpmovb2m` + `vmovdqu8` with mask |

/// SSE4.1 blend of one 128-bit register.
///
/// # Safety
///
/// Caller must verify `is_x86_feature_detected!("sse4.1")` (or build with
/// the feature enabled), and every slice must hold at least 16 bytes.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.1")]
pub unsafe fn blend_sse41(a: &[u8], b: &[u8], mask: &[u8], out: &mut [u8]) {
    use std::arch::x86_64::{_mm_blendv_epi8, _mm_loadu_si128, _mm_storeu_si128};

    debug_assert!(a.len() >= 16 && b.len() >= 16 && mask.len() >= 16 && out.len() >= 16);

    let va = _mm_loadu_si128(a.as_ptr().cast());
    let vb = _mm_loadu_si128(b.as_ptr().cast());
    let vm = _mm_loadu_si128(mask.as_ptr().cast());
    _mm_storeu_si128(out.as_mut_ptr().cast(), _mm_blendv_epi8(va, vb, vm));
}

/// AVX2 blend of one 256-bit register.
///
/// # Safety
///
/// Caller must verify `is_x86_feature_detected!("avx2")` (or build with the
/// feature enabled), and every slice must hold at least 32 bytes.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn blend_avx2(a: &[u8], b: &[u8], mask: &[u8], out: &mut [u8]) {
    use std::arch::x86_64::{_mm256_blendv_epi8, _mm256_loadu_si256, _mm256_storeu_si256};

    debug_assert!(a.len() >= 32 && b.len() >= 32 && mask.len() >= 32 && out.len() >= 32);

    let va = _mm256_loadu_si256(a.as_ptr().cast());
    let vb = _mm256_loadu_si256(b.as_ptr().cast());
    let vm = _mm256_loadu_si256(mask.as_ptr().cast());
    _mm256_storeu_si256(out.as_mut_ptr().cast(), _mm256_blendv_epi8(va, vb, vm));
}

/// AVX-512BW blend of one 512-bit register.
///
/// The byte mask is first turned into a 64-bit predicate from each byte's
/// sign bit, then drives a masked move of `b` over `a`.
///
/// # Safety
///
/// Caller must verify `is_x86_feature_detected!("avx512f")` and
/// `is_x86_feature_detected!("avx512bw")` (or build with both enabled), and
/// every slice must hold at least 64 bytes.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f,avx512bw")]
pub unsafe fn blend_avx512(a: &[u8], b: &[u8], mask: &[u8], out: &mut [u8]) {
    use std::arch::x86_64::{
        _mm512_loadu_epi8, _mm512_mask_mov_epi8, _mm512_movepi8_mask, _mm512_storeu_epi8,
    };

    debug_assert!(a.len() >= 64 && b.len() >= 64 && mask.len() >= 64 && out.len() >= 64);

    let va = _mm512_loadu_epi8(a.as_ptr().cast());
    let vb = _mm512_loadu_epi8(b.as_ptr().cast());
    let k = _mm512_movepi8_mask(_mm512_loadu_epi8(mask.as_ptr().cast()));
    _mm512_storeu_epi8(out.as_mut_ptr().cast(), _mm512_mask_mov_epi8(va, k, vb));
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference byte blend.
    fn blend_reference(a: &[u8], b: &[u8], mask: &[u8]) -> Vec<u8> {
        a.iter()
            .zip(b)
            .zip(mask)
            .map(|((&x, &y), &m)| if m & 0x80 != 0 { y } else { x })
            .collect()
    }

    fn operands(len: usize) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        let a: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let b: Vec<u8> = (0..len).map(|i| 0xA0 ^ (i as u8)).collect();
        // Mixed mask: runs of 0x00/0xFF plus stray sign bits.
        let mask: Vec<u8> = (0..len)
            .map(|i| match i % 5 {
                0 | 1 => 0x00,
                2 => 0xFF,
                3 => 0x80,
                _ => 0x7F,
            })
            .collect();
        (a, b, mask)
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_blend_sse41_correctness() {
        if !is_x86_feature_detected!("sse4.1") {
            eprintln!("SSE4.1 not available, skipping test");
            return;
        }

        let (a, b, mask) = operands(16);
        let mut out = [0u8; 16];
        unsafe { blend_sse41(&a, &b, &mask, &mut out) };
        assert_eq!(out.to_vec(), blend_reference(&a, &b, &mask));
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_blend_avx2_correctness() {
        if !is_x86_feature_detected!("avx2") {
            eprintln!("AVX2 not available, skipping test");
            return;
        }

        let (a, b, mask) = operands(32);
        let mut out = [0u8; 32];
        unsafe { blend_avx2(&a, &b, &mask, &mut out) };
        assert_eq!(out.to_vec(), blend_reference(&a, &b, &mask));
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_blend_avx512_correctness() {
        if !is_x86_feature_detected!("avx512f") || !is_x86_feature_detected!("avx512bw") {
            eprintln!("AVX-512BW not available, skipping test");
            return;
        }

        let (a, b, mask) = operands(64);
        let mut out = [0u8; 64];
        unsafe { blend_avx512(&a, &b, &mask, &mut out) };
        assert_eq!(out.to_vec(), blend_reference(&a, &b, &mask));
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_sse41_vs_avx2_consistency() {
        if !is_x86_feature_detected!("sse4.1") || !is_x86_feature_detected!("avx2") {
            eprintln!("Need both SSE4.1 and AVX2, skipping");
            return;
        }

        // Two 128-bit blends must match one 256-bit blend.
        let (a, b, mask) = operands(32);
        let mut narrow = [0u8; 32];
        let mut wide = [0u8; 32];
        unsafe {
            blend_sse41(&a[..16], &b[..16], &mask[..16], &mut narrow[..16]);
            blend_sse41(&a[16..], &b[16..], &mask[16..], &mut narrow[16..]);
            blend_avx2(&a, &b, &mask, &mut wide);
        }
        assert_eq!(narrow, wide);
    }
}
