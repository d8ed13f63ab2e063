//! The partition mask table.
//!
//! 64 zero bytes followed by 64 `0xFF` bytes. Viewed as `k`-byte lanes it is
//! `64/k` zero lanes then `64/k` all-ones lanes, so a window of `N` lanes
//! starting at `64/k - offset` is exactly "first `offset` lanes zero, the rest
//! ones". A 512-bit register is 64 bytes, so every window for every offset in
//! `0..=N` stays inside the table.

use std::ops::Range;

use crate::element::Element;
use crate::vector::{Lanes, Vector};

/// Bytes in each half of the table.
pub const HALF: usize = 64;

/// Backing storage for [`PARTITION_MASK`].
///
/// Aligned to 64 bytes so it can be viewed as `u16`, `u32` or `u64` lanes in
/// place.
#[repr(C, align(64))]
pub struct PartitionMaskTable([u8; 2 * HALF]);

/// The single, immutable partition mask table.
pub static PARTITION_MASK: PartitionMaskTable = PartitionMaskTable::new();

impl PartitionMaskTable {
    const fn new() -> Self {
        let mut bytes = [0u8; 2 * HALF];
        let mut i = HALF;
        while i < 2 * HALF {
            bytes[i] = 0xFF;
            i += 1;
        }
        Self(bytes)
    }

    /// The raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 2 * HALF] {
        &self.0
    }

    /// The table reinterpreted as lanes of `T`'s mask scalar.
    #[inline(always)]
    #[must_use]
    pub fn lanes<T: Element>(&self) -> &[T::Bits] {
        bytemuck::cast_slice(&self.0[..])
    }

    /// Byte range covered by the mask of `lanes` lanes of `lane_size` bytes
    /// at `offset`.
    ///
    /// # Panics
    ///
    /// If `offset > lanes` or the window is wider than 64 bytes.
    #[inline(always)]
    #[must_use]
    pub fn window(lane_size: usize, lanes: usize, offset: usize) -> Range<usize> {
        assert!(
            offset <= lanes,
            "partition_mask: offset {} out of range for {} lanes",
            offset,
            lanes
        );
        assert!(
            lanes * lane_size <= HALF,
            "partition_mask: {}-byte register exceeds the 512-bit maximum",
            lanes * lane_size
        );
        let start = (HALF / lane_size - offset) * lane_size;
        start..start + lanes * lane_size
    }
}

/// Mask whose first `offset` lanes are all-zero bits and the rest all-one
/// bits.
///
/// # Panics
///
/// If `offset > V::WIDTH` or `V` is wider than 512 bits, in every build
/// profile.
#[inline(always)]
#[must_use]
pub fn partition_mask<V: Lanes>(offset: usize) -> V {
    let size = <V::Scalar as Element>::SIZE;
    let start = PartitionMaskTable::window(size, V::WIDTH, offset).start / size;
    let table = PARTITION_MASK.lanes::<V::Scalar>();
    V::from_fn(|i| <V::Scalar as Element>::from_bits(table[start + i]))
}

/// [`partition_mask`] for a concrete `Vector<T, N>`.
#[inline(always)]
#[must_use]
pub fn partition_mask_of<T: Element, const N: usize>(offset: usize) -> Vector<T, N> {
    partition_mask::<Vector<T, N>>(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        let bytes = PARTITION_MASK.as_bytes();
        assert!(bytes[..HALF].iter().all(|&b| b == 0x00));
        assert!(bytes[HALF..].iter().all(|&b| b == 0xFF));
        assert_eq!(bytes.as_ptr() as usize % 64, 0);
    }

    #[test]
    fn test_lane_views() {
        assert_eq!(PARTITION_MASK.lanes::<u8>().len(), 128);
        assert_eq!(PARTITION_MASK.lanes::<i16>().len(), 64);
        assert_eq!(PARTITION_MASK.lanes::<f32>().len(), 32);
        let wide = PARTITION_MASK.lanes::<u64>();
        assert_eq!(wide[7], 0);
        assert_eq!(wide[8], u64::MAX);
    }

    #[test]
    fn test_window_edges() {
        assert_eq!(PartitionMaskTable::window(1, 64, 0), 64..128);
        assert_eq!(PartitionMaskTable::window(1, 64, 64), 0..64);
        assert_eq!(PartitionMaskTable::window(8, 2, 1), 56..72);
    }

    #[test]
    fn test_partition_mask_i32x8() {
        let m = partition_mask_of::<i32, 8>(3);
        assert_eq!(m.to_array(), [0, 0, 0, -1, -1, -1, -1, -1]);
    }

    #[test]
    fn test_partition_mask_extremes() {
        let none = partition_mask_of::<u16, 8>(0);
        assert!(none.all_bits(u16::MAX));
        let all = partition_mask_of::<u16, 8>(8);
        assert!(all.all_bits(0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_partition_mask_offset_too_large() {
        let _ = partition_mask_of::<u8, 16>(17);
    }

    #[test]
    #[should_panic(expected = "512-bit maximum")]
    fn test_partition_mask_register_too_wide() {
        let _ = partition_mask_of::<u64, 16>(0);
    }
}
