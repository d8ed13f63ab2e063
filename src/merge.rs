//! Lane-wise merging of two vectors.
//!
//! Each merge is one [`select`](crate::dispatch::select) driven by a pattern
//! mask, so it takes the same accelerated or portable path as `partition`.

use crate::catalog::Catalogued;
use crate::dispatch;
use crate::element::{Element, MaskBits};
use crate::pattern::Pattern;
use crate::vector::{Lanes, Vector};

/// Combine the lanes of two vectors by position.
pub trait Merge: Pattern {
    /// First half of the lanes from `self`, second half from `other`.
    ///
    /// ```rust
    /// use vpat::{u8x16, Merge, Pattern};
    ///
    /// assert_eq!(u8x16::splat(2).merge_halves(u8x16::splat(3)), u8x16::halfs(2, 3));
    /// ```
    #[inline(always)]
    fn merge_halves(&self, other: Self) -> Self {
        let half = Self::WIDTH / 2;
        Self::from_fn(|i| if i < half { self.extract(i) } else { other.extract(i) })
    }

    /// Even lanes from `self`, odd lanes from `other`.
    #[inline(always)]
    fn merge_interleaved(&self, other: Self) -> Self {
        Self::from_fn(|i| if i % 2 == 0 { self.extract(i) } else { other.extract(i) })
    }

    /// First `offset` lanes from `self`, the rest from `other`.
    ///
    /// # Panics
    ///
    /// If `offset > WIDTH`.
    #[inline(always)]
    fn merge_partitioned(&self, other: Self, offset: usize) -> Self {
        check_offset(offset, Self::WIDTH);
        Self::from_fn(|i| if i < offset { self.extract(i) } else { other.extract(i) })
    }
}

impl<T: Element, const N: usize> Merge for Vector<T, N>
where
    Self: Catalogued + Lanes<Scalar = T>,
{
    #[inline(always)]
    fn merge_halves(&self, other: Self) -> Self {
        dispatch::select(*self, other, Self::partition_mask(N / 2))
    }

    #[inline(always)]
    fn merge_interleaved(&self, other: Self) -> Self {
        let mask = Self::interleave(
            T::from_bits(<T::Bits as MaskBits>::ZEROES),
            T::from_bits(<T::Bits as MaskBits>::ONES),
        );
        dispatch::select(*self, other, mask)
    }

    #[inline(always)]
    fn merge_partitioned(&self, other: Self, offset: usize) -> Self {
        check_offset(offset, N);
        dispatch::select(*self, other, Self::partition_mask(offset))
    }
}

#[inline(always)]
#[track_caller]
fn check_offset(offset: usize, lanes: usize) {
    assert!(
        offset <= lanes,
        "merge_partitioned: offset {} out of range for {} lanes",
        offset,
        lanes
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    #[test]
    fn test_merge_splats_match_patterns() {
        let a = u32x8::splat(2);
        let b = u32x8::splat(3);
        assert_eq!(a.merge_halves(b), u32x8::halfs(2, 3));
        assert_eq!(a.merge_interleaved(b), u32x8::interleave(2, 3));
        for offset in 0..=8 {
            assert_eq!(a.merge_partitioned(b, offset), u32x8::partition(2, 3, offset));
        }
    }

    #[test]
    fn test_merge_keeps_lane_positions() {
        let a = i16x8::new([0, 1, 2, 3, 4, 5, 6, 7]);
        let b = i16x8::new([10, 11, 12, 13, 14, 15, 16, 17]);
        assert_eq!(a.merge_halves(b).to_array(), [0, 1, 2, 3, 14, 15, 16, 17]);
        assert_eq!(a.merge_interleaved(b).to_array(), [0, 11, 2, 13, 4, 15, 6, 17]);
        assert_eq!(a.merge_partitioned(b, 3).to_array(), [0, 1, 2, 13, 14, 15, 16, 17]);
    }

    #[test]
    fn test_merge_float_nan_lanes_survive() {
        let a = f64x2::splat(f64::NAN);
        let b = f64x2::splat(1.0);
        let m = a.merge_halves(b);
        assert!(m.extract(0).is_nan());
        assert_eq!(m.extract(1), 1.0);
    }

    fn alternate<T: Element, const N: usize>(a: Vector<T, N>, b: Vector<T, N>) -> Vector<T, N>
    where
        Vector<T, N>: Merge + Lanes<Scalar = T>,
    {
        a.merge_interleaved(b)
    }

    #[test]
    fn test_catalogued_merge_is_generic_over_scalar() {
        let m = alternate(u64x4::splat(1), u64x4::splat(2));
        assert_eq!(m.to_array(), [1, 2, 1, 2]);
        let f = alternate(f32x4::splat(f32::NAN), f32x4::splat(0.5));
        assert!(f.extract(0).is_nan() && f.extract(2).is_nan());
        assert_eq!((f.extract(1), f.extract(3)), (0.5, 0.5));
    }

    #[test]
    #[should_panic(expected = "merge_partitioned: offset 33 out of range for 32 lanes")]
    fn test_merge_partitioned_out_of_range() {
        let a = u8x32::splat(1);
        let _ = a.merge_partitioned(a, 33);
    }
}
