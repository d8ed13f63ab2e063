//! Pattern constructors: vectors filled by a positional rule rather than
//! from data.

use crate::catalog::Catalogued;
use crate::dispatch;
use crate::element::{Element, MaskBits};
use crate::mask;
use crate::vector::{Lanes, Vector};

/// Constructors for vectors whose lanes follow a simple positional rule.
///
/// Every method has a portable default, so any [`Lanes`] type gets a correct
/// implementation from an empty `impl Pattern for T {}`. The catalogued
/// `Vector<T, N>` types override [`Pattern::partition`] with the blend path
/// when the build enables it.
///
/// # Example
///
/// ```rust
/// use vpat::{i32x8, Pattern};
///
/// assert_eq!(i32x8::partition(7, 3, 3).to_array(), [7, 7, 7, 3, 3, 3, 3, 3]);
/// assert_eq!(i32x8::halfs(7, 3).to_array(), [7, 7, 7, 7, 3, 3, 3, 3]);
/// assert_eq!(i32x8::partition_mask(3).to_array(), [0, 0, 0, -1, -1, -1, -1, -1]);
/// ```
pub trait Pattern: Lanes {
    /// First half of the lanes `hi`, second half `lo`.
    ///
    /// # Panics
    ///
    /// If the lane count is odd.
    #[inline(always)]
    fn halfs(hi: Self::Scalar, lo: Self::Scalar) -> Self {
        assert!(Self::WIDTH % 2 == 0, "halfs: odd lane count {}", Self::WIDTH);
        let half = Self::WIDTH / 2;
        Self::from_fn(|i| if i < half { hi } else { lo })
    }

    /// Even lanes `hi`, odd lanes `lo`.
    ///
    /// # Panics
    ///
    /// If the lane count is odd.
    #[inline(always)]
    fn interleave(hi: Self::Scalar, lo: Self::Scalar) -> Self {
        assert!(Self::WIDTH % 2 == 0, "interleave: odd lane count {}", Self::WIDTH);
        Self::from_fn(|i| if i % 2 == 0 { hi } else { lo })
    }

    /// First `offset` lanes `hi`, the rest `lo`.
    ///
    /// `offset == 0` is all `lo`, `offset == WIDTH` all `hi`, and
    /// `offset == WIDTH / 2` equals [`Pattern::halfs`].
    ///
    /// # Panics
    ///
    /// If `offset > WIDTH`.
    #[inline(always)]
    fn partition(hi: Self::Scalar, lo: Self::Scalar, offset: usize) -> Self {
        dispatch::partition_portable(hi, lo, offset)
    }

    /// First `offset` lanes all-zero bits, the rest all-one bits.
    ///
    /// # Panics
    ///
    /// If `offset > WIDTH` or the vector is wider than 512 bits.
    #[inline(always)]
    fn partition_mask(offset: usize) -> Self {
        mask::partition_mask(offset)
    }

    /// Every lane all-one bits. For float lanes this is a NaN pattern, not
    /// `1.0`.
    #[inline(always)]
    fn ones() -> Self {
        Self::splat_bits(<<Self::Scalar as Element>::Bits as MaskBits>::ONES)
    }

    /// Every lane all-zero bits.
    #[inline(always)]
    fn zeroes() -> Self {
        Self::splat_bits(<<Self::Scalar as Element>::Bits as MaskBits>::ZEROES)
    }
}

impl<T: Element, const N: usize> Pattern for Vector<T, N>
where
    Self: Catalogued + Lanes<Scalar = T>,
{
    #[inline(always)]
    fn partition(hi: T, lo: T, offset: usize) -> Self {
        dispatch::partition(hi, lo, offset)
    }
}
