//! Fixed-width vector values.

use std::fmt::Debug;

use crate::element::Element;

/// A vector of `N` lanes of `T`.
///
/// Layout is exactly `[T; N]`; alignment is that of `T`, so the blend kernels
/// always use unaligned loads and stores.
#[derive(Clone, Copy, PartialEq, Debug)]
#[repr(transparent)]
pub struct Vector<T: Element, const N: usize>([T; N]);

// SAFETY: `Vector` is `repr(transparent)` over `[T; N]` and `T: Pod`, so it
// has no padding and every bit pattern is valid.
unsafe impl<T: Element, const N: usize> bytemuck::Zeroable for Vector<T, N> {}
// SAFETY: see above.
unsafe impl<T: Element, const N: usize> bytemuck::Pod for Vector<T, N> {}

impl<T: Element, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self([T::default(); N])
    }
}

impl<T: Element, const N: usize> Vector<T, N> {
    /// Number of lanes.
    pub const WIDTH: usize = N;

    /// Build a vector from its lanes.
    #[inline(always)]
    #[must_use]
    pub const fn new(lanes: [T; N]) -> Self {
        Self(lanes)
    }

    /// Every lane set to `value`.
    #[inline(always)]
    #[must_use]
    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    /// Lane `i` set to `f(i)`.
    #[inline(always)]
    #[must_use]
    pub fn from_fn<F: FnMut(usize) -> T>(f: F) -> Self {
        Self(std::array::from_fn(f))
    }

    /// Load `N` lanes from `data`, starting at `offset`.
    ///
    /// # Panics
    ///
    /// If `data` has fewer than `offset + N` elements.
    #[inline]
    #[must_use]
    pub fn from_slice(data: &[T], offset: usize) -> Self {
        assert!(
            offset.checked_add(N).is_some_and(|end| data.len() >= end),
            "from_slice: need {} elements from offset {}, have {}",
            N,
            offset,
            data.len()
        );
        Self::from_fn(|i| data[offset + i])
    }

    /// Write the `N` lanes into `data`, starting at `offset`.
    ///
    /// # Panics
    ///
    /// If `data` has fewer than `offset + N` elements.
    #[inline]
    pub fn store(self, data: &mut [T], offset: usize) {
        assert!(
            offset.checked_add(N).is_some_and(|end| data.len() >= end),
            "store: need {} elements from offset {}, have {}",
            N,
            offset,
            data.len()
        );
        data[offset..offset + N].copy_from_slice(&self.0);
    }

    /// Lane `i`.
    ///
    /// # Panics
    ///
    /// If `i >= N`.
    #[inline(always)]
    #[must_use]
    pub fn extract(&self, i: usize) -> T {
        self.0[i]
    }

    /// Borrow the lanes.
    #[inline(always)]
    #[must_use]
    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    /// The lanes by value.
    #[inline(always)]
    #[must_use]
    pub fn to_array(self) -> [T; N] {
        self.0
    }

    /// Raw bit pattern of every lane.
    #[inline]
    #[must_use]
    pub fn to_bits(self) -> [T::Bits; N] {
        self.0.map(T::to_bits)
    }

    /// Build a vector from lane bit patterns.
    #[inline]
    #[must_use]
    pub fn from_bits(bits: [T::Bits; N]) -> Self {
        Self(bits.map(T::from_bits))
    }

    /// Bit-level equality. Unlike `==`, NaN lanes compare equal to
    /// themselves and `0.0` differs from `-0.0`.
    #[inline]
    #[must_use]
    pub fn bitwise_eq(&self, other: &Self) -> bool {
        bytemuck::bytes_of(self) == bytemuck::bytes_of(other)
    }

    /// Size of the vector in bits.
    #[must_use]
    pub const fn register_bits() -> usize {
        N * T::KIND.bit_width()
    }
}

/// Lane access shared by every vector type that can carry patterns.
pub trait Lanes: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Lane scalar.
    type Scalar: Element;

    /// Number of lanes.
    const WIDTH: usize;

    /// Lane `i` set to `f(i)`.
    fn from_fn<F: FnMut(usize) -> Self::Scalar>(f: F) -> Self;

    /// Lane `i`.
    fn extract(&self, i: usize) -> Self::Scalar;

    /// Every lane set to `value`.
    #[inline(always)]
    fn splat(value: Self::Scalar) -> Self {
        Self::from_fn(|_| value)
    }

    /// Every lane set to the bit pattern `bits`.
    #[inline(always)]
    fn splat_bits(bits: <Self::Scalar as Element>::Bits) -> Self {
        Self::splat(<Self::Scalar as Element>::from_bits(bits))
    }

    /// `true` when every lane's bit pattern is `bits`.
    fn all_bits(&self, bits: <Self::Scalar as Element>::Bits) -> bool {
        (0..Self::WIDTH).all(|i| self.extract(i).to_bits() == bits)
    }
}

impl<T: Element, const N: usize> Lanes for Vector<T, N> {
    type Scalar = T;
    const WIDTH: usize = N;

    #[inline(always)]
    fn from_fn<F: FnMut(usize) -> T>(f: F) -> Self {
        Vector::from_fn(f)
    }

    #[inline(always)]
    fn extract(&self, i: usize) -> T {
        self.0[i]
    }

    #[inline(always)]
    fn splat(value: T) -> Self {
        Vector::splat(value)
    }
}

/// Lane-wise bitwise select: `(a & !mask) | (b & mask)`.
///
/// A lane whose mask is all zeroes yields `a`, all ones yields `b`.
#[inline(always)]
pub(crate) fn bitselect<T: Element, const N: usize>(
    a: Vector<T, N>,
    b: Vector<T, N>,
    mask: Vector<T, N>,
) -> Vector<T, N> {
    Vector::from_fn(|i| {
        let m = mask.0[i].to_bits();
        T::from_bits((a.0[i].to_bits() & !m) | (b.0[i].to_bits() & m))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::MaskBits;

    #[test]
    fn test_register_bits() {
        assert_eq!(Vector::<u8, 16>::register_bits(), 128);
        assert_eq!(Vector::<f32, 8>::register_bits(), 256);
        assert_eq!(Vector::<i64, 8>::register_bits(), 512);
    }

    #[test]
    fn test_slice_roundtrip_with_offset() {
        let data: Vec<u16> = (0..20).collect();
        let v = Vector::<u16, 8>::from_slice(&data, 3);
        assert_eq!(v.to_array(), [3, 4, 5, 6, 7, 8, 9, 10]);

        let mut out = [0u16; 10];
        v.store(&mut out, 2);
        assert_eq!(&out[2..], &[3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(&out[..2], &[0, 0]);
    }

    #[test]
    #[should_panic(expected = "from_slice")]
    fn test_from_slice_short() {
        let data = [1u32; 5];
        let _ = Vector::<u32, 4>::from_slice(&data, 2);
    }

    #[test]
    #[should_panic(expected = "from_slice: need 4 elements from offset")]
    fn test_from_slice_huge_offset() {
        let data = [1u32; 5];
        let _ = Vector::<u32, 4>::from_slice(&data, usize::MAX);
    }

    #[test]
    #[should_panic(expected = "store: need 2 elements from offset")]
    fn test_store_huge_offset() {
        let mut out = [0u64; 4];
        Vector::<u64, 2>::splat(9).store(&mut out, usize::MAX - 1);
    }

    #[test]
    fn test_bitwise_eq_nan() {
        let a = Vector::<f32, 4>::splat(f32::NAN);
        assert_ne!(a, a);
        assert!(a.bitwise_eq(&a));
        assert!(!Vector::<f64, 2>::splat(0.0).bitwise_eq(&Vector::splat(-0.0)));
    }

    #[test]
    fn test_bitselect() {
        let a = Vector::<i16, 8>::splat(5);
        let b = Vector::<i16, 8>::splat(-9);
        let mask = Vector::<i16, 8>::new([0, -1, 0, -1, 0, 0, -1, -1]);
        assert_eq!(bitselect(a, b, mask).to_array(), [5, -9, 5, -9, 5, 5, -9, -9]);
    }

    #[test]
    fn test_splat_bits_and_all_bits() {
        let v = <Vector<f64, 4> as Lanes>::splat_bits(u64::MAX);
        assert!(v.all_bits(<u64 as MaskBits>::ONES));
        assert!(!v.all_bits(0));
    }
}
