//! Accelerated vs. portable selection for the blend-based operations.
//!
//! The choice is made at compile time from the target features the build
//! enables (see [`FeatureTier::is_enabled`]); there is no runtime branch in
//! [`partition`] or [`select`]. The `*_accelerated` variants exist for
//! differential testing and benchmarking: they run the blend kernel when the
//! running CPU supports it, whatever the build enables.
//!
//! | Register | Accelerated when built with | Fallback |
//! |----------|-----------------------------|----------|
//! | 128-bit | `sse4.1` / `neon` | lane loop |
//! | 256-bit | `avx2` | lane loop |
//! | 512-bit | `avx512f` + `avx512bw` | lane loop |
//!
//! The `portable` Cargo feature forces the fallback everywhere.

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::arch;
use crate::catalog::{catalog, FeatureTier, VectorDescriptor};
use crate::element::Element;
use crate::mask::partition_mask_of;
use crate::vector::{bitselect, Lanes, Vector};

/// Which body a vector type's `partition` compiles to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispatchPath {
    /// Single blend instruction of the given tier.
    Accelerated(FeatureTier),
    /// Portable lane-by-lane construction.
    Fallback,
}

impl DispatchPath {
    /// Path for a register of `tier`'s size in this build.
    #[must_use]
    pub const fn for_tier(tier: FeatureTier) -> Self {
        if !cfg!(feature = "portable") && tier.is_enabled() {
            DispatchPath::Accelerated(tier)
        } else {
            DispatchPath::Fallback
        }
    }

    /// Path for a catalogued descriptor in this build.
    #[must_use]
    pub const fn for_descriptor(descriptor: &VectorDescriptor) -> Self {
        Self::for_tier(descriptor.required_feature())
    }

    /// Path for `Vector<T, N>` in this build.
    #[must_use]
    pub const fn of<T: Element, const N: usize>() -> Self {
        match FeatureTier::from_register_bits(Vector::<T, N>::register_bits()) {
            Some(tier) => Self::for_tier(tier),
            None => DispatchPath::Fallback,
        }
    }

    /// `true` for [`DispatchPath::Accelerated`].
    #[must_use]
    pub const fn is_accelerated(self) -> bool {
        matches!(self, DispatchPath::Accelerated(_))
    }
}

/// Run `tier`'s blend kernel over the byte views of the operands.
///
/// Returns `None` when this architecture has no kernel for `tier`.
///
/// # Safety
///
/// `tier`'s target feature must be available on the running CPU, and
/// `Vector<T, N>` must be exactly `tier.register_bits()` wide.
#[inline(always)]
unsafe fn blend<T: Element, const N: usize>(
    tier: FeatureTier,
    a: Vector<T, N>,
    b: Vector<T, N>,
    mask: Vector<T, N>,
) -> Option<Vector<T, N>> {
    debug_assert_eq!(Vector::<T, N>::register_bits(), tier.register_bits());

    let mut out = a;
    let (ba, bb, bm) = (
        bytemuck::bytes_of(&a),
        bytemuck::bytes_of(&b),
        bytemuck::bytes_of(&mask),
    );
    let bo = bytemuck::bytes_of_mut(&mut out);

    #[cfg(target_arch = "x86_64")]
    let done = {
        match tier {
            FeatureTier::Baseline => arch::x86_64::blend_sse41(ba, bb, bm, bo),
            FeatureTier::Mid => arch::x86_64::blend_avx2(ba, bb, bm, bo),
            FeatureTier::Max => arch::x86_64::blend_avx512(ba, bb, bm, bo),
        }
        true
    };

    #[cfg(target_arch = "aarch64")]
    let done = match tier {
        FeatureTier::Baseline => {
            arch::aarch64::blend_neon(ba, bb, bm, bo);
            true
        }
        FeatureTier::Mid | FeatureTier::Max => false,
    };

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    let done = {
        let _ = (tier, ba, bb, bm, bo);
        false
    };

    done.then_some(out)
}

/// Lane-wise select: lanes whose mask is all zeroes come from `a`, all ones
/// from `b`.
///
/// Mask lanes must be all-zero or all-one bits; anything else has
/// unspecified lanes (the kernels look at byte sign bits, the fallback at
/// every bit).
#[inline(always)]
#[must_use]
pub fn select<T: Element, const N: usize>(
    a: Vector<T, N>,
    b: Vector<T, N>,
    mask: Vector<T, N>,
) -> Vector<T, N> {
    if let DispatchPath::Accelerated(tier) = const { DispatchPath::of::<T, N>() } {
        // SAFETY: the tier's target feature is enabled for the whole build and
        // `of` only returns the tier matching this register size.
        if let Some(v) = unsafe { blend(tier, a, b, mask) } {
            return v;
        }
    }
    select_portable(a, b, mask)
}

/// Portable [`select`]: `(a & !mask) | (b & mask)` per lane.
#[inline(always)]
#[must_use]
pub fn select_portable<T: Element, const N: usize>(
    a: Vector<T, N>,
    b: Vector<T, N>,
    mask: Vector<T, N>,
) -> Vector<T, N> {
    bitselect(a, b, mask)
}

/// [`select`] through the blend kernel, if the running CPU has one for this
/// register size.
///
/// Ignores the `portable` feature and the build's target features.
#[must_use]
pub fn select_accelerated<T: Element, const N: usize>(
    a: Vector<T, N>,
    b: Vector<T, N>,
    mask: Vector<T, N>,
) -> Option<Vector<T, N>> {
    let tier = FeatureTier::from_register_bits(Vector::<T, N>::register_bits())?;
    if !tier.is_detected() {
        return None;
    }
    // SAFETY: tier detected on this CPU; register size matches the tier.
    unsafe { blend(tier, a, b, mask) }
}

/// First `offset` lanes `hi`, the rest `lo`, through the path this build
/// selected for `Vector<T, N>`.
///
/// # Panics
///
/// If `offset > N`, on both paths.
#[inline(always)]
#[must_use]
pub fn partition<T: Element, const N: usize>(hi: T, lo: T, offset: usize) -> Vector<T, N> {
    check_offset(offset, N);
    match const { DispatchPath::of::<T, N>() } {
        DispatchPath::Accelerated(_) => select(
            Vector::splat(hi),
            Vector::splat(lo),
            partition_mask_of::<T, N>(offset),
        ),
        DispatchPath::Fallback => partition_portable(hi, lo, offset),
    }
}

/// Portable partition, one lane at a time.
///
/// # Panics
///
/// If `offset > V::WIDTH`.
#[inline(always)]
#[must_use]
pub fn partition_portable<V: Lanes>(hi: V::Scalar, lo: V::Scalar, offset: usize) -> V {
    check_offset(offset, V::WIDTH);
    V::from_fn(|i| if i < offset { hi } else { lo })
}

/// Partition through the blend kernel, if the running CPU has one for this
/// register size.
///
/// # Panics
///
/// If `offset > N`, whether or not a kernel is available.
#[must_use]
pub fn partition_accelerated<T: Element, const N: usize>(
    hi: T,
    lo: T,
    offset: usize,
) -> Option<Vector<T, N>> {
    check_offset(offset, N);
    let mask = partition_mask_of::<T, N>(offset);
    select_accelerated(Vector::splat(hi), Vector::splat(lo), mask)
}

/// Panic message shared by every partition path.
#[inline(always)]
#[track_caller]
fn check_offset(offset: usize, lanes: usize) {
    assert!(
        offset <= lanes,
        "partition: offset {} out of range for {} lanes",
        offset,
        lanes
    );
}

/// The path every catalogued type uses in this build.
pub fn report() -> Vec<(VectorDescriptor, DispatchPath)> {
    catalog()
        .iter()
        .map(|d| {
            let path = DispatchPath::for_descriptor(d);
            log::debug!(
                "{}: {:?} (needs {})",
                d,
                path,
                d.required_feature().target_feature().unwrap_or("no kernel")
            );
            (*d, path)
        })
        .collect()
}
