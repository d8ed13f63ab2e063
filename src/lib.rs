//! Lane pattern constructors for fixed-width SIMD vectors.
//!
//! `vpat` builds vectors whose lanes follow a positional rule:
//!
//! - **Patterns**: [`Pattern::halfs`], [`Pattern::interleave`],
//!   [`Pattern::partition`], [`Pattern::partition_mask`], [`Pattern::ones`],
//!   [`Pattern::zeroes`]
//! - **Merges**: [`Merge::merge_halves`], [`Merge::merge_interleaved`],
//!   [`Merge::merge_partitioned`] (feature `merge`)
//!
//! for the 30 catalogued types `u8x16` through `f64x8` (every lane type at
//! 128, 256 and 512 bits).
//!
//! # SIMD Dispatch
//!
//! `partition` and the merges compile to a single blend instruction when the
//! build enables the register's target feature, and to a portable lane loop
//! otherwise:
//!
//! | Register | x86_64 | aarch64 | Selection |
//! |----------|--------|---------|-----------|
//! | 128-bit | SSE4.1 | NEON | Compile time |
//! | 256-bit | AVX2 | Portable | Compile time |
//! | 512-bit | AVX-512BW | Portable | Compile time |
//! | Other | Portable | Portable | - |
//!
//! Build with e.g. `RUSTFLAGS="-C target-cpu=native"` to enable the blends.
//! The `portable` feature forces the fallback everywhere. Both paths give
//! bit-identical results.
//!
//! # Example
//!
//! ```rust
//! use vpat::{f32x4, u32x8, Pattern};
//!
//! let v = u32x8::partition(7, 3, 3);
//! assert_eq!(v.to_array(), [7, 7, 7, 3, 3, 3, 3, 3]);
//!
//! // Masks are whole lanes of zero or one bits.
//! let m = u32x8::partition_mask(3);
//! assert_eq!(m.to_array(), [0, 0, 0, !0, !0, !0, !0, !0]);
//!
//! // `ones` is a bit pattern, not the number 1.
//! assert!(f32x4::ones().extract(0).is_nan());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod arch;
pub mod catalog;
pub mod dispatch;
mod element;
mod error;
pub mod mask;
mod pattern;
mod types;
mod vector;

#[cfg(feature = "merge")]
mod merge;

// Re-export core operations
pub use catalog::{catalog, Catalogued, FeatureTier, VectorDescriptor};
pub use dispatch::DispatchPath;
pub use element::{Element, ElementKind, MaskBits, ScalarClass};
pub use error::CatalogError;
pub use mask::{partition_mask, PARTITION_MASK};
pub use pattern::Pattern;
pub use types::*;
pub use vector::{Lanes, Vector};

#[cfg(feature = "merge")]
pub use merge::Merge;

/// Widest supported register, in bytes.
pub const MAX_REGISTER_BYTES: usize = mask::HALF;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_scenario() {
        assert_eq!(i32x8::partition(7, 3, 3).to_array(), [7, 7, 7, 3, 3, 3, 3, 3]);
        assert_eq!(i32x8::halfs(7, 3).to_array(), [7, 7, 7, 7, 3, 3, 3, 3]);
        assert_eq!(
            i32x8::partition_mask(3).to_array(),
            [0, 0, 0, -1, -1, -1, -1, -1]
        );
    }

    #[test]
    fn test_zeroes_equals_default() {
        assert_eq!(u64x4::zeroes(), u64x4::default());
        assert_eq!(f32x16::zeroes(), f32x16::splat(0.0));
    }

    #[test]
    fn test_interleave_u64x2() {
        assert_eq!(u64x2::interleave(1, 2).to_array(), [1, 2]);
    }

    #[test]
    fn test_max_register_matches_catalog() {
        let widest = catalog().iter().map(|d| d.register_bits() / 8).max();
        assert_eq!(widest, Some(MAX_REGISTER_BYTES));
    }
}
