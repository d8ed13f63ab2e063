//! Vector shape descriptors and the feature tiers they require.
//!
//! | Register | Tier | x86_64 | aarch64 |
//! |----------|------|--------|---------|
//! | 128-bit | `Baseline` | SSE4.1 `pblendvb` | NEON `bsl` |
//! | 256-bit | `Mid` | AVX2 `vpblendvb` | none |
//! | 512-bit | `Max` | AVX-512BW masked move | none |

use std::collections::HashSet;
use std::fmt;

use crate::element::{Element, ElementKind};
use crate::error::CatalogError;
use crate::vector::Lanes;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Capability tier needed for a single-instruction blend of one register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureTier {
    /// 128-bit registers.
    Baseline,
    /// 256-bit registers.
    Mid,
    /// 512-bit registers.
    Max,
}

impl FeatureTier {
    /// All tiers, narrowest first.
    pub const ALL: [FeatureTier; 3] = [FeatureTier::Baseline, FeatureTier::Mid, FeatureTier::Max];

    /// Tier for a register of `bits` bits, if one exists.
    #[must_use]
    pub const fn from_register_bits(bits: usize) -> Option<Self> {
        match bits {
            128 => Some(FeatureTier::Baseline),
            256 => Some(FeatureTier::Mid),
            512 => Some(FeatureTier::Max),
            _ => None,
        }
    }

    /// Register size covered by this tier.
    #[must_use]
    pub const fn register_bits(self) -> usize {
        match self {
            FeatureTier::Baseline => 128,
            FeatureTier::Mid => 256,
            FeatureTier::Max => 512,
        }
    }

    /// Target feature providing the blend on this architecture, if any.
    #[must_use]
    pub const fn target_feature(self) -> Option<&'static str> {
        #[cfg(target_arch = "x86_64")]
        let feature = Some(match self {
            FeatureTier::Baseline => "sse4.1",
            FeatureTier::Mid => "avx2",
            FeatureTier::Max => "avx512bw",
        });

        #[cfg(target_arch = "aarch64")]
        let feature = match self {
            FeatureTier::Baseline => Some("neon"),
            FeatureTier::Mid | FeatureTier::Max => None,
        };

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        let feature = {
            let _ = self;
            None
        };

        feature
    }

    /// Whether the build enables this tier's target feature.
    ///
    /// Evaluated at compile time; this is what selects the `partition` body.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        match self {
            FeatureTier::Baseline => cfg!(any(
                all(target_arch = "x86_64", target_feature = "sse4.1"),
                all(target_arch = "aarch64", target_feature = "neon")
            )),
            FeatureTier::Mid => cfg!(all(target_arch = "x86_64", target_feature = "avx2")),
            FeatureTier::Max => cfg!(all(
                target_arch = "x86_64",
                target_feature = "avx512f",
                target_feature = "avx512bw"
            )),
        }
    }

    /// Whether the running CPU supports this tier.
    #[must_use]
    pub fn is_detected(self) -> bool {
        #[cfg(target_arch = "x86_64")]
        let detected = match self {
            FeatureTier::Baseline => is_x86_feature_detected!("sse4.1"),
            FeatureTier::Mid => is_x86_feature_detected!("avx2"),
            FeatureTier::Max => {
                is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512bw")
            }
        };

        #[cfg(target_arch = "aarch64")]
        let detected =
            self == FeatureTier::Baseline && std::arch::is_aarch64_feature_detected!("neon");

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        let detected = {
            let _ = self;
            false
        };

        detected
    }
}

/// Shape of one catalogued vector type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VectorDescriptor {
    element_kind: ElementKind,
    lane_width: usize,
    required_feature: FeatureTier,
}

impl VectorDescriptor {
    /// Describe `lane_width` lanes of `kind`.
    ///
    /// # Errors
    ///
    /// [`CatalogError::UnsupportedRegister`] when the register is not 128,
    /// 256 or 512 bits, [`CatalogError::OddLaneWidth`] for an odd lane count.
    pub const fn new(kind: ElementKind, lane_width: usize) -> Result<Self, CatalogError> {
        if lane_width % 2 != 0 {
            return Err(CatalogError::OddLaneWidth {
                kind,
                lanes: lane_width,
            });
        }
        let bits = lane_width * kind.bit_width();
        match FeatureTier::from_register_bits(bits) {
            Some(required_feature) => Ok(Self {
                element_kind: kind,
                lane_width,
                required_feature,
            }),
            None => Err(CatalogError::UnsupportedRegister {
                kind,
                lanes: lane_width,
                bits,
            }),
        }
    }

    /// Descriptor for `Vector<T, N>`, checked during const evaluation.
    ///
    /// # Panics
    ///
    /// At compile time when used in a const context with an invalid shape.
    ///
    /// ```rust
    /// use vpat::{FeatureTier, VectorDescriptor};
    ///
    /// const D: VectorDescriptor = VectorDescriptor::of::<u16, 16>();
    /// assert_eq!(D.required_feature(), FeatureTier::Mid);
    /// ```
    ///
    /// A 64-bit register does not build:
    ///
    /// ```compile_fail
    /// use vpat::VectorDescriptor;
    ///
    /// const D: VectorDescriptor = VectorDescriptor::of::<u8, 8>();
    /// assert_eq!(D.lane_width(), 8);
    /// ```
    ///
    /// Nor does an odd lane count:
    ///
    /// ```compile_fail
    /// use vpat::VectorDescriptor;
    ///
    /// const D: VectorDescriptor = VectorDescriptor::of::<f32, 3>();
    /// assert_eq!(D.lane_width(), 3);
    /// ```
    #[must_use]
    pub const fn of<T: Element, const N: usize>() -> Self {
        match Self::new(T::KIND, N) {
            Ok(d) => d,
            Err(_) => panic!("vector shape must be an even lane count filling 128, 256 or 512 bits"),
        }
    }

    /// Lane scalar.
    #[must_use]
    pub const fn element_kind(&self) -> ElementKind {
        self.element_kind
    }

    /// Number of lanes.
    #[must_use]
    pub const fn lane_width(&self) -> usize {
        self.lane_width
    }

    /// Bytes per lane.
    #[must_use]
    pub const fn lane_size(&self) -> usize {
        self.element_kind.size()
    }

    /// `lane_width × bit_width`.
    #[must_use]
    pub const fn register_bits(&self) -> usize {
        self.lane_width * self.element_kind.bit_width()
    }

    /// Tier needed for the accelerated blend.
    #[must_use]
    pub const fn required_feature(&self) -> FeatureTier {
        self.required_feature
    }

    /// Unsigned kind used for this type's mask, ones and zeroes.
    #[must_use]
    pub const fn mask_scalar_kind(&self) -> ElementKind {
        self.element_kind.mask_kind()
    }
}

impl fmt::Display for VectorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.element_kind, self.lane_width)
    }
}

/// A vector type that is part of the catalog.
pub trait Catalogued: Lanes + sealed::Sealed {
    /// Shape of this type.
    const DESCRIPTOR: VectorDescriptor;
}

/// Every catalogued vector type, grouped by lane size, widest first.
#[must_use]
pub fn catalog() -> &'static [VectorDescriptor] {
    crate::types::CATALOG
}

/// Look up the catalogued descriptor for `lane_width` lanes of `kind`.
#[must_use]
pub fn find(kind: ElementKind, lane_width: usize) -> Option<&'static VectorDescriptor> {
    catalog()
        .iter()
        .find(|d| d.element_kind == kind && d.lane_width == lane_width)
}

/// Check a set of descriptors: every shape valid, none repeated.
///
/// # Errors
///
/// The first [`CatalogError`] found.
pub fn validate(entries: &[VectorDescriptor]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut per_tier = [0usize; 3];

    for d in entries {
        let checked = VectorDescriptor::new(d.element_kind, d.lane_width)?;
        debug_assert_eq!(checked.required_feature, d.required_feature);
        if !seen.insert((d.element_kind, d.lane_width)) {
            return Err(CatalogError::Duplicate {
                kind: d.element_kind,
                lanes: d.lane_width,
            });
        }
        per_tier[d.required_feature as usize] += 1;
    }

    log::debug!(
        "validated {} vector types: {} x 128-bit, {} x 256-bit, {} x 512-bit",
        entries.len(),
        per_tier[0],
        per_tier[1],
        per_tier[2]
    );
    Ok(())
}
