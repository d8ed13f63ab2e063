//! Lane scalar types.
//!
//! Every lane type carries an unsigned "mask scalar" of the same width. Masks,
//! `ones()` and `zeroes()` are expressed in that unsigned type and then
//! reinterpreted as the lane type, so a float lane of all-one bits is a NaN
//! pattern rather than `1.0`.

use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, Not};

use bytemuck::Pod;

mod sealed {
    pub trait Sealed {}
}

/// Signedness class of a lane scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarClass {
    /// Unsigned integer.
    Unsigned,
    /// Two's complement signed integer.
    Signed,
    /// IEEE 754 binary floating point.
    Float,
}

/// The ten lane scalar kinds a vector can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ElementKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    U64,
    I64,
    F64,
}

impl ElementKind {
    /// All kinds, in catalog order.
    pub const ALL: [ElementKind; 10] = [
        ElementKind::U8,
        ElementKind::I8,
        ElementKind::U16,
        ElementKind::I16,
        ElementKind::U32,
        ElementKind::I32,
        ElementKind::F32,
        ElementKind::U64,
        ElementKind::I64,
        ElementKind::F64,
    ];

    /// Signedness class.
    #[must_use]
    pub const fn class(self) -> ScalarClass {
        match self {
            ElementKind::U8 | ElementKind::U16 | ElementKind::U32 | ElementKind::U64 => {
                ScalarClass::Unsigned
            }
            ElementKind::I8 | ElementKind::I16 | ElementKind::I32 | ElementKind::I64 => {
                ScalarClass::Signed
            }
            ElementKind::F32 | ElementKind::F64 => ScalarClass::Float,
        }
    }

    /// Width of one lane in bits.
    #[must_use]
    pub const fn bit_width(self) -> usize {
        match self {
            ElementKind::U8 | ElementKind::I8 => 8,
            ElementKind::U16 | ElementKind::I16 => 16,
            ElementKind::U32 | ElementKind::I32 | ElementKind::F32 => 32,
            ElementKind::U64 | ElementKind::I64 | ElementKind::F64 => 64,
        }
    }

    /// Width of one lane in bytes.
    #[must_use]
    pub const fn size(self) -> usize {
        self.bit_width() / 8
    }

    /// The unsigned kind of the same width, used for mask bit patterns.
    #[must_use]
    pub const fn mask_kind(self) -> ElementKind {
        match self.bit_width() {
            8 => ElementKind::U8,
            16 => ElementKind::U16,
            32 => ElementKind::U32,
            _ => ElementKind::U64,
        }
    }

    /// Rust name of the scalar (`"u8"`, `"f32"`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::U8 => "u8",
            ElementKind::I8 => "i8",
            ElementKind::U16 => "u16",
            ElementKind::I16 => "i16",
            ElementKind::U32 => "u32",
            ElementKind::I32 => "i32",
            ElementKind::F32 => "f32",
            ElementKind::U64 => "u64",
            ElementKind::I64 => "i64",
            ElementKind::F64 => "f64",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unsigned bit pattern of a lane (`u8`, `u16`, `u32`, `u64`).
pub trait MaskBits:
    sealed::Sealed
    + Pod
    + Eq
    + Debug
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Send
    + Sync
{
    /// Every bit set.
    const ONES: Self;
    /// No bit set.
    const ZEROES: Self;
}

/// A scalar that can live in a vector lane.
pub trait Element: sealed::Sealed + Pod + PartialEq + Debug + Default + Send + Sync {
    /// Unsigned scalar of the same width.
    type Bits: MaskBits;

    /// Runtime tag for this scalar.
    const KIND: ElementKind;

    /// Size in bytes.
    const SIZE: usize = Self::KIND.size();

    /// Reinterpret a bit pattern as this scalar.
    fn from_bits(bits: Self::Bits) -> Self;

    /// Raw bit pattern of this scalar.
    fn to_bits(self) -> Self::Bits;
}

macro_rules! impl_mask_bits {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl MaskBits for $t {
            const ONES: Self = <$t>::MAX;
            const ZEROES: Self = 0;
        }
    )*};
}

impl_mask_bits!(u8, u16, u32, u64);

macro_rules! impl_element {
    (int $t:ty, $bits:ty, $kind:ident) => {
        impl Element for $t {
            type Bits = $bits;
            const KIND: ElementKind = ElementKind::$kind;

            #[inline(always)]
            fn from_bits(bits: $bits) -> Self {
                bits as $t
            }

            #[inline(always)]
            fn to_bits(self) -> $bits {
                self as $bits
            }
        }
    };
    (float $t:ty, $bits:ty, $kind:ident) => {
        impl sealed::Sealed for $t {}

        impl Element for $t {
            type Bits = $bits;
            const KIND: ElementKind = ElementKind::$kind;

            #[inline(always)]
            fn from_bits(bits: $bits) -> Self {
                <$t>::from_bits(bits)
            }

            #[inline(always)]
            fn to_bits(self) -> $bits {
                <$t>::to_bits(self)
            }
        }
    };
}

impl sealed::Sealed for i8 {}
impl sealed::Sealed for i16 {}
impl sealed::Sealed for i32 {}
impl sealed::Sealed for i64 {}

impl_element!(int u8, u8, U8);
impl_element!(int i8, u8, I8);
impl_element!(int u16, u16, U16);
impl_element!(int i16, u16, I16);
impl_element!(int u32, u32, U32);
impl_element!(int i32, u32, I32);
impl_element!(float f32, u32, F32);
impl_element!(int u64, u64, U64);
impl_element!(int i64, u64, I64);
impl_element!(float f64, u64, F64);
