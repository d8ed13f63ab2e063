//! The catalogued vector types.
//!
//! Every element kind at every lane count that fills a 128, 256 or 512-bit
//! register. Adding a shape here that does not fit one of those registers
//! fails to compile: the descriptor is evaluated in the `CATALOG` static.

#![allow(non_camel_case_types)]

use crate::catalog::{sealed, Catalogued, VectorDescriptor};
use crate::vector::Vector;

macro_rules! catalog_types {
    ($($alias:ident = $t:ty, $n:literal;)*) => {
        $(
            #[doc = concat!("`", stringify!($n), "` lanes of `", stringify!($t), "`.")]
            pub type $alias = Vector<$t, $n>;

            impl sealed::Sealed for Vector<$t, $n> {}

            impl Catalogued for Vector<$t, $n> {
                const DESCRIPTOR: VectorDescriptor = VectorDescriptor::of::<$t, $n>();
            }
        )*

        pub(crate) static CATALOG: &[VectorDescriptor] = &[
            $(<$alias as Catalogued>::DESCRIPTOR,)*
        ];
    };
}

catalog_types! {
    u8x64 = u8, 64;
    u8x32 = u8, 32;
    u8x16 = u8, 16;
    i8x64 = i8, 64;
    i8x32 = i8, 32;
    i8x16 = i8, 16;
    u16x32 = u16, 32;
    u16x16 = u16, 16;
    u16x8 = u16, 8;
    i16x32 = i16, 32;
    i16x16 = i16, 16;
    i16x8 = i16, 8;
    u32x16 = u32, 16;
    u32x8 = u32, 8;
    u32x4 = u32, 4;
    i32x16 = i32, 16;
    i32x8 = i32, 8;
    i32x4 = i32, 4;
    f32x16 = f32, 16;
    f32x8 = f32, 8;
    f32x4 = f32, 4;
    u64x8 = u64, 8;
    u64x4 = u64, 4;
    u64x2 = u64, 2;
    i64x8 = i64, 8;
    i64x4 = i64, 4;
    i64x2 = i64, 2;
    f64x8 = f64, 8;
    f64x4 = f64, 4;
    f64x2 = f64, 2;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, find, validate, FeatureTier};
    use crate::element::ElementKind;

    #[test]
    fn test_catalog_is_full_cross_product() {
        assert_eq!(catalog().len(), 30);
        for kind in ElementKind::ALL {
            for bits in [128, 256, 512] {
                let lanes = bits / kind.bit_width();
                let d = find(kind, lanes).unwrap_or_else(|| panic!("missing {}x{}", kind, lanes));
                assert_eq!(d.register_bits(), bits);
            }
        }
    }

    #[test]
    fn test_catalog_validates() {
        assert_eq!(validate(catalog()), Ok(()));
    }

    #[test]
    fn test_alias_descriptors() {
        assert_eq!(u8x64::DESCRIPTOR.required_feature(), FeatureTier::Max);
        assert_eq!(f32x8::DESCRIPTOR.required_feature(), FeatureTier::Mid);
        assert_eq!(i64x2::DESCRIPTOR.required_feature(), FeatureTier::Baseline);
        assert_eq!(f64x4::DESCRIPTOR.element_kind(), ElementKind::F64);
        assert_eq!(u16x8::DESCRIPTOR.to_string(), "u16x8");
    }
}
