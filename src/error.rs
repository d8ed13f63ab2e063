//! Errors for vector shapes that cannot be catalogued.

use thiserror::Error;

use crate::element::ElementKind;

/// A vector shape that cannot be part of the catalog.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// `lanes × bit_width` is not 128, 256 or 512.
    #[error("{kind}x{lanes} is a {bits}-bit register; only 128, 256 and 512 bits are supported")]
    UnsupportedRegister {
        /// Lane scalar.
        kind: ElementKind,
        /// Lane count.
        lanes: usize,
        /// `lanes × bit_width`.
        bits: usize,
    },
    /// Halves and interleave need an even lane count.
    #[error("{kind}x{lanes} has an odd lane count")]
    OddLaneWidth {
        /// Lane scalar.
        kind: ElementKind,
        /// Lane count.
        lanes: usize,
    },
    /// The same shape was listed twice.
    #[error("{kind}x{lanes} appears more than once")]
    Duplicate {
        /// Lane scalar.
        kind: ElementKind,
        /// Lane count.
        lanes: usize,
    },
}
