//! Architecture-specific blend kernels.
//!
//! One unsafe byte blend per register size and ISA. `dispatch` decides
//! which one runs, if any.

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "aarch64")]
pub mod aarch64;
