//! This crate contains the primitives shared by the crates within the
//! `fltconv` system: the emulated 128 bit `WideUint`, widening multiplication
//! helpers, and the small status types returned by the conversion entry
//! points. Most users should go through the `fltconv` crate, which reexports
//! everything needed.

#![no_std]
#![cfg_attr(feature = "const_support", feature(const_mut_refs))]
// not const and tends to be longer
#![allow(clippy::manual_range_contains)]
#![allow(clippy::needless_range_loop)]

#[macro_use]
mod macros;
mod chars_common;
mod limits;
#[cfg(feature = "rand_support")]
mod rand;
#[cfg(feature = "serde_support")]
mod serde;
mod wide_uint;
pub mod widening;

pub use chars_common::*;
pub use limits::NumericLimits;
pub use wide_uint::WideUint;
pub use widening::{widen_add, widen_mul_add};
