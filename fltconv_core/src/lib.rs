//! Core no-std and no-alloc conversions between binary floating point values
//! and their decimal or hexadecimal text. Most users should go through the
//! `fltconv` crate.

#![no_std]
#![cfg_attr(feature = "const_support", feature(const_mut_refs))]
// We are using special indexing everywhere
#![allow(clippy::needless_range_loop)]
// not const and tends to be longer
#![allow(clippy::manual_range_contains)]

mod bignum;
mod digits;
mod float;
mod from_chars;
mod to_chars;

#[doc(hidden)]
pub use fltconv_internals;
pub use fltconv_internals::widening;

pub use bignum::Bignum;
pub use float::{Decoded, FloatClass, RawFloat};
pub use fltconv_internals::{CharsError, CharsFormat, CharsResult, NumericLimits, WideUint};
pub use from_chars::from_chars;
pub use to_chars::to_chars;

pub mod prelude {
    pub use crate::{
        from_chars, to_chars, CharsError, CharsFormat, CharsResult, RawFloat, WideUint,
    };
}
